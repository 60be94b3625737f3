//! Progress reporting for a single download (bytes done, rate, fraction).
//!
//! Purely observational: the console reporter writes a single refreshing line
//! to stderr and never influences the transfer.

use std::io::Write;
use std::time::{Duration, Instant};

/// Snapshot of download progress for one transfer.
#[derive(Debug, Clone)]
pub struct ProgressStats {
    /// Bytes appended during this call so far.
    pub bytes_done: u64,
    /// Remaining size the server advertised (or the fallback guess).
    pub total_bytes: u64,
    /// Elapsed time since the body started arriving (seconds).
    pub elapsed_secs: f64,
}

impl ProgressStats {
    /// Download rate in bytes per second (0 if elapsed is 0).
    pub fn bytes_per_sec(&self) -> f64 {
        if self.elapsed_secs <= 0.0 {
            return 0.0;
        }
        self.bytes_done as f64 / self.elapsed_secs
    }

    /// Fraction complete in [0.0, 1.0]. Capped because the fallback total can
    /// be smaller than what actually arrives.
    pub fn fraction(&self) -> f64 {
        if self.total_bytes == 0 {
            return 1.0;
        }
        (self.bytes_done as f64 / self.total_bytes as f64).min(1.0)
    }

    /// One-line human readable rendering, e.g. `3.00 / 4.77 MiB  62.9%  1.20 MiB/s`.
    pub fn render(&self) -> String {
        format!(
            "{:.2} / {:.2} MiB {:5.1}%  {:.2} MiB/s",
            mib(self.bytes_done),
            mib(self.total_bytes),
            self.fraction() * 100.0,
            self.bytes_per_sec() / 1_048_576.0
        )
    }
}

pub(crate) fn mib(bytes: u64) -> f64 {
    bytes as f64 / 1_048_576.0
}

const REDRAW_INTERVAL: Duration = Duration::from_millis(200);

/// Writes progress lines to stderr, at most every 200 ms plus a final line.
pub(crate) struct ConsoleProgress {
    total_bytes: u64,
    started: Instant,
    last_draw: Option<Instant>,
}

impl ConsoleProgress {
    pub(crate) fn new(total_bytes: u64) -> Self {
        Self {
            total_bytes,
            started: Instant::now(),
            last_draw: None,
        }
    }

    pub(crate) fn stats(&self, bytes_done: u64) -> ProgressStats {
        ProgressStats {
            bytes_done,
            total_bytes: self.total_bytes,
            elapsed_secs: self.started.elapsed().as_secs_f64(),
        }
    }

    pub(crate) fn update(&mut self, bytes_done: u64) {
        let now = Instant::now();
        let due = self
            .last_draw
            .map(|t| now.duration_since(t) >= REDRAW_INTERVAL)
            .unwrap_or(true);
        if !due {
            return;
        }
        self.last_draw = Some(now);
        let mut err = std::io::stderr().lock();
        let _ = write!(err, "\r{}", self.stats(bytes_done).render());
        let _ = err.flush();
    }

    pub(crate) fn finish(&mut self, bytes_done: u64) {
        let mut err = std::io::stderr().lock();
        let _ = writeln!(err, "\r{}", self.stats(bytes_done).render());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_and_rate() {
        let s = ProgressStats {
            bytes_done: 512,
            total_bytes: 1024,
            elapsed_secs: 2.0,
        };
        assert!((s.fraction() - 0.5).abs() < 1e-9);
        assert!((s.bytes_per_sec() - 256.0).abs() < 1e-9);
    }

    #[test]
    fn fraction_is_capped_when_fallback_total_is_too_small() {
        let s = ProgressStats {
            bytes_done: 4096,
            total_bytes: 1024,
            elapsed_secs: 1.0,
        };
        assert_eq!(s.fraction(), 1.0);
    }

    #[test]
    fn zero_elapsed_has_zero_rate() {
        let s = ProgressStats {
            bytes_done: 10,
            total_bytes: 0,
            elapsed_secs: 0.0,
        };
        assert_eq!(s.bytes_per_sec(), 0.0);
        assert_eq!(s.fraction(), 1.0);
    }

    #[test]
    fn render_mentions_rate() {
        let s = ProgressStats {
            bytes_done: 1_048_576,
            total_bytes: 2_097_152,
            elapsed_secs: 1.0,
        };
        let line = s.render();
        assert!(line.contains("1.00 / 2.00 MiB"), "{}", line);
        assert!(line.contains("50.0%"), "{}", line);
        assert!(line.ends_with("1.00 MiB/s"), "{}", line);
    }
}
