//! Network policy: an injectable switch that lets tests forbid network access.
//!
//! A `NetworkPolicy` is handed to code that talks to the network. Clones share
//! the same switch, so a test can keep one handle and flip it while the code
//! under test holds another.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared allow/deny switch consulted before any connection is opened.
#[derive(Debug, Clone, Default)]
pub struct NetworkPolicy {
    blocked: Arc<AtomicBool>,
}

impl NetworkPolicy {
    /// Policy that permits network access (the production default).
    pub fn allow() -> Self {
        Self::default()
    }

    /// Policy that rejects every connection attempt until `enable` is called.
    pub fn blocked() -> Self {
        Self {
            blocked: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Block network access for every holder of this policy.
    pub fn disable(&self) {
        self.blocked.store(true, Ordering::SeqCst);
        tracing::info!("network access is now blocked");
    }

    /// Re-allow network access for every holder of this policy.
    pub fn enable(&self) {
        self.blocked.store(false, Ordering::SeqCst);
        tracing::info!("network access is unblocked");
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Fails fast with `NetworkBlocked` if the policy currently denies access.
    /// `target` is only used for the error message.
    pub fn ensure_allowed(&self, target: &str) -> Result<(), NetworkBlocked> {
        if self.is_blocked() {
            return Err(NetworkBlocked {
                target: target.to_string(),
            });
        }
        Ok(())
    }
}

/// Returned when code tries to reach the network while the policy blocks it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkBlocked {
    pub target: String,
}

impl fmt::Display for NetworkBlocked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "attempted to connect to {} while network access is blocked; call NetworkPolicy::enable first",
            self.target
        )
    }
}

impl std::error::Error for NetworkBlocked {}
