use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Downloader defaults (`[download]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Size of each write to the target file in bytes.
    pub chunk_size: usize,
    /// Seconds to wait for the TCP/TLS connection.
    pub connect_timeout_secs: u64,
    /// Maximum number of redirects followed per request.
    pub max_redirections: u32,
    /// Draw a progress line on stderr by default.
    pub show_progress: bool,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1024 * 1024,
            connect_timeout_secs: 30,
            max_redirections: 10,
            show_progress: false,
        }
    }
}

/// Global configuration loaded from `~/.config/toolbelt/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolbeltConfig {
    /// Indent used when writing JSON; `0` writes compact JSON.
    #[serde(default = "default_json_indent")]
    pub json_indent: Option<usize>,
    #[serde(default)]
    pub download: DownloadConfig,
}

impl Default for ToolbeltConfig {
    fn default() -> Self {
        Self {
            json_indent: default_json_indent(),
            download: DownloadConfig::default(),
        }
    }
}

fn default_json_indent() -> Option<usize> {
    Some(2)
}

impl ToolbeltConfig {
    /// Indent to pass to the JSON writers (`None` for compact output).
    pub fn json_output_indent(&self) -> Option<usize> {
        self.json_indent.filter(|&n| n > 0)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("toolbelt")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ToolbeltConfig> {
    load_or_init_at(&config_path()?)
}

/// Like `load_or_init` but with an explicit path (tests, `--config`).
pub fn load_or_init_at(path: &Path) -> Result<ToolbeltConfig> {
    if !path.exists() {
        let default_cfg = ToolbeltConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ToolbeltConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = ToolbeltConfig::default();
        assert_eq!(cfg.json_indent, Some(2));
        assert_eq!(cfg.download.chunk_size, 1_048_576);
        assert_eq!(cfg.download.connect_timeout_secs, 30);
        assert_eq!(cfg.download.max_redirections, 10);
        assert!(!cfg.download.show_progress);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = ToolbeltConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: ToolbeltConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            json_indent = 4

            [download]
            chunk_size = 65536
            connect_timeout_secs = 5
            max_redirections = 2
            show_progress = true
        "#;
        let cfg: ToolbeltConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.json_indent, Some(4));
        assert_eq!(cfg.download.chunk_size, 65536);
        assert_eq!(cfg.download.connect_timeout_secs, 5);
        assert_eq!(cfg.download.max_redirections, 2);
        assert!(cfg.download.show_progress);
    }

    #[test]
    fn config_toml_missing_sections_use_defaults() {
        let cfg: ToolbeltConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, ToolbeltConfig::default());
    }

    #[test]
    fn file_without_indent_key_matches_defaults() {
        let cfg: ToolbeltConfig = toml::from_str("[download]\nchunk_size = 4096\n").unwrap();
        assert_eq!(cfg.json_indent, Some(2));
        assert_eq!(cfg.json_output_indent(), Some(2));
        assert_eq!(cfg.download.chunk_size, 4096);
        assert_eq!(cfg.download.max_redirections, 10);
    }

    #[test]
    fn zero_indent_means_compact() {
        let cfg: ToolbeltConfig = toml::from_str("json_indent = 0\n").unwrap();
        assert_eq!(cfg.json_output_indent(), None);
    }

    #[test]
    fn load_or_init_creates_then_reads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");
        let created = load_or_init_at(&path).unwrap();
        assert!(path.exists());
        assert_eq!(created, ToolbeltConfig::default());

        fs::write(&path, "json_indent = 8\n").unwrap();
        let loaded = load_or_init_at(&path).unwrap();
        assert_eq!(loaded.json_indent, Some(8));
    }
}
