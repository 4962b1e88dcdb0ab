//! Configuration types for treemap.
//!
//! [`Config::load`] reads `~/.config/treemap/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[source]
url              = "https://docs.google.com/spreadsheets/d/e/2PACX-1vT8eU3aMyb4r8CzgzSENw67McR_ljvxOW08LmBGC5akvChhzJ-HWII0GEYQxWp9WE2W9pnMAN8wWR-x/pub?gid=1748402674&single=true&output=csv"
cache_bust_param = "v"
timeout_secs     = 30
timestamp_header = "Timestamp"

[ui]
show_pending     = false
show_coordinates = true
theme            = "default"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/treemap/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// `[source]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Published CSV export URL, or a path to a local CSV file.
    #[serde(default = "default_url")]
    pub url: String,
    /// Query parameter carrying the cache-defeating timestamp.
    #[serde(default = "default_cache_bust_param")]
    pub cache_bust_param: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Header of the submission timestamp column used for growth counts.
    #[serde(default = "default_timestamp_header")]
    pub timestamp_header: String,
}

fn default_url() -> String { String::new() }
fn default_cache_bust_param() -> String { "v".to_string() }
fn default_timeout_secs() -> u64 { 30 }
fn default_timestamp_header() -> String { "Timestamp".to_string() }

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            cache_bust_param: default_cache_bust_param(),
            timeout_secs: default_timeout_secs(),
            timestamp_header: default_timestamp_header(),
        }
    }
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    /// Pending submissions are hidden unless this is set.
    #[serde(default)]
    pub show_pending: bool,
    #[serde(default = "default_show_coordinates")]
    pub show_coordinates: bool,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_show_coordinates() -> bool { true }
fn default_theme() -> String { "default".to_string() }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_pending: false,
            show_coordinates: default_show_coordinates(),
            theme: default_theme(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/treemap/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Layer the file at `path` (if present) over the built-in defaults.
    pub fn load_from(path: &std::path::Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Normalizer honouring the configured timestamp header.
    pub fn normalizer(&self) -> crate::normalizer::Normalizer {
        crate::normalizer::Normalizer::new().with_timestamp_header(&self.source.timestamp_header)
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("treemap")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load() {
        let cfg = Config::defaults();
        assert!(cfg.source.url.starts_with("https://docs.google.com/"));
        assert_eq!(cfg.source.cache_bust_param, "v");
        assert_eq!(cfg.source.timeout_secs, 30);
        assert_eq!(cfg.source.timestamp_header, "Timestamp");
        assert!(!cfg.ui.show_pending);
        assert!(cfg.ui.show_coordinates);
        assert_eq!(cfg.ui.theme, "default");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = Config::load_from(std::path::Path::new("/nonexistent/treemap.toml")).unwrap();
        assert_eq!(cfg.source.cache_bust_param, "v");
    }
}
