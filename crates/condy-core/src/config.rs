//! Configuration types for condy.
//!
//! [`Config::load`] reads `~/.config/condy/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use crate::error::{CondyError, Result};
use crate::selector::{Icon, SelectorOptions};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[selector]
min_query_len   = 2
primary_field   = "name"
secondary_field = "plate"
icon            = "car"
placeholder     = "no name"
no_results_text = "no drivers found"

[ui]
theme = "default"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/condy/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub selector: SelectorConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// `[selector]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectorConfig {
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
    #[serde(default = "default_primary_field")]
    pub primary_field: String,
    /// An empty string disables secondary matching.
    #[serde(default = "default_secondary_field")]
    pub secondary_field: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    #[serde(default = "default_no_results_text")]
    pub no_results_text: String,
}

fn default_min_query_len() -> usize { 2 }
fn default_primary_field() -> String { "name".to_string() }
fn default_secondary_field() -> String { "plate".to_string() }
fn default_icon() -> String { "car".to_string() }
fn default_placeholder() -> String { "no name".to_string() }
fn default_no_results_text() -> String { "no drivers found".to_string() }

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            min_query_len: default_min_query_len(),
            primary_field: default_primary_field(),
            secondary_field: default_secondary_field(),
            icon: default_icon(),
            placeholder: default_placeholder(),
            no_results_text: default_no_results_text(),
        }
    }
}

impl SelectorConfig {
    /// Resolve into the options a [`Selector`](crate::selector::Selector) is built with.
    pub fn to_options(&self) -> SelectorOptions {
        let secondary = self.secondary_field.trim();
        SelectorOptions {
            primary_field: self.primary_field.clone(),
            secondary_field: (!secondary.is_empty()).then(|| secondary.to_string()),
            icon: Icon::parse_lossy(&self.icon),
            min_query_len: self.min_query_len,
            placeholder: self.placeholder.clone(),
            no_results_text: self.no_results_text.clone(),
            disabled: false,
        }
    }
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_theme() -> String { "default".to_string() }

impl Default for UiConfig {
    fn default() -> Self {
        Self { theme: default_theme() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/condy/config.toml`, layered on top of the built-in
    /// defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Same as [`Config::load`] for an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let io_err = |source| CondyError::Io {
                path: path.to_path_buf(),
                source,
            };
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
            std::fs::write(path, DEFAULT_CONFIG.trim_start()).map_err(io_err)?;
            tracing::info!(path = %path.display(), "wrote default config");
        }

        let config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()?;
        Ok(config)
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
        .join("condy")
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
        assert_eq!(cfg.selector.min_query_len, 2);
        assert_eq!(cfg.selector.primary_field, "name");
        assert_eq!(cfg.selector.secondary_field, "plate");
        assert_eq!(cfg.ui.theme, "default");
    }

    #[test]
    fn defaults_resolve_to_options() {
        let opts = Config::defaults().selector.to_options();
        assert_eq!(opts.icon, Icon::Car);
        assert_eq!(opts.secondary_field.as_deref(), Some("plate"));
        assert!(!opts.disabled);
    }

    #[test]
    fn empty_secondary_disables_it() {
        let cfg = SelectorConfig {
            secondary_field: "  ".to_string(),
            ..SelectorConfig::default()
        };
        assert_eq!(cfg.to_options().secondary_field, None);
    }

    #[test]
    fn missing_file_is_created_then_loaded() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("condy").join("config.toml");
        let cfg = Config::load_from(&path).expect("load");
        assert!(path.exists());
        assert_eq!(cfg.selector.min_query_len, 2);
    }

    #[test]
    fn user_file_overrides_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[selector]\nmin_query_len = 3\n").expect("write");
        let cfg = Config::load_from(&path).expect("load");
        assert_eq!(cfg.selector.min_query_len, 3);
        assert_eq!(cfg.selector.primary_field, "name");
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[selector\nmin_query_len = ").expect("write");
        assert!(matches!(Config::load_from(&path), Err(CondyError::Config(_))));
    }
}
