//! Site configuration module.
//!
//! Handles loading, validating, and merging the project's `config.toml`.
//! User values are layered over stock defaults, so a config file only needs
//! the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "My Site"
//! subtitle = "a site built with inkpress"
//! base_url = "http://localhost/"
//! author = "admin"
//!
//! [build]
//! output_dir = "build"        # Relative to the project root
//! enable_minify_html = true   # Minify rendered pages before writing
//!
//! [theme]
//! name = "default"            # Uses themes/<name>/
//!
//! [content]
//! posts_dir = "content/posts"
//! pages_dir = "content/pages"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// File name of the project config, at the project root.
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Project configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site identity shown in page headers and titles.
    pub site: SiteMeta,
    /// Output location and post-processing.
    pub build: BuildConfig,
    /// Which theme directory to use.
    pub theme: ThemeConfig,
    /// Where posts and pages live.
    pub content: ContentConfig,
}

impl SiteConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Validation("site.title must not be empty".into()));
        }
        if self.build.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "build.output_dir must not be empty".into(),
            ));
        }
        let mut components = Path::new(&self.theme.name).components();
        let single_name = matches!(components.next(), Some(Component::Normal(_)))
            && components.next().is_none();
        if !single_name {
            return Err(ConfigError::Validation(
                "theme.name must be a single directory name".into(),
            ));
        }
        Ok(())
    }

    /// Directory of the configured theme under `root`.
    pub fn theme_dir(&self, root: &Path) -> PathBuf {
        root.join("themes").join(&self.theme.name)
    }

    /// Output directory under `root` (absolute `output_dir` values win).
    pub fn output_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.build.output_dir)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteMeta {
    pub title: String,
    pub subtitle: String,
    /// Absolute URL the site is served from. Used for canonical links.
    pub base_url: String,
    pub author: String,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            title: "My Site".to_string(),
            subtitle: "a site built with inkpress".to_string(),
            base_url: "http://localhost/".to_string(),
            author: "admin".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    pub output_dir: PathBuf,
    pub enable_minify_html: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("build"),
            enable_minify_html: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    pub name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentConfig {
    pub posts_dir: PathBuf,
    pub pages_dir: PathBuf,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            posts_dir: PathBuf::from("content/posts"),
            pages_dir: PathBuf::from("content/pages"),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from the project root as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load the project config: stock defaults, user overrides, validation.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match load_raw_config(root)? {
        Some(overlay) => merge_toml(base, overlay),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Written by `inkpress init` and printed by `inkpress gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# inkpress configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
title = "My Site"
subtitle = "a site built with inkpress"
# Absolute URL the site is served from.
base_url = "http://localhost/"
author = "admin"

# ---------------------------------------------------------------------------
# Build output
# ---------------------------------------------------------------------------
[build]
# Where the generated site is written, relative to this file.
output_dir = "build"

# Minify rendered HTML before writing. Pages that fail to minify are
# written unchanged.
enable_minify_html = true

# ---------------------------------------------------------------------------
# Theme
# ---------------------------------------------------------------------------
[theme]
# Directory name under themes/.
name = "default"

# ---------------------------------------------------------------------------
# Content
# ---------------------------------------------------------------------------
[content]
posts_dir = "content/posts"
pages_dir = "content/pages"
"##
}
