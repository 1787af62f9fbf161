//! Configuration for cocktail-finder.
//!
//! Layered the usual way: built-in defaults, then the TOML file in the
//! platform config directory, then `COCKTAIL_`-prefixed environment
//! variables (`__` separates sections, e.g. `COCKTAIL_SERVICE__TIMEOUT=5`).
//! The binary applies its own CLI flags on top and converts the result to
//! a [`cocktail_core::ServiceConfig`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use cocktail_core::ServiceConfig;

/// Default search prefix, duplicated here so the TOML defaults are
/// self-describing.
pub const DEFAULT_BASE_URL: &str = "https://www.thecocktaildb.com/api/json/v1/1/search.php?f=";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceSection,

    #[serde(default)]
    pub ui: UiSection,
}

/// Where the search service lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServiceSection {
    /// Search prefix; the query letter is appended verbatim.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
}

impl Default for ServiceSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}
fn default_timeout() -> u64 {
    30
}
fn default_connect_timeout() -> u64 {
    10
}

/// Event loop pacing for the terminal UI.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UiSection {
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    #[serde(default = "default_render_rate_ms")]
    pub render_rate_ms: u64,
}

impl Default for UiSection {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            render_rate_ms: default_render_rate_ms(),
        }
    }
}

fn default_tick_rate_ms() -> u64 {
    250
}
fn default_render_rate_ms() -> u64 {
    33
}

impl Config {
    /// Validate and convert the service section into the core's runtime
    /// config.
    pub fn to_service_config(&self) -> Result<ServiceConfig, ConfigError> {
        let base_url: url::Url =
            self.service
                .base_url
                .parse()
                .map_err(|e| ConfigError::Validation {
                    field: "service.base_url".into(),
                    reason: format!("invalid URL {:?}: {e}", self.service.base_url),
                })?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation {
                field: "service.base_url".into(),
                reason: format!("expected http or https, got '{}'", base_url.scheme()),
            });
        }

        for (field, secs) in [
            ("service.timeout", self.service.timeout),
            ("service.connect_timeout", self.service.connect_timeout),
        ] {
            if secs == 0 {
                return Err(ConfigError::Validation {
                    field: field.into(),
                    reason: "must be at least 1 second".into(),
                });
            }
        }

        Ok(ServiceConfig {
            base_url,
            timeout: Duration::from_secs(self.service.timeout),
            connect_timeout: Duration::from_secs(self.service.connect_timeout),
        })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "cocktail-finder", "cocktail-finder").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("cocktail-finder");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from a specific file + environment. A missing file is not
/// an error; defaults fill the gaps.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("COCKTAIL_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`, creating parents.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}
