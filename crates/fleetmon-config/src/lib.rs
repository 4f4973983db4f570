//! Shared configuration for the fleetmon CLI and TUI.
//!
//! One TOML file + `FLEET_*` environment overrides, resolved identically
//! by both binaries.
//!
//! Resolution order for the server URL: explicit override (CLI flag) →
//! `FLEET_SERVER_URL` → `server.url` in the config file → error with a
//! pointer at `fleetmon config init`.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use fleetmon_core::FleetConfig;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no server configured")]
    NoServer,

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

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: Server,

    #[serde(default)]
    pub defaults: Defaults,
}

/// Backend connection settings.
#[derive(Debug, Deserialize, Serialize)]
pub struct Server {
    /// Server root, e.g. "http://tracker.example.net:6062".
    pub url: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            url: None,
            timeout: default_timeout(),
        }
    }
}

/// Presentation defaults (CLI output format, color handling).
#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "fleetmon", "fleetmon").map_or_else(
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
    p.push("fleetmon");
    p
}

// ── Config loading / saving ─────────────────────────────────────────

/// Load the full Config from defaults + file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("FLEET_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, falling back to defaults if the file doesn't exist or
/// fails to parse.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Serialize config to TOML and write it to the canonical path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Resolution ──────────────────────────────────────────────────────

/// Turn loaded config + caller overrides into a [`FleetConfig`].
///
/// `url_override` is the CLI flag / env value and wins over the file;
/// `timeout_override` likewise.
pub fn resolve(
    config: &Config,
    url_override: Option<&str>,
    timeout_override: Option<u64>,
) -> Result<FleetConfig, ConfigError> {
    let url_str = url_override
        .or(config.server.url.as_deref())
        .ok_or(ConfigError::NoServer)?;

    let base_url: url::Url = url_str.parse().map_err(|_| ConfigError::Validation {
        field: "server.url".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    let timeout = timeout_override.unwrap_or(config.server.timeout);

    Ok(FleetConfig::new(base_url).with_timeout(Duration::from_secs(timeout)))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_are_table_auto_30s() {
        let cfg = Config::default();
        assert_eq!(cfg.defaults.output, "table");
        assert_eq!(cfg.defaults.color, "auto");
        assert_eq!(cfg.server.timeout, 30);
        assert_eq!(cfg.server.url, None);
    }

    #[test]
    fn resolve_prefers_the_override_over_the_file() {
        let cfg = Config {
            server: Server {
                url: Some("http://file-host:6062".into()),
                timeout: 30,
            },
            defaults: Defaults::default(),
        };

        let resolved = resolve(&cfg, Some("http://flag-host:6062"), None).unwrap();
        assert_eq!(resolved.base_url.as_str(), "http://flag-host:6062/");

        let resolved = resolve(&cfg, None, Some(5)).unwrap();
        assert_eq!(resolved.base_url.as_str(), "http://file-host:6062/");
        assert_eq!(resolved.timeout, Duration::from_secs(5));
    }

    #[test]
    fn resolve_without_any_url_is_an_error() {
        let cfg = Config::default();
        assert!(matches!(resolve(&cfg, None, None), Err(ConfigError::NoServer)));
    }

    #[test]
    fn resolve_rejects_garbage_urls() {
        let cfg = Config::default();
        let err = resolve(&cfg, Some("not a url"), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn config_round_trips_through_toml() {
        let cfg = Config {
            server: Server {
                url: Some("http://tracker.example.net:6062".into()),
                timeout: 10,
            },
            defaults: Defaults {
                output: "json".into(),
                color: "never".into(),
            },
        };
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.server.url.as_deref(), Some("http://tracker.example.net:6062"));
        assert_eq!(back.server.timeout, 10);
        assert_eq!(back.defaults.output, "json");
    }
}
