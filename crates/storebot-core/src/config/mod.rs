//! Configuration module for storebot.
//!
//! Loads typed configuration from `storebot.json` in the working directory
//! or `~/.storebot/config.json`. All fields use `serde` defaults, so an
//! empty object (or no file at all) yields a working configuration.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub sessions: SessionsConfig,
    pub recommendations: RecommendationsConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration.
    ///
    /// Priority:
    /// 1. local `storebot.json` in the current directory
    /// 2. `~/.storebot/config.json`
    /// 3. built-in defaults
    pub fn load() -> anyhow::Result<Self> {
        let paths = [Self::local_path(), Self::default_path()];

        for path in paths {
            if path.exists() {
                tracing::debug!("Loading config from: {}", path.display());
                return Self::load_from(&path);
            }
        }

        Ok(Config::default())
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Path of the per-directory config file.
    pub fn local_path() -> PathBuf {
        PathBuf::from("storebot.json")
    }

    /// Get the default config file path.
    pub fn default_path() -> PathBuf {
        Self::config_dir().join("config.json")
    }

    /// Get the default config directory path.
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".storebot")
    }

    /// Check the configuration for values the assistant cannot run with.
    ///
    /// Returns every problem found rather than stopping at the first one.
    pub fn validate(&self) -> std::result::Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.service.name.trim().is_empty() {
            errors.push("service.name is empty. Give the assistant a display name.".into());
        }
        if self.service.version.trim().is_empty() {
            errors.push("service.version is empty.".into());
        }
        if self.recommendations.default_limit == 0 {
            errors.push("recommendations.defaultLimit must be at least 1.".into());
        }
        if self.logging.level.parse::<tracing::Level>().is_err() {
            errors.push(format!(
                "logging.level '{}' is not one of trace, debug, info, warn, error.",
                self.logging.level
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Write the default config template to disk.
    pub fn write_default_template() -> anyhow::Result<PathBuf> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let defaults = Config::default();
        let template = serde_json::json!({
            "service": {
                "name": defaults.service.name,
                "version": defaults.service.version
            },
            "sessions": {
                "enabled": defaults.sessions.enabled,
                "historyLimit": defaults.sessions.history_limit
            },
            "recommendations": {
                "defaultLimit": defaults.recommendations.default_limit
            },
            "logging": {
                "level": defaults.logging.level
            }
        });

        std::fs::write(&path, serde_json::to_string_pretty(&template)?)?;
        Ok(path)
    }
}

// ── Service Configuration ───────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
    pub version: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "Polashtoli Store AI Chatbot".into(),
            version: "1.0.0".into(),
        }
    }
}

// ── Session Configuration ───────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionsConfig {
    /// Append each exchange to the session log when a session id is supplied.
    pub enabled: bool,
    /// Number of entries the CLI shows for `/history`.
    pub history_limit: usize,
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            history_limit: 20,
        }
    }
}

// ── Recommendation Configuration ────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecommendationsConfig {
    pub default_limit: usize,
}

impl Default for RecommendationsConfig {
    fn default() -> Self {
        Self { default_limit: 5 }
    }
}

// ── Logging Configuration ───────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter level when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}
