//! services/summarizer/src/config.rs
//!
//! Defines the client's configuration structure and loading logic.
//!
//! Configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development. Command-line flags override both.

use std::path::PathBuf;
use summarizer_core::SESSION_KEY;
use tracing::Level;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration resolved at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub backend_url: String,
    pub session_file: PathBuf,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test builds so tests stay hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Backend ---
        let backend_url = lookup("SUMMARIZER_BACKEND_URL")
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        let backend_url = normalize_backend_url(&backend_url)
            .map_err(|reason| ConfigError::InvalidValue("SUMMARIZER_BACKEND_URL".to_string(), reason))?;

        // --- Session Storage ---
        let session_file = match lookup("SUMMARIZER_SESSION_FILE") {
            Some(path) => PathBuf::from(path),
            None => default_session_file()?,
        };

        // --- Logging ---
        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "WARN".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            backend_url,
            session_file,
            log_level,
        })
    }
}

/// Requires an http(s) scheme and strips trailing slashes so endpoint paths
/// can be appended directly.
pub fn normalize_backend_url(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(format!("'{}' must start with http:// or https://", raw));
    }
    Ok(trimmed.to_string())
}

fn default_session_file() -> Result<PathBuf, ConfigError> {
    let base = dirs::data_local_dir()
        .ok_or_else(|| ConfigError::MissingVar("SUMMARIZER_SESSION_FILE".to_string()))?;
    Ok(base.join("ai_summarizer").join(SESSION_KEY))
}
