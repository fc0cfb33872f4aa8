//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `MOFRESH_API_BASE_URL` - REST base URL (default: `http://localhost:3000/api/v1`)
//! - `MOFRESH_AUTH_MODE` - `demo` or `api` (default: `demo`)
//! - `MOFRESH_STORAGE_DIR` - directory for local storage (default: `.mofresh`)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api/v1";
const DEFAULT_STORAGE_DIR: &str = ".mofresh";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// How login, registration and OTP verification are performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// Identity resolved locally from the demo directory; no network calls.
    #[default]
    Demo,
    /// Identity asserted by the backend auth endpoints.
    Api,
}

impl std::str::FromStr for AuthMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "demo" => Ok(Self::Demo),
            "api" => Ok(Self::Api),
            other => Err(format!("expected `demo` or `api`, got `{other}`")),
        }
    }
}

/// MoFresh client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// REST API settings
    pub api: ApiConfig,
    /// Authentication strategy
    pub auth_mode: AuthMode,
    /// Directory backing the local key/value storage
    pub storage_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<SecretString>,
}

/// REST API settings.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: Url,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup("MOFRESH_API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let api = ApiConfig::parse(&base_url)?;

        let auth_mode = match lookup("MOFRESH_AUTH_MODE") {
            Some(value) => value.parse().map_err(|e| {
                ConfigError::InvalidEnvVar("MOFRESH_AUTH_MODE".to_string(), e)
            })?,
            None => AuthMode::default(),
        };

        let storage_dir = lookup("MOFRESH_STORAGE_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR), PathBuf::from);

        let sentry_dsn = lookup("SENTRY_DSN")
            .filter(|dsn| !dsn.trim().is_empty())
            .map(SecretString::from);

        Ok(Self {
            api,
            auth_mode,
            storage_dir,
            sentry_dsn,
        })
    }
}

impl ApiConfig {
    /// Validate a base URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` unless the value is an absolute
    /// `http` or `https` URL.
    pub fn parse(base_url: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| {
            ConfigError::InvalidEnvVar("MOFRESH_API_BASE_URL".to_string(), reason)
        };

        let base_url = Url::parse(base_url.trim()).map_err(|e| invalid(e.to_string()))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme `{}`", base_url.scheme())));
        }
        if base_url.cannot_be_a_base() {
            return Err(invalid("URL cannot be used as a base".to_string()));
        }

        Ok(Self { base_url })
    }
}
