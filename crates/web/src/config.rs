//! Brewery configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `BREWERY_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`). When neither is set the in-memory store is used.
//! - `BREWERY_SEED_DEMO_DATA` - Seed the in-memory store with the bundled
//!   catalog (default: true)
//! - `BREWERY_HOST` - Bind address (default: 127.0.0.1)
//! - `BREWERY_PORT` - Listen port (default: 8080)
//! - `BREWERY_BASE_URL` - Public URL used in REST links (default: <http://localhost:8080>)
//! - `BREWERY_LOG_FORMAT` - `text` or `json` (default: text)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where beer records live.
#[derive(Clone)]
pub enum StorageConfig {
    /// `PostgreSQL` at the given URL (contains password).
    Postgres { database_url: SecretString },
    /// Process-local store, optionally seeded with the bundled catalog.
    InMemory { seed_demo_data: bool },
}

impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Postgres { .. } => f
                .debug_struct("Postgres")
                .field("database_url", &"[REDACTED]")
                .finish(),
            Self::InMemory { seed_demo_data } => f
                .debug_struct("InMemory")
                .field("seed_demo_data", seed_demo_data)
                .finish(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'text' or 'json', got '{other}'")),
        }
    }
}

/// Brewery application configuration.
#[derive(Debug, Clone)]
pub struct BreweryConfig {
    /// Backing store for beer records
    pub storage: StorageConfig,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL without trailing slash, used for absolute REST links
    pub base_url: String,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "production", "staging")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

impl Default for BreweryConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::InMemory {
                seed_demo_data: true,
            },
            host: IpAddr::from([127, 0, 0, 1]),
            port: 8080,
            base_url: DEFAULT_BASE_URL.to_string(),
            log_format: LogFormat::Text,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

impl BreweryConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let storage = match get_database_url("BREWERY_DATABASE_URL") {
            Some(database_url) => StorageConfig::Postgres { database_url },
            None => StorageConfig::InMemory {
                seed_demo_data: parse_env_or("BREWERY_SEED_DEMO_DATA", true)?,
            },
        };
        let host = parse_env_or("BREWERY_HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = parse_env_or("BREWERY_PORT", 8080_u16)?;
        let base_url = get_base_url("BREWERY_BASE_URL")?;
        let log_format = parse_env_or("BREWERY_LOG_FORMAT", LogFormat::Text)?;

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = parse_env_or("SENTRY_SAMPLE_RATE", 1.0)?;
        let sentry_traces_sample_rate = parse_env_or("SENTRY_TRACES_SAMPLE_RATE", 0.0)?;

        Ok(Self {
            storage,
            host,
            port,
            base_url,
            log_format,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Absolute URL for `path` under the configured base URL.
    #[must_use]
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL`.
pub fn get_database_url(primary_key: &str) -> Option<SecretString> {
    get_optional_env(primary_key)
        .or_else(|| get_optional_env("DATABASE_URL"))
        .map(SecretString::from)
}

/// Get the database URL, failing if neither variable is set.
///
/// # Errors
///
/// Returns `ConfigError::MissingEnvVar` naming `primary_key`.
pub fn require_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    get_database_url(primary_key).ok_or_else(|| ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get the public base URL, validated and without a trailing slash.
fn get_base_url(key: &str) -> Result<String, ConfigError> {
    let raw = get_optional_env(key).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    normalize_base_url(&raw).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e))
}

fn normalize_base_url(raw: &str) -> Result<String, String> {
    let url = Url::parse(raw.trim()).map_err(|e| e.to_string())?;
    if url.cannot_be_a_base() {
        return Err(format!("'{raw}' cannot be used as a base URL"));
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parse an environment variable, or use `default` when unset.
fn parse_env_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_optional_env(key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}
