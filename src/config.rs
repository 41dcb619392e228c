//! Configuration loading and constants.
//!
//! Loads application configuration from TOML files and defines constants for
//! probe timeouts, response headers, logging format, and default paths.
//! `AppConfig` is the root configuration struct containing all settings.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

// =============================================================================
// Probe Constants
// =============================================================================

/// Upper bound in seconds for acquiring and validating a database connection
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 5;

/// Service name reported by the liveness probe
pub const DEFAULT_SERVICE_NAME: &str = "bankapp";

/// Dependency name used in the readiness `checks` map
pub const DATABASE_CHECK_NAME: &str = "database";

/// Probe responses must never be served from a cache
pub const CACHE_CONTROL_PROBE: &str = "no-store";

// =============================================================================
// Database Pool Constants
// =============================================================================

/// Default maximum number of pooled database connections
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

/// Environment variable consulted when `database.url` is not configured
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "bankapp=debug,tower_http=debug";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

/// Seconds to wait for in-flight requests after a shutdown signal
pub const SHUTDOWN_GRACE_PERIOD_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    pub http: HttpServerConfig,
    /// Backing store connection pool
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Liveness and readiness probe settings
    #[serde(default)]
    pub probe: ProbeConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
}

/// Database pool configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL. Falls back to `DATABASE_URL` when unset.
    pub url: Option<String>,
    /// Maximum pooled connections (default: 5)
    #[serde(default = "DatabaseConfig::default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: Self::default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    fn default_max_connections() -> u32 {
        DEFAULT_DB_MAX_CONNECTIONS
    }
}

/// Probe configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProbeConfig {
    /// Name reported in the liveness body
    #[serde(default = "ProbeConfig::default_service_name")]
    pub service_name: String,
    /// Readiness bound in seconds (default: 5)
    #[serde(default = "ProbeConfig::default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            service_name: Self::default_service_name(),
            timeout_seconds: Self::default_timeout(),
        }
    }
}

impl ProbeConfig {
    fn default_service_name() -> String {
        DEFAULT_SERVICE_NAME.to_string()
    }

    fn default_timeout() -> u64 {
        DEFAULT_PROBE_TIMEOUT_SECS
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents, std::env::var(DATABASE_URL_ENV).ok())
    }

    /// Parse and validate configuration text. `env_url` stands in for the
    /// `DATABASE_URL` environment variable.
    pub fn from_toml(contents: &str, env_url: Option<String>) -> Result<Self, ConfigError> {
        let mut config: AppConfig = toml::from_str(contents)?;

        if config.database.url.is_none() {
            config.database.url = env_url.filter(|url| !url.is_empty());
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.is_none() {
            return Err(ConfigError::Validation(format!(
                "No database URL configured. Set [database] url or {}",
                DATABASE_URL_ENV
            )));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Validation(
                "database.max_connections must be at least 1".to_string(),
            ));
        }

        if self.probe.timeout_seconds == 0 {
            return Err(ConfigError::Validation(
                "probe.timeout_seconds must be greater than 0".to_string(),
            ));
        }

        match self.logging.format.as_str() {
            "text" | "json" => Ok(()),
            other => Err(ConfigError::Validation(format!(
                "Unknown logging.format '{}', expected \"text\" or \"json\"",
                other
            ))),
        }
    }

    /// Database URL, present once the config has passed validation.
    pub fn database_url(&self) -> &str {
        self.database.url.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL: &str = r#"
        [http]
        host = "127.0.0.1"
        port = 8080

        [database]
        url = "postgres://bankapp@localhost/bankapp"
    "#;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = AppConfig::from_toml(MINIMAL, None).unwrap();
        assert_eq!(config.probe.service_name, "bankapp");
        assert_eq!(config.probe.timeout(), Duration::from_secs(5));
        assert_eq!(config.database.max_connections, DEFAULT_DB_MAX_CONNECTIONS);
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_probe_timeout_is_configurable() {
        let toml = format!("{}\n[probe]\ntimeout_seconds = 2\nservice_name = \"ledger\"\n", MINIMAL);
        let config = AppConfig::from_toml(&toml, None).unwrap();
        assert_eq!(config.probe.timeout(), Duration::from_secs(2));
        assert_eq!(config.probe.service_name, "ledger");
    }

    #[test]
    fn test_database_url_falls_back_to_env() {
        let toml = r#"
            [http]
            host = "0.0.0.0"
            port = 8080
        "#;
        let config =
            AppConfig::from_toml(toml, Some("postgres://env@db/bankapp".to_string())).unwrap();
        assert_eq!(config.database_url(), "postgres://env@db/bankapp");
    }

    #[test]
    fn test_file_url_takes_precedence_over_env() {
        let config =
            AppConfig::from_toml(MINIMAL, Some("postgres://env@db/other".to_string())).unwrap();
        assert_eq!(config.database_url(), "postgres://bankapp@localhost/bankapp");
    }

    #[test]
    fn test_missing_database_url_is_rejected() {
        let toml = r#"
            [http]
            host = "0.0.0.0"
            port = 8080
        "#;
        let err = AppConfig::from_toml(toml, None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        let err = AppConfig::from_toml(toml, Some(String::new())).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let toml = format!("{}\n[probe]\ntimeout_seconds = 0\n", MINIMAL);
        let err = AppConfig::from_toml(&toml, None).unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn test_unknown_log_format_is_rejected() {
        let toml = format!("{}\n[logging]\nformat = \"xml\"\n", MINIMAL);
        let err = AppConfig::from_toml(&toml, None).unwrap_err();
        assert!(err.to_string().contains("xml"));
    }

    #[test]
    fn test_json_log_format() {
        let toml = format!("{}\n[logging]\nformat = \"json\"\n", MINIMAL);
        let config = AppConfig::from_toml(&toml, None).unwrap();
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = AppConfig::from_toml("[http\nhost =", None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.http.host, "127.0.0.1");
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
