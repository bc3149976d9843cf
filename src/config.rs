//! Configuration loading and constants.
//!
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then environment overrides (`PORT`, `APP_ENV`). It is resolved once at
//! startup and shared read-only with every handler. `AppConfig` is the root
//! configuration struct containing all settings.

use const_format::formatcp;
use serde::Deserialize;
use std::path::Path;

// =============================================================================
// HTTP Response Cache Control
// =============================================================================
// Static routes never change for the lifetime of a build, so upstream caches
// may hold them briefly. Live routes (clock, process stats) must not be cached.

/// Static data routes (index, readiness, users, items)
pub const HTTP_CACHE_STATIC_DATA_MAX_AGE: u32 = 60;

pub const CACHE_CONTROL_STATIC_DATA: &str =
    formatcp!("public, max-age={}", HTTP_CACHE_STATIC_DATA_MAX_AGE);

pub const CACHE_CONTROL_LIVE: &str = "no-store";

// =============================================================================
// Defaults
// =============================================================================

/// Default bind address
pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";

/// Default listening port when `PORT` is not set
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Service identifier reported by `/health`
pub const DEFAULT_SERVICE_NAME: &str = "api-service";

/// Human-readable name used in the welcome message
pub const DEFAULT_DISPLAY_NAME: &str = "API Service";

/// Environment name reported by `/api/env` when `APP_ENV` is not set
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "api_service=info,tower_http=info";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

/// Largest JSON request body accepted, in bytes
pub const JSON_BODY_LIMIT: usize = 100 * 1024;

/// Seconds to wait for in-flight requests on shutdown
pub const SHUTDOWN_GRACE_SECS: u64 = 30;

/// Environment variable overriding `http.port`
pub const ENV_PORT: &str = "PORT";

/// Environment variable overriding `service.environment`
pub const ENV_APP_ENV: &str = "APP_ENV";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP listener configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Service identity reported by the endpoints
    #[serde(default)]
    pub service: ServiceConfig,
    /// Optional API surface toggles
    #[serde(default)]
    pub api: ApiConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HTTP_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_HTTP_PORT
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "ServiceConfig::default_name")]
    pub name: String,
    #[serde(default = "ServiceConfig::default_display_name")]
    pub display_name: String,
    /// Deployment environment, e.g. "development" or "production"
    #[serde(default = "ServiceConfig::default_environment")]
    pub environment: String,
    /// Build version, populated at compile time
    #[serde(skip_deserializing, default = "ServiceConfig::default_version")]
    pub version: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: Self::default_name(),
            display_name: Self::default_display_name(),
            environment: Self::default_environment(),
            version: Self::default_version(),
        }
    }
}

impl ServiceConfig {
    fn default_name() -> String {
        DEFAULT_SERVICE_NAME.to_string()
    }

    fn default_display_name() -> String {
        DEFAULT_DISPLAY_NAME.to_string()
    }

    fn default_environment() -> String {
        DEFAULT_ENVIRONMENT.to_string()
    }

    fn default_version() -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Serve `/api/env` (process and runtime introspection)
    #[serde(default = "ApiConfig::default_expose_env")]
    pub expose_env: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            expose_env: Self::default_expose_env(),
        }
    }
}

impl ApiConfig {
    fn default_expose_env() -> bool {
        true
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

    /// Whether structured JSON output was requested
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

impl AppConfig {
    /// Resolve configuration from an optional TOML file and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML configuration file without applying overrides.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Apply environment overrides using the given variable lookup.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup(ENV_PORT) {
            self.http.port = port.trim().parse().map_err(|_| {
                ConfigError::Validation(format!("{} must be a port number, got {:?}", ENV_PORT, port))
            })?;
        }

        if let Some(environment) = lookup(ENV_APP_ENV).filter(|v| !v.is_empty()) {
            self.service.environment = environment;
        }

        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self.logging.format.as_str() {
            "text" | "json" => {}
            other => {
                return Err(ConfigError::Validation(format!(
                    "logging.format must be \"text\" or \"json\", got {:?}",
                    other
                )))
            }
        }

        if self.service.name.is_empty() {
            return Err(ConfigError::Validation(
                "service.name must not be empty".to_string(),
            ));
        }

        Ok(())
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
