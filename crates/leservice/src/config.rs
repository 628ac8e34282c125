//! Service configuration from defaults, TOML and environment

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Default host address (all interfaces)
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default port number
pub const DEFAULT_PORT: u16 = 8000;

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Service name reported by the health check
pub const SERVICE_NAME: &str = "ai-service";

/// Service configuration
///
/// Every field has a default, so a TOML file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Log level for tracing
    pub log_level: String,

    /// Allowed CORS origins; empty allows any origin
    pub cors_origins: Vec<String>,

    /// Reject plan requests for unknown SKUs/warehouses or non-positive quantities
    pub strict_validation: bool,

    /// Seed every plan's random source with this value instead of entropy
    pub rng_seed: Option<u64>,

    /// TOML catalog replacing the built-in reference data
    pub catalog_path: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            cors_origins: Vec::new(),
            strict_validation: false,
            rng_seed: None,
            catalog_path: None,
        }
    }
}

impl ServiceConfig {
    /// Load config from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: ServiceConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load config from an optional file, then apply environment overrides
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(config.with_env())
    }

    /// Load config from environment variables with fallback to defaults
    ///
    /// Environment variables:
    /// - `AI_SERVICE_HOST` - Server host
    /// - `AI_SERVICE_PORT` - Server port
    /// - `AI_SERVICE_LOG_LEVEL` - Log level (trace, debug, info, warn, error)
    /// - `AI_SERVICE_STRICT_VALIDATION` - `true`/`false`
    /// - `AI_SERVICE_RNG_SEED` - Fixed seed for plan randomness
    /// - `AI_SERVICE_CATALOG` - Path to a TOML catalog
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// Apply environment overrides on top of `self`
    ///
    /// Unparseable values are ignored.
    #[must_use]
    pub fn with_env(mut self) -> Self {
        if let Ok(host) = std::env::var("AI_SERVICE_HOST") {
            self.host = host;
        }

        if let Ok(port_str) = std::env::var("AI_SERVICE_PORT") {
            if let Ok(port) = port_str.parse::<u16>() {
                self.port = port;
            }
        }

        if let Ok(log_level) = std::env::var("AI_SERVICE_LOG_LEVEL") {
            self.log_level = log_level;
        }

        if let Ok(strict) = std::env::var("AI_SERVICE_STRICT_VALIDATION") {
            if let Ok(strict) = strict.parse::<bool>() {
                self.strict_validation = strict;
            }
        }

        if let Ok(seed) = std::env::var("AI_SERVICE_RNG_SEED") {
            if let Ok(seed) = seed.parse::<u64>() {
                self.rng_seed = Some(seed);
            }
        }

        if let Ok(catalog) = std::env::var("AI_SERVICE_CATALOG") {
            self.catalog_path = Some(PathBuf::from(catalog));
        }

        self
    }

    /// Get the socket address for the server
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| format!("Invalid address: {}", e))
    }

    /// Get the full server URL
    #[must_use]
    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("Port cannot be zero".to_string());
        }

        if self.host.is_empty() {
            return Err("Host cannot be empty".to_string());
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.log_level
                ));
            }
        }

        Ok(())
    }
}
