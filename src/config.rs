//! Runtime configuration
//!
//! Settings are read from the process environment. A `.env` file in the
//! working directory is loaded first when present, so local runs can keep
//! overrides there. Every field has a default that points at the
//! production upstreams.

use crate::catalog::{OECD_DEFAULT_BASE_URL, WORLDBANK_DEFAULT_BASE_URL};
use crate::error::{AppError, Result};
use std::net::SocketAddr;
use tracing::debug;

pub const ENV_HOST: &str = "MACRO_HOST";
pub const ENV_PORT: &str = "MACRO_PORT";
pub const ENV_OECD_BASE_URL: &str = "OECD_BASE_URL";
pub const ENV_WORLDBANK_BASE_URL: &str = "WORLDBANK_BASE_URL";
pub const ENV_USER_AGENT: &str = "MACRO_USER_AGENT";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; macrodashboard/1.0)";

/// Server and upstream settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// OECD SDMX REST root; the dataflow path is appended
    pub oecd_base_url: String,
    /// World Bank API root, e.g. `https://api.worldbank.org/v2`
    pub worldbank_base_url: String,
    /// User-Agent sent upstream
    pub user_agent: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            oecd_base_url: OECD_DEFAULT_BASE_URL.to_string(),
            worldbank_base_url: WORLDBANK_DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ServerConfig {
    /// Load from `.env` (if present) and the process environment
    pub fn load() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(AppError::Config(format!("Failed to read .env: {}", e))),
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match get(ENV_PORT) {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| AppError::Config(format!("Invalid {} '{}': {}", ENV_PORT, raw, e)))?,
            None => defaults.port,
        };

        let config = Self {
            host: get(ENV_HOST).unwrap_or(defaults.host),
            port,
            oecd_base_url: get(ENV_OECD_BASE_URL).unwrap_or(defaults.oecd_base_url),
            worldbank_base_url: get(ENV_WORLDBANK_BASE_URL).unwrap_or(defaults.worldbank_base_url),
            user_agent: get(ENV_USER_AGENT).unwrap_or(defaults.user_agent),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check that the upstream roots are absolute http(s) URLs and the
    /// listen address parses
    pub fn validate(&self) -> Result<()> {
        for (name, raw) in [
            (ENV_OECD_BASE_URL, &self.oecd_base_url),
            (ENV_WORLDBANK_BASE_URL, &self.worldbank_base_url),
        ] {
            let parsed = url::Url::parse(raw)
                .map_err(|e| AppError::Config(format!("Invalid {} '{}': {}", name, raw, e)))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(AppError::Config(format!(
                    "Invalid {} '{}': scheme must be http or https",
                    name, raw
                )));
            }
        }

        self.socket_addr()?;
        Ok(())
    }

    /// Listen address
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid address {}:{}: {}", self.host, self.port, e)))
    }
}
