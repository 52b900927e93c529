//! Server configuration - environment loading
//!
//! Configuration is loaded from environment variables:
//! - `HOST`: Address to bind (default: 0.0.0.0)
//! - `PORT`: Port to bind (default: 8000)
//! - `DATABASE_URL`: PostgreSQL connection string (optional)
//! - `DATABASE_NAME`: Logical database / schema name (default: demodesk)

use std::collections::BTreeMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DATABASE_NAME: &str = "demodesk";
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const DATABASE_NAME_VAR: &str = "DATABASE_NAME";

/// Default maximum connections for the pool.
/// Kept low for a single-instance demo service.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var} '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Document store connection settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub name: String,
    pub max_connections: u32,
    pub connect_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            name: DEFAULT_DATABASE_NAME.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connect_timeout: Duration::from_secs(5),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:8000)
    pub bind_addr: SocketAddr,

    /// Per-request timeout
    pub request_timeout: Duration,

    pub database: DatabaseConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            request_timeout: Duration::from_secs(30),
            database: DatabaseConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Create config from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(&EnvSource::Process)
    }

    /// Create config from an explicit environment source
    pub fn from_source(env: &EnvSource) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(host) = env.get("HOST") {
            let ip: IpAddr = host.parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::Invalid {
                    var: "HOST",
                    value: host.clone(),
                    reason: e.to_string(),
                }
            })?;
            config.bind_addr.set_ip(ip);
        }

        if let Some(port) = env.get("PORT") {
            let port: u16 = port.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::Invalid {
                    var: "PORT",
                    value: port.clone(),
                    reason: e.to_string(),
                }
            })?;
            config.bind_addr.set_port(port);
        }

        config.database.url = env.get(DATABASE_URL_VAR);
        if let Some(name) = env.get(DATABASE_NAME_VAR) {
            config.database.name = name;
        }

        Ok(config)
    }
}

/// Where environment lookups are answered from.
///
/// `Process` reads the live environment on every call; `Fixed` is for tests.
#[derive(Debug, Clone, Default)]
pub enum EnvSource {
    #[default]
    Process,
    Fixed(BTreeMap<String, String>),
}

impl EnvSource {
    pub fn fixed<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Fixed(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Value of `key`, treating empty values as unset.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match self {
            Self::Process => std::env::var(key).ok(),
            Self::Fixed(vars) => vars.get(key).cloned(),
        };
        value.filter(|v| !v.is_empty())
    }

    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}
