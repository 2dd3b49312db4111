//! Configuration loading.
//!
//! Settings come from an optional TOML file overlaid with environment
//! variables of the form `TODOS__<SECTION>__<KEY>`, e.g.
//! `TODOS__DATABASE__URL=postgres://localhost/todos`.

use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

const ENV_PREFIX: &str = "TODOS";

// ============================================================================
// Configurable Trait
// ============================================================================

/// A typed configuration section.
///
/// # Example
///
/// ```ignore
/// #[derive(Debug, Deserialize, Default)]
/// #[serde(default)]
/// pub struct MetricsConfig {
///     pub enabled: bool,
/// }
///
/// impl Configurable for MetricsConfig {
///     const PREFIX: &'static str = "metrics";
/// }
/// ```
pub trait Configurable: DeserializeOwned + Default {
    /// Name of the TOML table (and environment segment) holding the section.
    const PREFIX: &'static str;
}

// ============================================================================
// Configuration Store
// ============================================================================

pub struct ConfigStore {
    inner: Config,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::empty()
    }
}

impl ConfigStore {
    /// A store with no sources; every section reads as its defaults.
    pub fn empty() -> Self {
        Self {
            inner: Config::default(),
        }
    }

    /// Build a store from a TOML string, without the environment overlay.
    pub fn parse(content: &str) -> Result<Self> {
        let inner = Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()
            .map_err(|e| anyhow!("Failed to parse TOML: {}", e))?;
        Ok(Self { inner })
    }

    /// Build a store from an optional TOML file plus the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            debug!("Loading configuration from: {}", path.display());
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }

        let inner = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins"),
            )
            .build()
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?;

        Ok(Self { inner })
    }

    /// Get a typed section, falling back to its defaults when it is absent.
    pub fn get<C: Configurable>(&self) -> Result<C> {
        match self.inner.get::<C>(C::PREFIX) {
            Ok(section) => Ok(section),
            Err(ConfigError::NotFound(_)) => Ok(C::default()),
            Err(e) => Err(anyhow!(
                "Failed to deserialize config section '{}': {}",
                C::PREFIX,
                e
            )),
        }
    }

}

// ============================================================================
// Sections
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins. Empty means any origin.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// `host:port`, ready for a TCP bind.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Configurable for ServerConfig {
    const PREFIX: &'static str = "server";
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `postgres://...` or `sqlite:...`
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://todos.db?mode=rwc".to_string(),
            max_connections: 5,
            acquire_timeout_secs: 5,
        }
    }
}

impl Configurable for DatabaseConfig {
    const PREFIX: &'static str = "database";
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    pub max_capacity: u64,
    /// Entry lifetime in seconds. Entries live until evicted when unset.
    pub ttl_secs: Option<u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_capacity: 10_000,
            ttl_secs: None,
        }
    }
}

impl Configurable for CacheConfig {
    const PREFIX: &'static str = "cache";
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive, overridden by `RUST_LOG` when set.
    pub level: String,
    pub json: bool,
    /// Write daily-rolling log files here in addition to stdout.
    pub directory: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            directory: None,
        }
    }
}

impl Configurable for LogConfig {
    const PREFIX: &'static str = "log";
}

/// Every section the service reads at startup.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub log: LogConfig,
}

impl AppConfig {
    /// Read every section from an optional TOML file plus the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::from_store(&ConfigStore::load(path)?)
    }

    /// Read every section from an already loaded store.
    pub fn from_store(store: &ConfigStore) -> Result<Self> {
        Ok(Self {
            server: store.get()?,
            database: store.get()?,
            cache: store.get()?,
            log: store.get()?,
        })
    }
}
