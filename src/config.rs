use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct RobokopConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub pairs: PairsConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
    /// Connections kept for concurrent queries.
    pub read_pool_size: u32,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PairsConfig {
    /// Upper bound applied to any requested page size.
    pub max_limit: u32,
    /// Predictions scoring below this are dropped at load time.
    pub min_score: f64,
    /// Default dataset source for `load` when neither a file nor `--url` is given.
    pub dataset_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
            log_level: "info".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let db_path = default_robokop_dir()
            .join("drug_disease_pairs.db")
            .to_string_lossy()
            .into_owned();
        Self {
            db_path,
            read_pool_size: 4,
        }
    }
}

impl Default for PairsConfig {
    fn default() -> Self {
        Self {
            max_limit: 500,
            min_score: 0.5,
            dataset_url: None,
        }
    }
}

/// Returns `~/.robokop/`, or `./.robokop/` when no home directory is known.
pub fn default_robokop_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".robokop")
}

/// Returns the default config file path: `~/.robokop/config.toml`
pub fn default_config_path() -> PathBuf {
    default_robokop_dir().join("config.toml")
}

impl RobokopConfig {
    /// Load config from the default TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            RobokopConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (ROBOKOP_DB, ROBOKOP_LOG_LEVEL, ROBOKOP_PORT).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("ROBOKOP_DB") {
            self.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("ROBOKOP_LOG_LEVEL") {
            self.server.log_level = val;
        }
        if let Ok(val) = std::env::var("ROBOKOP_PORT") {
            match val.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!(value = %val, "ignoring invalid ROBOKOP_PORT"),
            }
        }
    }

    /// Resolve the database path, expanding `~` if needed.
    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
