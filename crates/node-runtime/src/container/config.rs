//! # Node Configuration
//!
//! Gateway and directory settings for the authz node.
//!
//! ## Sources (later wins)
//!
//! 1. Built-in defaults
//! 2. JSON file named by `AUTHZ_CONFIG`
//! 3. `AUTHZ_HOST`, `AUTHZ_PORT`, `AUTHZ_FIXTURES`

use std::net::IpAddr;
use std::path::{Path, PathBuf};

use authz_03_api_gateway::GatewayConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_CONFIG: &str = "AUTHZ_CONFIG";
pub const ENV_HOST: &str = "AUTHZ_HOST";
pub const ENV_PORT: &str = "AUTHZ_PORT";
pub const ENV_FIXTURES: &str = "AUTHZ_FIXTURES";

/// Complete node configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// HTTP gateway configuration.
    pub gateway: GatewayConfig,
    /// Directory seeding configuration.
    pub directory: DirectoryConfig,
}

/// Directory configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// JSON fixture file loaded at startup. Without one the directory
    /// starts empty.
    pub fixtures: Option<PathBuf>,
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("Fixtures file does not exist: {0}")]
    MissingFixtures(PathBuf),

    #[error(transparent)]
    Gateway(#[from] authz_03_api_gateway::ConfigError),
}

impl NodeConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load using `lookup` in place of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(ENV_CONFIG) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };

        if let Some(host) = lookup(ENV_HOST) {
            config.gateway.http.host = host.parse::<IpAddr>().map_err(|_| {
                ConfigError::InvalidEnv {
                    var: ENV_HOST,
                    value: host.clone(),
                }
            })?;
        }
        if let Some(port) = lookup(ENV_PORT) {
            config.gateway.http.port =
                port.parse().map_err(|_| ConfigError::InvalidEnv {
                    var: ENV_PORT,
                    value: port.clone(),
                })?;
        }
        if let Some(fixtures) = lookup(ENV_FIXTURES) {
            config.directory.fixtures = Some(PathBuf::from(fixtures));
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gateway.validate()?;
        if let Some(path) = &self.directory.fixtures {
            if !path.is_file() {
                return Err(ConfigError::MissingFixtures(path.clone()));
            }
        }
        Ok(())
    }
}
