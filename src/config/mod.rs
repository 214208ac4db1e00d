//! Configuration loading and validation for the ordering service.
//!
//! Uses serde_yaml to load YAML configuration files.

mod app;
mod error;
mod storage;

pub use app::AppConfig;
pub use error::ConfigError;
pub use storage::StorageConfig;

use serde::Deserialize;
use std::fs;

/// Root configuration structure for the ordering service.
///
/// Required sections: app. Optional sections: storage (falls back to the
/// in-memory store when absent or disabled).
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Application-level settings like name and environment.
    pub app: AppConfig,
    /// Order/menu/hotel persistence (optional).
    pub storage: Option<StorageConfig>,
}

impl Config {
    /// Load configuration from a YAML file at the given path.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;

        config.validate()?;

        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.app.name.is_empty() {
            return Err(ConfigError::Validation("app.name is required".into()));
        }

        if let Some(ref storage) = self.storage {
            if storage.enabled {
                match storage.path {
                    Some(ref path) if !path.is_empty() => {}
                    _ => {
                        return Err(ConfigError::Validation(
                            "storage.path is required when storage is enabled".into(),
                        ))
                    }
                }

                if let Some(max_connections) = storage.max_connections {
                    if max_connections == 0 {
                        return Err(ConfigError::Validation(
                            "storage.max_connections must be positive".into(),
                        ));
                    }
                }
            }
        }

        Ok(())
    }
}
