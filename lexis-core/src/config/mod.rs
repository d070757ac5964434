//! Configuration: one struct per subsystem, TOML file + env overrides.
//!
//! Config is read once at startup and never renegotiated mid-run.

mod gate_config;
mod registry_config;
mod storage_config;
mod sync_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

pub use gate_config::GateConfig;
pub use registry_config::RegistryConfig;
pub use storage_config::StorageConfig;
pub use sync_config::SyncConfig;

/// Top-level configuration for a lexis run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LexisConfig {
    pub registry: RegistryConfig,
    pub gate: GateConfig,
    pub sync: SyncConfig,
    pub storage: StorageConfig,
}

impl LexisConfig {
    /// Load configuration from an optional TOML file, then apply environment
    /// overrides for credentials and endpoints.
    ///
    /// A missing file yields defaults; an unreadable or unparseable file is
    /// an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) if path.exists() => {
                let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                toml::from_str(&raw).map_err(|source| ConfigError::Parse {
                    path: path.display().to_string(),
                    source,
                })?
            }
            _ => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("LEXIS_BOOKMARKS_URL") {
            self.sync.bookmarks_url = url;
        }
        if let Ok(token) = std::env::var("LEXIS_BOOKMARKS_TOKEN") {
            self.sync.bookmarks_token = token;
        }
        if let Ok(url) = std::env::var("LEXIS_SUGGESTER_URL") {
            self.sync.suggester_url = url;
        }
        if let Ok(token) = std::env::var("LEXIS_SUGGESTER_TOKEN") {
            self.sync.suggester_token = token;
        }
        if let Ok(dir) = std::env::var("LEXIS_DATA_DIR") {
            self.storage.data_dir = dir.into();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants;

    #[test]
    fn defaults_match_constants() {
        let config = LexisConfig::default();
        assert_eq!(
            config.registry.similarity_threshold,
            constants::DEFAULT_SIMILARITY_THRESHOLD
        );
        assert_eq!(config.gate.growth_threshold, constants::DEFAULT_GROWTH_THRESHOLD);
        assert_eq!(config.gate.entropy_threshold, constants::DEFAULT_ENTROPY_THRESHOLD);
        assert_eq!(config.sync.batch_size, constants::DEFAULT_BATCH_SIZE);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config: LexisConfig = toml::from_str(
            r#"
            [gate]
            entropy_threshold = 2.5

            [sync]
            batch_size = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.gate.entropy_threshold, 2.5);
        assert_eq!(config.sync.batch_size, 10);
        // Untouched sections keep their defaults.
        assert_eq!(config.gate.growth_threshold, constants::DEFAULT_GROWTH_THRESHOLD);
        assert_eq!(
            config.registry.similarity_threshold,
            constants::DEFAULT_SIMILARITY_THRESHOLD
        );
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config =
            LexisConfig::load(Some(std::path::Path::new("/nonexistent/lexis.toml"))).unwrap();
        assert_eq!(config.sync.batch_size, constants::DEFAULT_BATCH_SIZE);
    }
}
