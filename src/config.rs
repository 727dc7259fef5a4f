use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};

use crate::domains::path_search::AcsConfig;

/// Environment variables with this prefix override file values, e.g.
/// `GRYPHON_ACS__SEARCH__ANT_COUNT=40`.
pub const ENV_PREFIX: &str = "GRYPHON_ACS";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search: AcsConfig,
    pub logging: LoggingConfig,
    pub data: DataConfig,
    /// Seed for every search started by the binary; random when absent.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Domain log file; console only when absent.
    pub file: Option<String>,
    pub level: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Map directory; falls back to `ACS_DATA_DIR` and the default locations.
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { file: None, level: "info".to_string() }
    }
}

impl Config {
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        config.search.validate()?;
        Ok(config)
    }

    /// TOML file (optional) layered under `GRYPHON_ACS__*` environment overrides.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("reading configuration from {}", path.display()))?;
        let config: Config = settings.try_deserialize()?;
        config.search.validate()?;
        Ok(config)
    }
}
