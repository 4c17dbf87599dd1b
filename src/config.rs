// Configuration loaded from YAML

use crate::ids::{ClockIds, IdGenerator, SequentialIds};
use crate::storage::FileStorage;
use crate::store::DEFAULT_KEY;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// How new task ids are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    Sequential,
    #[default]
    Clock,
}

impl IdStrategy {
    pub fn generator(self) -> Box<dyn IdGenerator> {
        match self {
            IdStrategy::Sequential => Box::new(SequentialIds::new()),
            IdStrategy::Clock => Box::new(ClockIds::new()),
        }
    }
}

/// Settings for the `tasklist` binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding the slot files
    pub data_dir: PathBuf,
    /// Storage key of the task slot
    pub key: String,
    pub ids: IdStrategy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            key: DEFAULT_KEY.to_string(),
            ids: IdStrategy::default(),
        }
    }
}

impl Config {
    /// Load from an explicit path, which must exist
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Load the explicit path if given, else the default location if present, else defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::from_path(&path),
            path => {
                debug!(?path, "No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        // An empty file deserializes to null
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(content).context("Failed to parse config YAML")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the file-backed storage cannot use
    ///
    /// Call again after applying command-line overrides.
    pub fn validate(&self) -> Result<()> {
        FileStorage::validate_key(&self.key).context("Invalid storage key in config")
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize config")
    }
}

/// `<config dir>/tasklist/config.yaml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tasklist").join("config.yaml"))
}

/// `<data dir>/tasklist`, or `./.tasklist` when the platform has no data dir
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("tasklist"))
        .unwrap_or_else(|| PathBuf::from(".tasklist"))
}
