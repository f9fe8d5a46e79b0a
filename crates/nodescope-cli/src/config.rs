//! The `nodescope.toml` configuration.

use nodescope::{
    AnalyticsEngine, CsvDirectoryStore, Error, GoalBook, JsonFileStore, RelationshipStore, Result,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Application name, used for the config directory.
pub const PROJECT_NAME: &str = "nodescope";

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "NODESCOPE_CONFIG";

/// Dataset format of the store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// One JSON dataset document.
    #[default]
    Json,
    /// A directory of CSV files.
    Csv,
}

/// `[store]` section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Dataset format.
    #[serde(default)]
    pub kind: StoreKind,
    /// Dataset file or directory.
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("dataset.json")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            kind: StoreKind::default(),
            path: default_store_path(),
        }
    }
}

impl StoreConfig {
    /// Opens the configured store.
    pub fn open(&self) -> Arc<dyn RelationshipStore> {
        match self.kind {
            StoreKind::Json => Arc::new(JsonFileStore::new(&self.path)),
            StoreKind::Csv => Arc::new(CsvDirectoryStore::new(&self.path)),
        }
    }
}

/// `[export]` section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Pretty-print single-node exports.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_pretty() -> bool {
    true
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
        }
    }
}

/// The whole configuration file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodescopeConfig {
    /// Where the dataset lives.
    #[serde(default)]
    pub store: StoreConfig,
    /// Revenue goals.
    #[serde(default)]
    pub goals: GoalBook,
    /// Export options.
    #[serde(default)]
    pub export: ExportConfig,
}

impl NodescopeConfig {
    /// Default config file location: `<config dir>/nodescope/config.toml`.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PROJECT_NAME).join("config.toml"))
    }

    /// The config file to use: `explicit` if given, else the default location.
    ///
    /// `$NODESCOPE_CONFIG` reaches `explicit` through the command line parser.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(PathBuf::from(path)),
            None => Self::default_config_path(),
        }
    }

    /// Loads the configuration. A missing file yields the defaults.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        match Self::resolve_config_path(explicit) {
            Some(path) if path.exists() => Self::from_file(&path),
            Some(path) => {
                tracing::debug!(path = %path.display(), "No config file; using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Reads one config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Serializes the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Builds an engine over the configured store and goals.
    pub fn engine(&self) -> AnalyticsEngine<Arc<dyn RelationshipStore>> {
        AnalyticsEngine::new(self.store.open()).with_goals(self.goals.clone())
    }
}
