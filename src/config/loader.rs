//! Loading figure documents and the application config.
//!
//! Figure documents are YAML or JSON, picked by file extension, and may be
//! layered with the strict merge. The application config is merged across tiers
//! with the lenient merge, higher tiers winning.

use super::merge::{deep_merge_all, merge_layers};
use super::types::AppConfig;
use crate::dispatch::ConfigMap;
use crate::error::DispatchError;
use crate::format::OutputFormat;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Environment variable naming an explicit config file (overrides all tiers).
pub const CONFIG_PATH_ENV: &str = "XYPLOT_CONFIG_PATH";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {} as YAML: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to parse {} as JSON: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: top level of a document must be a mapping", .path.display())]
    NotAMapping { path: PathBuf },

    #[error("invalid configuration in {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Merge(#[from] DispatchError),
}

/// Parse a file into a JSON value. `.json` is JSON, anything else is YAML.
fn read_value(path: &Path) -> Result<Value, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    match OutputFormat::from_path(path) {
        Some(OutputFormat::Json) => serde_json::from_str(&content).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        }),
        _ => serde_yaml::from_str(&content).map_err(|source| LoadError::Yaml {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Load one figure document.
pub fn load_document(path: &Path) -> Result<ConfigMap, LoadError> {
    match read_value(path)? {
        Value::Object(map) => {
            debug!(path = %path.display(), keys = map.len(), "document loaded");
            Ok(map)
        }
        // An empty YAML file parses as null.
        Value::Null => Ok(ConfigMap::new()),
        _ => Err(LoadError::NotAMapping {
            path: path.to_path_buf(),
        }),
    }
}

/// Load and strictly merge documents; later documents override earlier ones.
pub fn load_documents<P: AsRef<Path>>(paths: &[P]) -> Result<ConfigMap, LoadError> {
    let documents = paths
        .iter()
        .map(|p| load_document(p.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(deep_merge_all(documents)?)
}

/// Configuration tier priority (lowest to highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigTier {
    /// Built-in defaults (lowest priority)
    Defaults = 0,
    /// Project-level config (`./xyplot.yaml`)
    Project = 1,
    /// User-level config (`~/.xyplot/config.yaml`)
    User = 2,
    /// Explicit file from `XYPLOT_CONFIG_PATH` (highest priority)
    Environment = 3,
}

impl std::fmt::Display for ConfigTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigTier::Defaults => write!(f, "defaults"),
            ConfigTier::Project => write!(f, "project"),
            ConfigTier::User => write!(f, "user"),
            ConfigTier::Environment => write!(f, "environment"),
        }
    }
}

/// Config file location for each tier.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    pub project_file: Option<PathBuf>,
    pub user_file: Option<PathBuf>,
    pub explicit_file: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover configuration paths from the environment and defaults.
    pub fn discover() -> Self {
        Self {
            project_file: Some(PathBuf::from("xyplot.yaml")),
            user_file: dirs::home_dir().map(|h| h.join(".xyplot").join("config.yaml")),
            explicit_file: std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from),
        }
    }

    fn tiers(&self) -> [(ConfigTier, Option<&Path>); 3] {
        [
            (ConfigTier::Project, self.project_file.as_deref()),
            (ConfigTier::User, self.user_file.as_deref()),
            (ConfigTier::Environment, self.explicit_file.as_deref()),
        ]
    }
}

/// Loads [`AppConfig`] from all tiers.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    pub paths: ConfigPaths,
    config: AppConfig,
    /// Files that contributed, lowest tier first.
    sources: Vec<(ConfigTier, PathBuf)>,
}

impl ConfigLoader {
    pub fn load() -> Result<Self, LoadError> {
        Self::load_with_paths(ConfigPaths::discover())
    }

    /// Load configuration with explicit paths.
    ///
    /// Missing or unreadable project and user files are skipped with a
    /// warning; an explicit file must load.
    pub fn load_with_paths(paths: ConfigPaths) -> Result<Self, LoadError> {
        let mut layers: Vec<Value> = Vec::new();
        let mut sources = Vec::new();

        if let Ok(defaults) = serde_json::to_value(AppConfig::default()) {
            layers.push(defaults);
        }

        for (tier, path) in paths.tiers() {
            let Some(path) = path else { continue };
            if tier != ConfigTier::Environment && !path.exists() {
                continue;
            }
            match read_value(path) {
                Ok(value) => {
                    layers.push(value);
                    sources.push((tier, path.to_path_buf()));
                }
                Err(err) if tier == ConfigTier::Environment => return Err(err),
                Err(err) => warn!(%tier, error = %err, "skipping config tier"),
            }
        }

        let merged = merge_layers(layers);
        let config: AppConfig = serde_json::from_value(merged).map_err(|source| LoadError::Config {
            path: sources
                .last()
                .map(|(_, p)| p.clone())
                .unwrap_or_else(|| PathBuf::from("<defaults>")),
            source,
        })?;

        Ok(Self { paths, config, sources })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn into_config(self) -> AppConfig {
        self.config
    }

    /// Files that contributed to the configuration, lowest tier first.
    pub fn sources(&self) -> &[(ConfigTier, PathBuf)] {
        &self.sources
    }
}
