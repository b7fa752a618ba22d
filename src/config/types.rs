//! Application configuration types.

use crate::format::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings for the `xyplot` tool itself (not figure documents).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Documents layered beneath every figure document, lowest first.
    #[serde(default)]
    pub style_sheets: Vec<PathBuf>,

    #[serde(default)]
    pub output: OutputConfig,
}

/// How saved scenes and merged documents are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Format used when a path has no recognised extension (default: json).
    #[serde(default)]
    pub format: OutputFormat,

    /// Pretty-print JSON output (default: true).
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            pretty: default_pretty(),
        }
    }
}

fn default_pretty() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: AppConfig = serde_yaml::from_str("output:\n  format: yaml\n").unwrap();
        assert_eq!(config.output.format, OutputFormat::Yaml);
        assert!(config.output.pretty);
        assert!(config.style_sheets.is_empty());
    }
}
