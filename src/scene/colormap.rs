//! Colour maps attached to filled contours and colour bars.

use serde::{Deserialize, Serialize};

/// Names accepted for built-in colour maps.
pub const NAMED_COLORMAPS: &[&str] = &[
    "jet", "viridis", "plasma", "inferno", "magma", "cividis", "gray", "hot", "cool", "coolwarm",
    "RdBu", "RdBu_r", "seismic", "rainbow", "turbo",
];

/// Default number of entries in a lookup table.
pub const DEFAULT_LUT_SIZE: usize = 256;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColormapKind {
    /// A built-in map, referenced by name.
    Named,
    /// Linear interpolation between the given colours.
    LinearSegmented { colors: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Colormap {
    pub name: String,
    #[serde(flatten)]
    pub kind: ColormapKind,
    /// Number of lookup table entries.
    pub n: usize,
    /// Colour for values below the lowest level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub under: Option<String>,
    /// Colour for values above the highest level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub over: Option<String>,
}

impl Colormap {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColormapKind::Named,
            n: DEFAULT_LUT_SIZE,
            under: None,
            over: None,
        }
    }

    pub fn from_list(name: impl Into<String>, colors: Vec<String>, n: usize) -> Self {
        Self {
            name: name.into(),
            kind: ColormapKind::LinearSegmented { colors },
            n,
            under: None,
            over: None,
        }
    }

    pub fn is_known_name(name: &str) -> bool {
        let base = name.strip_suffix("_r").unwrap_or(name);
        NAMED_COLORMAPS.contains(&name) || NAMED_COLORMAPS.contains(&base)
    }
}

impl Default for Colormap {
    fn default() -> Self {
        Self::named("jet")
    }
}
