//! Drawable elements recorded on an axes.

use super::axes::Axes;
use super::colormap::Colormap;
use crate::dispatch::ConfigMap;
use serde::{Deserialize, Serialize};

/// Numeric data: a row of samples or a 2-D grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Field {
    Row(Vec<f64>),
    Grid(Vec<Vec<f64>>),
}

impl Field {
    /// (rows, cols) of the data; a row is 1 x n.
    pub fn shape(&self) -> (usize, usize) {
        match self {
            Field::Row(row) => (1, row.len()),
            Field::Grid(grid) => (grid.len(), grid.first().map_or(0, Vec::len)),
        }
    }

    pub fn is_rectangular(&self) -> bool {
        match self {
            Field::Row(_) => true,
            Field::Grid(grid) => {
                let width = grid.first().map_or(0, Vec::len);
                grid.iter().all(|row| row.len() == width)
            }
        }
    }

    /// Finite (min, max) over all samples.
    pub fn range(&self) -> Option<(f64, f64)> {
        let values: Box<dyn Iterator<Item = f64> + '_> = match self {
            Field::Row(row) => Box::new(row.iter().copied()),
            Field::Grid(grid) => Box::new(grid.iter().flatten().copied()),
        };
        values.filter(|v| v.is_finite()).fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Patch {
    Circle {
        center: (f64, f64),
        radius: f64,
        style: ConfigMap,
    },
    Ellipse {
        center: (f64, f64),
        width: f64,
        height: f64,
        angle: f64,
        style: ConfigMap,
    },
    Rectangle {
        xy: (f64, f64),
        width: f64,
        height: f64,
        angle: f64,
        style: ConfigMap,
    },
    Arc {
        center: (f64, f64),
        width: f64,
        height: f64,
        angle: f64,
        theta1: f64,
        theta2: f64,
        style: ConfigMap,
    },
    Wedge {
        center: (f64, f64),
        r: f64,
        theta1: f64,
        theta2: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        width: Option<f64>,
        style: ConfigMap,
    },
}

/// Filled contour set produced by `contourf`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContourSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Field>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Field>,
    pub z: Field,
    pub levels: Vec<f64>,
    pub extend: String,
    pub cmap: Colormap,
    pub style: ConfigMap,
}

/// Colour bar describing a contour set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Colorbar {
    pub levels: Vec<f64>,
    pub cmap: Colormap,
    pub orientation: String,
    pub shrink: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// The colour bar's own axes.
    pub ax: Axes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Artist {
    Line {
        xs: Vec<f64>,
        ys: Vec<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        fmt: Option<String>,
        style: ConfigMap,
    },
    Scatter {
        xs: Vec<f64>,
        ys: Vec<f64>,
        style: ConfigMap,
    },
    Fill {
        xs: Vec<f64>,
        ys: Vec<f64>,
        style: ConfigMap,
    },
    Stream {
        x: Field,
        y: Field,
        u: Field,
        v: Field,
        style: ConfigMap,
    },
    Contour(ContourSet),
    Colorbar(Box<Colorbar>),
    Text {
        x: f64,
        y: f64,
        text: String,
        style: ConfigMap,
    },
    Annotation {
        text: String,
        xy: (f64, f64),
        #[serde(skip_serializing_if = "Option::is_none")]
        xytext: Option<(f64, f64)>,
        style: ConfigMap,
    },
    HLine {
        y: f64,
        xmin: f64,
        xmax: f64,
        style: ConfigMap,
    },
    VLine {
        x: f64,
        ymin: f64,
        ymax: f64,
        style: ConfigMap,
    },
    HSpan {
        ymin: f64,
        ymax: f64,
        xmin: f64,
        xmax: f64,
        style: ConfigMap,
    },
    VSpan {
        xmin: f64,
        xmax: f64,
        ymin: f64,
        ymax: f64,
        style: ConfigMap,
    },
    Patch(Patch),
}

impl Artist {
    /// Short label used in summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            Artist::Line { .. } => "line",
            Artist::Scatter { .. } => "scatter",
            Artist::Fill { .. } => "fill",
            Artist::Stream { .. } => "streamplot",
            Artist::Contour(_) => "contourf",
            Artist::Colorbar(_) => "colorbar",
            Artist::Text { .. } => "text",
            Artist::Annotation { .. } => "annotation",
            Artist::HLine { .. } => "axhline",
            Artist::VLine { .. } => "axvline",
            Artist::HSpan { .. } => "axhspan",
            Artist::VSpan { .. } => "axvspan",
            Artist::Patch(patch) => match patch {
                Patch::Circle { .. } => "circle",
                Patch::Ellipse { .. } => "ellipse",
                Patch::Rectangle { .. } => "rectangle",
                Patch::Arc { .. } => "arc",
                Patch::Wedge { .. } => "wedge",
            },
        }
    }

    /// Legend label, if the artist carries one.
    pub fn label(&self) -> Option<&str> {
        let style = match self {
            Artist::Line { style, .. }
            | Artist::Scatter { style, .. }
            | Artist::Fill { style, .. }
            | Artist::Stream { style, .. }
            | Artist::Text { style, .. }
            | Artist::Annotation { style, .. }
            | Artist::HLine { style, .. }
            | Artist::VLine { style, .. }
            | Artist::HSpan { style, .. }
            | Artist::VSpan { style, .. } => style,
            Artist::Contour(set) => &set.style,
            Artist::Colorbar(_) | Artist::Patch(_) => return None,
        };
        style.get("label").and_then(|v| v.as_str())
    }
}
