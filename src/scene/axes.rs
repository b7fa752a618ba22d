//! A plotting region and its decorations.

use super::artist::Artist;
use super::rc::{rc_bool, rc_str};
use crate::dispatch::ConfigMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where an axes sits inside its figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placement {
    /// One cell of a regular grid; `index` is 1-based, row-major.
    Grid { rows: u32, cols: u32, index: u32 },
    /// A block of cells; `row`/`col` are 0-based.
    Span {
        rows: u32,
        cols: u32,
        row: u32,
        col: u32,
        rowspan: u32,
        colspan: u32,
    },
    /// Figure-relative rectangle.
    Rect {
        left: f64,
        bottom: f64,
        width: f64,
        height: f64,
    },
    /// Attached to another element (colour bars).
    Inset,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub text: String,
    #[serde(skip_serializing_if = "ConfigMap::is_empty", default)]
    pub style: ConfigMap,
}

impl Text {
    pub fn new(text: impl Into<String>, style: ConfigMap) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Limits {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aspect {
    Auto,
    Equal,
    Ratio(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub visible: bool,
    pub which: String,
    pub axis: String,
    #[serde(skip_serializing_if = "ConfigMap::is_empty", default)]
    pub style: ConfigMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub loc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "ConfigMap::is_empty", default)]
    pub style: ConfigMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spine {
    pub visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Value>,
    pub color: String,
    pub linestyle: String,
}

impl Spine {
    fn from_rc() -> Self {
        Self {
            visible: true,
            position: None,
            color: rc_str("axes.edgecolor", "black"),
            linestyle: "solid".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spines {
    pub top: Spine,
    pub bottom: Spine,
    pub left: Spine,
    pub right: Spine,
}

impl Spines {
    fn from_rc() -> Self {
        Self {
            top: Spine::from_rc(),
            bottom: Spine::from_rc(),
            left: Spine::from_rc(),
            right: Spine::from_rc(),
        }
    }
}

/// The x or y axis line: ticks and label placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLine {
    pub inverted: bool,
    pub ticks_position: String,
    pub label_position: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_coords: Option<(f64, f64)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_text: Option<String>,
    pub tick_color: String,
    #[serde(skip_serializing_if = "ConfigMap::is_empty", default)]
    pub tick_params: ConfigMap,
}

impl AxisLine {
    fn x_from_rc() -> Self {
        Self {
            inverted: false,
            ticks_position: "bottom".to_string(),
            label_position: "bottom".to_string(),
            label_coords: None,
            label_text: None,
            tick_color: rc_str("xtick.color", "black"),
            tick_params: ConfigMap::new(),
        }
    }

    fn y_from_rc() -> Self {
        Self {
            inverted: false,
            ticks_position: "left".to_string(),
            label_position: "left".to_string(),
            label_coords: None,
            label_text: None,
            tick_color: rc_str("ytick.color", "black"),
            tick_params: ConfigMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axes {
    pub placement: Placement,
    pub facecolor: String,
    pub label_color: String,
    pub title_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Text>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xlabel: Option<Text>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ylabel: Option<Text>,
    pub xlim: Limits,
    pub ylim: Limits,
    pub aspect: Aspect,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<Grid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    pub spines: Spines,
    pub xaxis: AxisLine,
    pub yaxis: AxisLine,
    pub artists: Vec<Artist>,
}

impl Axes {
    /// A fresh axes with defaults taken from the rc registry.
    pub fn new(placement: Placement) -> Self {
        let grid = rc_bool("axes.grid", false).then(|| Grid {
            visible: true,
            which: "major".to_string(),
            axis: "both".to_string(),
            style: ConfigMap::new(),
        });
        let label_color = rc_str("axes.labelcolor", "black");
        let title_color = match rc_str("axes.titlecolor", "auto").as_str() {
            "auto" => label_color.clone(),
            color => color.to_string(),
        };

        Self {
            placement,
            facecolor: rc_str("axes.facecolor", "white"),
            label_color,
            title_color,
            title: None,
            xlabel: None,
            ylabel: None,
            xlim: Limits::default(),
            ylim: Limits::default(),
            aspect: Aspect::Auto,
            grid,
            legend: None,
            spines: Spines::from_rc(),
            xaxis: AxisLine::x_from_rc(),
            yaxis: AxisLine::y_from_rc(),
            artists: Vec::new(),
        }
    }

    /// Labels of all artists that carry one, in drawing order.
    pub fn handles(&self) -> Vec<String> {
        self.artists
            .iter()
            .filter_map(|a| a.label().map(String::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_axes_is_empty() {
        let axes = Axes::new(Placement::Grid { rows: 1, cols: 1, index: 1 });
        assert!(axes.artists.is_empty());
        assert!(axes.title.is_none());
        assert_eq!(axes.aspect, Aspect::Auto);
        assert_eq!(axes.xaxis.ticks_position, "bottom");
        assert_eq!(axes.yaxis.label_position, "left");
        assert!(axes.spines.top.visible);
    }

    #[test]
    fn test_placement_serializes_tagged() {
        let value = serde_json::to_value(Placement::Rect {
            left: 0.1,
            bottom: 0.1,
            width: 0.4,
            height: 0.4,
        })
        .unwrap();
        assert_eq!(value["kind"], "rect");
    }
}
