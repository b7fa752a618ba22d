//! The figure: the container that owns every axes.

use super::axes::{Axes, Legend, Placement, Text};
use super::rc::{rc_bool, rc_f64, rc_get, rc_str};
use serde::{Deserialize, Serialize};

/// Index of an axes within its figure.
pub type AxesId = usize;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    /// Width in inches.
    pub width: f64,
    /// Height in inches.
    pub height: f64,
    pub dpi: f64,
    pub facecolor: String,
    pub edgecolor: String,
    pub frameon: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suptitle: Option<Text>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    pub axes: Vec<Axes>,
}

impl Figure {
    /// A blank figure with defaults taken from the rc registry.
    pub fn new() -> Self {
        let (width, height) = rc_get("figure.figsize")
            .and_then(|v| serde_json::from_value::<(f64, f64)>(v).ok())
            .unwrap_or((6.4, 4.8));

        Self {
            width,
            height,
            dpi: rc_f64("figure.dpi", 100.0),
            facecolor: rc_str("figure.facecolor", "white"),
            edgecolor: rc_str("figure.edgecolor", "white"),
            frameon: rc_bool("figure.frameon", true),
            alpha: None,
            suptitle: None,
            legend: None,
            axes: Vec::new(),
        }
    }

    /// Id of the axes at `placement`, if one exists.
    pub fn find(&self, placement: &Placement) -> Option<AxesId> {
        self.axes.iter().position(|a| &a.placement == placement)
    }

    /// Attach an axes and return its id.
    ///
    /// If an axes already occupies the same placement, that axes is kept with
    /// its contents and its id is returned; `axes` is dropped.
    pub fn add_axes(&mut self, axes: Axes) -> AxesId {
        match self.find(&axes.placement) {
            Some(id) => id,
            None => {
                self.axes.push(axes);
                self.axes.len() - 1
            }
        }
    }

    pub fn axes_mut(&mut self, id: AxesId) -> Option<&mut Axes> {
        self.axes.get_mut(id)
    }

    /// Size in pixels, rounded.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.width * self.dpi).round().max(0.0) as u32,
            (self.height * self.dpi).round().max(0.0) as u32,
        )
    }
}

impl Default for Figure {
    fn default() -> Self {
        Self::new()
    }
}
