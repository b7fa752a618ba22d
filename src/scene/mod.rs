//! In-memory plotting scene.
//!
//! The scene records what a document asked for: a [`Figure`] owning its
//! [`Axes`], each axes owning its [`Artist`]s. Nothing here rasterises; a
//! [`crate::backend::Backend`] decides what to do with a finished figure.

pub mod artist;
pub mod axes;
pub mod colormap;
pub mod figure;
pub mod rc;

pub use artist::{Artist, Colorbar, ContourSet, Field, Patch};
pub use axes::{Aspect, AxisLine, Axes, Grid, Legend, Limits, Placement, Spine, Spines, Text};
pub use colormap::{Colormap, ColormapKind};
pub use figure::{AxesId, Figure};
pub use rc::TempRc;
