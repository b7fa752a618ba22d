//! Top-level document execution.
//!
//! A figure document names up to four region-creation passes plus optional rc
//! overrides and figure settings:
//!
//! ```yaml
//! set_rc: {figure.facecolor: k}
//! subplot:
//!   init: [121, 122]
//!   axes: [{title: left}, {title: right}]
//! set_fig: {width: 10, title: XY PLOT}
//! ```
//!
//! Stages always run in the same order: rc overrides, `axes`, `subplot`,
//! `subplot2grid`, `add_axes`, the container check, `set_fig`. The rc overrides
//! are reverted when the run ends, whether it succeeded or not.

use crate::backend::Backend;
use crate::builder::{AddAxesBuilder, RegionBuilder, Subplot2gridBuilder, SubplotBuilder};
use crate::config::names::{ADD_AXES, AXES, DIRECTOR_KEYS, SET_FIG, SET_RC, SUBPLOT, SUBPLOT2GRID};
use crate::dispatch::{ConfigMap, configure};
use crate::error::{DispatchError, DispatchResult};
use crate::scene::{Figure, TempRc};
use crate::setters::FigureSetter;
use serde_json::Value;
use std::path::Path;
use tracing::info;

/// Runs figure documents and owns the resulting figure.
#[derive(Debug, Default)]
pub struct Director {
    figure: Option<Figure>,
}

impl Director {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a director and execute `document` on it.
    pub fn from_document(document: &Value) -> DispatchResult<Self> {
        let mut director = Self::new();
        director.execute(document)?;
        Ok(director)
    }

    /// Execute one document against the current figure.
    ///
    /// The document is copied; the caller's value is never modified.
    pub fn execute(&mut self, document: &Value) -> DispatchResult<()> {
        let Value::Object(document) = document else {
            return Err(DispatchError::type_mismatch("document", "a mapping", document));
        };
        let mut document = document.clone();

        for key in document.keys() {
            if !DIRECTOR_KEYS.contains(&key.as_str()) {
                return Err(DispatchError::unknown_operation("director", key, DIRECTOR_KEYS));
            }
        }

        let set_rc = section(&mut document, SET_RC)?;
        let set_fig = section(&mut document, SET_FIG)?;
        let passes = [
            (AXES, section(&mut document, AXES)?),
            (SUBPLOT, section(&mut document, SUBPLOT)?),
            (SUBPLOT2GRID, section(&mut document, SUBPLOT2GRID)?),
            (ADD_AXES, section(&mut document, ADD_AXES)?),
        ];

        let _rc = match set_rc {
            Some(overrides) => {
                let guard = TempRc::apply(overrides)?;
                info!(keys = ?guard.keys().collect::<Vec<_>>(), "rc overrides applied");
                Some(guard)
            }
            None => None,
        };

        for (key, config) in passes {
            let Some(config) = config else { continue };
            let figure = self.figure.get_or_insert_with(Figure::new);
            let regions = match key {
                AXES | SUBPLOT => SubplotBuilder.build(figure, config)?,
                SUBPLOT2GRID => Subplot2gridBuilder.build(figure, config)?,
                _ => AddAxesBuilder.build(figure, config)?,
            };
            info!(pass = key, regions = regions.len(), "regions created");
        }

        let figure = self.figure.as_mut().ok_or_else(DispatchError::missing_container)?;

        if let Some(config) = set_fig {
            configure::<FigureSetter>(figure, config)?;
            info!("figure configured");
        }

        Ok(())
    }

    pub fn figure(&self) -> Option<&Figure> {
        self.figure.as_ref()
    }

    pub fn into_figure(self) -> Option<Figure> {
        self.figure
    }

    /// Hand the figure to `backend` for display.
    pub fn show(&self, backend: &mut dyn Backend) -> DispatchResult<()> {
        let figure = self.figure.as_ref().ok_or_else(DispatchError::missing_container)?;
        backend.show(figure)
    }

    /// Hand the figure to `backend` for persisting at `path`.
    pub fn save(&self, backend: &mut dyn Backend, path: &Path) -> DispatchResult<()> {
        let figure = self.figure.as_ref().ok_or_else(DispatchError::missing_container)?;
        backend.save(figure, path)
    }
}

/// Take a top-level section, which must be a mapping.
fn section(document: &mut ConfigMap, key: &str) -> DispatchResult<Option<ConfigMap>> {
    match document.shift_remove(key) {
        None => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(other) => Err(DispatchError::type_mismatch(key, "a mapping", &other)),
    }
}
