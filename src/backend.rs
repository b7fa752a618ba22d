//! Rendering backends.
//!
//! The engine only builds a scene; a backend decides what showing or saving a
//! finished [`Figure`] means.

use crate::error::{DispatchError, DispatchResult};
use crate::format::{self, OutputFormat};
use crate::scene::Figure;
use std::io::Write;
use std::path::Path;
use tracing::info;

pub trait Backend {
    /// Display the figure.
    fn show(&mut self, figure: &Figure) -> DispatchResult<()>;

    /// Persist the figure to `path`.
    fn save(&mut self, figure: &Figure, path: &Path) -> DispatchResult<()>;
}

/// Backend that prints a text summary and saves the scene as JSON or YAML.
pub struct SceneBackend<W: Write> {
    out: W,
    default_format: OutputFormat,
    pretty: bool,
}

impl SceneBackend<std::io::Stdout> {
    pub fn stdout(default_format: OutputFormat, pretty: bool) -> Self {
        Self::new(std::io::stdout(), default_format, pretty)
    }
}

impl<W: Write> SceneBackend<W> {
    pub fn new(out: W, default_format: OutputFormat, pretty: bool) -> Self {
        Self { out, default_format, pretty }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Backend for SceneBackend<W> {
    fn show(&mut self, figure: &Figure) -> DispatchResult<()> {
        self.out.write_all(format::format_figure(figure).as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    fn save(&mut self, figure: &Figure, path: &Path) -> DispatchResult<()> {
        let format = OutputFormat::from_path(path).unwrap_or(self.default_format);
        let content = format::to_string(figure, format, self.pretty)?;
        std::fs::write(path, content)
            .map_err(|e| DispatchError::backend(format!("failed to write {}: {}", path.display(), e)))?;
        info!(path = %path.display(), ?format, "figure saved");
        Ok(())
    }
}
