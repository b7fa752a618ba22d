//! Configuration documents and application settings.
//!
//! Figure documents are loaded from YAML or JSON and layered with the strict
//! [`deep_merge`]. The tool's own settings come from three tiers:
//! 1. **Defaults** - built in
//! 2. **Project** - `./xyplot.yaml`
//! 3. **User** - `~/.xyplot/config.yaml`
//!
//! ## Environment Variables
//! - `XYPLOT_CONFIG_PATH` - Explicit config file (overrides all)

mod loader;
mod merge;
pub mod names;
mod types;

pub use loader::{CONFIG_PATH_ENV, ConfigLoader, ConfigPaths, ConfigTier, LoadError, load_document, load_documents};
pub use merge::{deep_merge, deep_merge_all, merge_layers, overlay};
pub use types::{AppConfig, OutputConfig};
