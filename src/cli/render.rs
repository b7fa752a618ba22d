//! Render subcommand: run figure documents through the director.

use clap::Args;
use std::path::PathBuf;

/// Arguments for the render subcommand
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Figure documents, merged in order (later ones override earlier ones)
    #[arg(required = true, value_name = "DOC")]
    pub documents: Vec<PathBuf>,

    /// Style sheet layered beneath the documents (repeatable)
    ///
    /// Style sheets from the config file come first, then these.
    #[arg(short, long, value_name = "PATH")]
    pub style: Vec<PathBuf>,

    /// Save the scene to this file (.json, .yaml or .yml)
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Print the figure summary even when saving
    #[arg(long)]
    pub show: bool,
}

impl RenderArgs {
    /// Whether the summary should be printed.
    pub fn wants_show(&self) -> bool {
        self.show || self.out.is_none()
    }
}
