//! Keys subcommand: list binding tables.

use clap::Args;

/// Arguments for the keys subcommand
#[derive(Args, Debug)]
pub struct KeysArgs {
    /// Only show this configurer (figure, axes, axis, spines, ...)
    pub target: Option<String>,
}
