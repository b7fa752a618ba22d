//! Merge subcommand: print layered documents as one.

use crate::format::OutputFormat;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the merge subcommand
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Documents to merge, lowest priority first
    #[arg(required = true, value_name = "DOC")]
    pub documents: Vec<PathBuf>,

    /// Output format: json or yaml (default from config)
    #[arg(short, long, value_parser = parse_format)]
    pub format: Option<OutputFormat>,
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    OutputFormat::from_str(s).ok_or_else(|| format!("unknown format {:?}, expected json or yaml", s))
}
