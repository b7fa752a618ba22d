//! CLI command definitions for xyplot
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

pub mod keys;
pub mod merge;
pub mod render;

use clap::{Parser, Subcommand};
use keys::KeysArgs;
use merge::MergeArgs;
use render::RenderArgs;

/// Build figures from declarative YAML/JSON documents
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (overrides XYPLOT_CONFIG_PATH)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run figure documents and show or save the result
    Render(RenderArgs),

    /// Print the merged form of several documents
    Merge(MergeArgs),

    /// List the operation keys each configurer accepts
    Keys(KeysArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_render() {
        let cli = Cli::parse_from([
            "xyplot", "-v", "render", "fig.yaml", "extra.yaml", "--style", "dark.yaml", "--out", "fig.json",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.log, "2");
        match cli.command {
            Command::Render(args) => {
                assert_eq!(args.documents, vec![PathBuf::from("fig.yaml"), PathBuf::from("extra.yaml")]);
                assert_eq!(args.style, vec![PathBuf::from("dark.yaml")]);
                assert_eq!(args.out, Some(PathBuf::from("fig.json")));
                assert!(!args.show);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_keys_with_global_log() {
        let cli = Cli::parse_from(["xyplot", "keys", "axes", "--log", "off"]);
        assert_eq!(cli.log, "off");
        assert!(matches!(cli.command, Command::Keys(KeysArgs { target: Some(ref t) }) if t == "axes"));
    }

    #[test]
    fn test_render_requires_document() {
        assert!(Cli::try_parse_from(["xyplot", "render"]).is_err());
    }
}
