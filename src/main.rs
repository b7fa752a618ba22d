//! xyplot command-line entry point.

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, info};
use xyplot::backend::SceneBackend;
use xyplot::cli::keys::KeysArgs;
use xyplot::cli::merge::MergeArgs;
use xyplot::cli::render::RenderArgs;
use xyplot::cli::{Cli, Command};
use xyplot::config::{AppConfig, CONFIG_PATH_ENV, ConfigLoader, load_documents};
use xyplot::director::Director;
use xyplot::logging::{LogOutput, init_logging};
use xyplot::{format, setters};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&LogOutput::parse(&cli.log), cli.verbose)?;

    // If explicit config path given, set it as env var for ConfigLoader to pick up
    // SAFETY: This is safe at program startup before any other threads are spawned
    if let Some(config_path) = &cli.config {
        unsafe {
            std::env::set_var(CONFIG_PATH_ENV, config_path);
        }
    }
    let loader = ConfigLoader::load().context("failed to load configuration")?;
    for (tier, path) in loader.sources() {
        debug!(%tier, path = %path.display(), "config source");
    }
    let config = loader.into_config();

    match cli.command {
        Command::Render(args) => render(&config, args),
        Command::Merge(args) => merge(&config, args),
        Command::Keys(args) => keys(args),
    }
}

fn render(config: &AppConfig, args: RenderArgs) -> Result<()> {
    let layers: Vec<PathBuf> = config
        .style_sheets
        .iter()
        .chain(&args.style)
        .chain(&args.documents)
        .cloned()
        .collect();
    let document = load_documents(&layers)?;
    info!(layers = layers.len(), "document loaded");

    let director = Director::from_document(&Value::Object(document))?;
    let mut backend = SceneBackend::stdout(config.output.format, config.output.pretty);
    if let Some(ref out) = args.out {
        director.save(&mut backend, out)?;
    }
    if args.wants_show() {
        director.show(&mut backend)?;
    }
    Ok(())
}

fn merge(config: &AppConfig, args: MergeArgs) -> Result<()> {
    let document = load_documents(&args.documents)?;
    let format = args.format.unwrap_or(config.output.format);
    println!("{}", format::to_string(&Value::Object(document), format, config.output.pretty)?);
    Ok(())
}

fn keys(args: KeysArgs) -> Result<()> {
    let catalog = setters::catalog();
    if let Some(ref target) = args.target {
        if !catalog.iter().any(|(kind, _, _)| kind == target) {
            let kinds: Vec<&str> = catalog.iter().map(|(kind, _, _)| *kind).collect();
            bail!("unknown configurer {:?}; expected one of {}", target, kinds.join(", "));
        }
    }
    print!("{}", format::format_catalog(&catalog, args.target.as_deref()));
    Ok(())
}
