//! Hueshift - contrast-aware hue shifting for site images.

mod cli;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use hueshift::config::Config;
use hueshift::log;
use std::path::Path;

fn main() {
    if let Err(err) = run() {
        log!("error"; "{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    if let Commands::Recolor { args } = &cli.command {
        hueshift::logger::set_verbose(args.verbose);
    }

    match &cli.command {
        Commands::Contrast {
            foreground,
            background,
        } => {
            cli::inspect::show_contrast(*foreground, *background);
            Ok(())
        }
        Commands::Shift {
            dominant,
            background,
            search,
        } => {
            let mut config = load_config(cli.config.as_deref())?;
            search.apply(&mut config.recolor);
            config.validate()?;
            let background = background.unwrap_or(config.recolor.background);
            cli::inspect::show_shift(*dominant, background, &config.recolor.search_params());
            Ok(())
        }
        Commands::Recolor { args } => {
            let mut config = load_config(cli.config.as_deref())?;
            args.apply(&mut config);
            config.validate()?;
            cli::recolor::recolor_images(&args.paths, &config, args.dry)
        }
    }
}

/// Only commands that read `[recolor]` or `[output]` load the config.
fn load_config(path: Option<&Path>) -> Result<Config> {
    Config::load(path).with_context(|| match path {
        Some(path) => format!("failed to load {}", path.display()),
        None => "failed to load config".to_string(),
    })
}
