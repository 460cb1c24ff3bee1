//! jahiap - parse Jahia site exports.

mod cli;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use jahiap::config::{CONFIG_FILE, JahiapConfig};
use jahiap::logger::set_verbose;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    set_verbose(cli.verbose);

    let config_path = cli.config.clone().unwrap_or_else(|| CONFIG_FILE.into());
    let config = JahiapConfig::load(&config_path, cli.config.is_some())
        .with_context(|| format!("cannot load {}", config_path.display()))?;

    match &cli.command {
        Commands::Parse { args } => cli::parse::run_parse(args, &config),
        Commands::Dump { args } => cli::dump::run_dump(args, &config),
        Commands::GlobalReport { args } => {
            cli::global_report::run_global_report(args, &config).map(|_| ())
        }
    }
}
