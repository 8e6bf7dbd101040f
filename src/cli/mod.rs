//! Command-line interface definitions.
//!
//! The binary only knows the registries it is handed. Programs that ship
//! strategy implementations register them and call [`run`] themselves.

pub mod inspect;
pub mod output;
pub mod paths;

use std::path::PathBuf;

use anyhow::anyhow;
use clap::{Args, Parser, Subcommand};

use crate::strategy::Registries;
use output::OutputConfig;

/// Tradeloom - trading bot configuration loader.
#[derive(Parser, Debug)]
#[command(name = "tradeloom")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file [default: first tradeloom.yaml in ./config, ~/.tradeloom, /etc/tradeloom]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load the config and resolve every strategy block
    ///
    /// The standalone binary registers no strategies, so any document with a
    /// strategy section fails with "no strategy type is registered". Programs
    /// that register strategies get a full check by calling `cli::run`.
    Check(CheckArgs),

    /// Read the fixed config sections only, skipping strategy blocks
    Preload,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Fail on strategy keys that are not registered
    #[arg(long)]
    pub strict: bool,
}

/// Execute the parsed command line.
pub fn run(cli: &Cli, registries: &Registries) -> anyhow::Result<()> {
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    let path = paths::resolve_config(cli.config.as_deref()).ok_or_else(|| {
        let searched: Vec<_> = paths::search_paths()
            .iter()
            .map(|path| path.display().to_string())
            .collect();
        anyhow!("no config file found, searched: {}", searched.join(", "))
    })?;

    match &cli.command {
        Commands::Check(args) => inspect::execute_check(&path, registries, args.strict),
        Commands::Preload => inspect::execute_preload(&path),
    }
}
