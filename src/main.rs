use clap::Parser;

use tradeloom::cli::{self, output, Cli};
use tradeloom::config::LoggingConfig;
use tradeloom::strategy::Registries;

fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    LoggingConfig::for_environment(cli.debug).init();

    // Programs embedding strategies call `cli::run` with their own registries.
    let registries = Registries::new();

    if let Err(e) = cli::run(&cli, &registries) {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
