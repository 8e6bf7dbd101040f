//! `check` and `preload` commands.

use std::path::Path;

use anyhow::Context;

use super::output;
use crate::config::{Config, LoadOptions};
use crate::strategy::Registries;

/// Load the config with strategy resolution and print what was found.
pub fn execute_check(path: &Path, registries: &Registries, strict: bool) -> anyhow::Result<()> {
    let options = if strict {
        LoadOptions::strict()
    } else {
        LoadOptions::default()
    };
    let config = Config::load_with(path, registries, options)
        .with_context(|| format!("failed to load {}", path.display()))?;

    output::section("Configuration Check");
    output::field("Config", path.display());
    output::success("Configuration file is valid");

    print_summary(&config);

    output::section("Strategies");
    output::field("Registered", registered_label(registries));
    for mount in &config.exchange_strategies {
        output::field(mount.strategy.id(), mount_label(&mount.mounts));
        for session in undefined_sessions(&config, &mount.mounts) {
            output::warning(&format!(
                "{} is mounted on undefined session '{session}'",
                mount.strategy.id()
            ));
        }
    }
    for strategy in &config.cross_exchange_strategies {
        output::field(strategy.id(), "cross-exchange");
    }

    output::success("Configuration check complete");
    Ok(())
}

/// Decode the fixed sections only and print what was found.
pub fn execute_preload(path: &Path) -> anyhow::Result<()> {
    let config =
        Config::preload(path).with_context(|| format!("failed to preload {}", path.display()))?;

    output::section("Configuration Preload");
    output::field("Config", path.display());
    print_summary(&config);

    Ok(())
}

fn print_summary(config: &Config) {
    output::section("Summary");

    let sessions: Vec<_> = config.sessions.keys().map(String::as_str).collect();
    output::field("Sessions", list_label(&sessions));
    output::field("Imports", config.imports.len());
    output::field("PnL reports", config.pnl_reporters.len());

    if let Some(backtest) = &config.backtest {
        output::field(
            "Backtest",
            format!("{} → {}", backtest.start_time, backtest.end_time),
        );
    }
    if config.notifications.is_some() {
        output::field("Notifications", "configured");
    }
    if config.risk_controls.is_some() {
        output::field("Risk controls", "configured");
    }
}

fn registered_label(registries: &Registries) -> String {
    format!(
        "{} single-exchange, {} cross-exchange",
        registries.single.len(),
        registries.cross.len()
    )
}

fn mount_label(mounts: &[String]) -> String {
    if mounts.is_empty() {
        "not mounted".to_string()
    } else {
        format!("on {}", mounts.join(", "))
    }
}

fn list_label(items: &[&str]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

fn undefined_sessions<'a>(config: &Config, mounts: &'a [String]) -> Vec<&'a str> {
    mounts
        .iter()
        .filter(|mount| config.session(mount).is_none())
        .map(String::as_str)
        .collect()
}
