//! Config file discovery.
//!
//! Without `--config`, `tradeloom.yaml` is looked up in order:
//! - `./config/tradeloom.yaml`
//! - `~/.tradeloom/tradeloom.yaml`
//! - `/etc/tradeloom/tradeloom.yaml`

use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "tradeloom.yaml";

/// Returns the tradeloom home directory (`~/.tradeloom/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".tradeloom")
}

/// Candidate config locations, highest priority first.
pub fn search_paths() -> Vec<PathBuf> {
    vec![
        PathBuf::from("config").join(CONFIG_FILE_NAME),
        home_dir().join(CONFIG_FILE_NAME),
        PathBuf::from("/etc/tradeloom").join(CONFIG_FILE_NAME),
    ]
}

/// The explicit path if given, otherwise the first existing candidate.
pub fn resolve_config(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    first_existing(&search_paths())
}

fn first_existing(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates.iter().find(|path| path.is_file()).cloned()
}
