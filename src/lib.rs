//! Data consistency checks for multi-level healthcare facility location models.
#![warn(missing_docs)]
use std::path::PathBuf;

pub mod check;
pub mod cli;
pub mod id;
pub mod input;
pub mod keys;
pub mod level;
pub mod log;
pub mod model;
pub mod report;
pub mod settings;
pub mod units;

#[cfg(test)]
mod fixture;

/// Get the directory where program configuration is stored
pub fn get_config_dir() -> PathBuf {
    let Some(mut config_dir) = dirs::config_dir() else {
        // No config dir on this platform, so use the current directory instead
        return PathBuf::new();
    };
    config_dir.push("facloc");

    config_dir
}
