//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod extract;
pub mod journal;

use std::path::{Path, PathBuf};

use achat_core::AchatConfig;
use tracing::debug;

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("achat")
        .join("config.json")
}

/// Configuration file in use: the `--config` path or the default location.
pub fn config_file(config_path: Option<&str>) -> PathBuf {
    config_path.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load the configuration.
///
/// An explicit `--config` file must exist; the default file is optional.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<AchatConfig> {
    if let Some(path) = config_path {
        return Ok(AchatConfig::from_file(Path::new(path))?);
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Loading configuration from {}", path.display());
        Ok(AchatConfig::from_file(&path)?)
    } else {
        Ok(AchatConfig::default())
    }
}
