//! Subcommand implementations.

pub mod batch;
pub mod config;
pub mod output;
pub mod process;

use std::path::Path;

use tracing::debug;

use certscan_core::models::config::CertScanConfig;

/// Load the configuration from `path`, the default config file, or defaults.
pub fn load_config(path: Option<&str>) -> anyhow::Result<CertScanConfig> {
    if let Some(path) = path {
        return Ok(CertScanConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Loading configuration from {}", default_path.display());
        return Ok(CertScanConfig::from_file(&default_path)?);
    }

    Ok(CertScanConfig::default())
}
