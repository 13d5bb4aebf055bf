//! Subcommand implementations.

pub mod batch;
pub mod categorize;
pub mod config;
pub mod process;

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use slipscan_core::models::config::SlipscanConfig;
use tracing::debug;

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    SlipscanConfig::default_path(&base)
}

/// Resolve the configuration file: the explicit path if given, else the default one.
pub fn config_file(config_path: Option<&str>) -> PathBuf {
    config_path.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load configuration.
///
/// An explicit path must exist. The default location is optional and
/// falls back to built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<SlipscanConfig> {
    if let Some(path) = config_path {
        let path = Path::new(path);
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        return Ok(SlipscanConfig::from_file(path)?);
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Loading config from {}", path.display());
        Ok(SlipscanConfig::from_file(&path)?)
    } else {
        Ok(SlipscanConfig::default())
    }
}

/// Read an input file, refusing anything over the configured size.
pub fn read_input(path: &Path, config: &SlipscanConfig) -> anyhow::Result<Vec<u8>> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let size = fs::metadata(path)?.len();
    if size > config.source.max_file_bytes {
        anyhow::bail!(
            "{} is {} bytes, larger than the {} byte limit",
            path.display(),
            size,
            config.source.max_file_bytes
        );
    }

    Ok(fs::read(path)?)
}

/// Read at most `limit` bytes from `reader`, failing if there is more.
pub fn read_limited<R: Read>(reader: R, limit: u64, name: &str) -> anyhow::Result<Vec<u8>> {
    let mut data = Vec::new();
    reader.take(limit.saturating_add(1)).read_to_end(&mut data)?;

    if data.len() as u64 > limit {
        anyhow::bail!("{} is larger than the {} byte limit", name, limit);
    }

    Ok(data)
}
