//! Where the config file lives, and seeding it on first run.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use pairline_common::ConfigError;
use tracing::{debug, info};

use super::template::default_config_toml;

const APP_DIR: &str = "pairline";
const CONFIG_FILE: &str = "config.toml";

/// `<config_dir>/pairline/config.toml` for the current platform.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
        .ok_or_else(|| ConfigError::ParseError("no platform config directory".into()))
}

/// Seed `path` with the commented template.
///
/// An existing file is left alone, so a config written by another process
/// between the lookup and this call is never clobbered.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    let io_err = |action: &str, target: &Path, e: std::io::Error| {
        ConfigError::ParseError(format!("{action} {}: {e}", target.display()))
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err("cannot create", parent, e))?;
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            debug!("config already present at {}, keeping it", path.display());
            return Ok(());
        }
        Err(e) => return Err(io_err("cannot create", path, e)),
    };
    file.write_all(default_config_toml().as_bytes())
        .map_err(|e| io_err("cannot write", path, e))?;

    info!("created default config at {}", path.display());
    Ok(())
}
