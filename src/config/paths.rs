use std::path::{Path, PathBuf};

use tracing::debug;

use crate::types::ConfigError;

const APP_DIR: &str = "stsync";
const CONFIG_FILE: &str = "config.json";

/// Pick the config file: explicit path (with `~/` expanded) or
/// `<config dir>/stsync/config.json`.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit {
        let expanded = expand_home(path);
        debug!(path = %expanded.display(), "Using explicit config path");
        return Ok(expanded);
    }

    let path = dirs::config_dir()
        .ok_or(ConfigError::NoConfigDir)?
        .join(APP_DIR)
        .join(CONFIG_FILE);
    debug!(path = %path.display(), "Using default config path");
    Ok(path)
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
