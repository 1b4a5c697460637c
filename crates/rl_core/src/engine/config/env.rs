use super::ControlConfig;
use crate::error::Result;
use std::{env, fs};

pub const CONTROL_CONFIG_PATH_ENV: &str = "RL_CONTROL_CONFIG_PATH";

/// Loads the config file named by `RL_CONTROL_CONFIG_PATH`.
///
/// Unset or blank means defaults. A file that is present but unreadable,
/// malformed or invalid is an error.
pub fn load_from_env() -> Result<ControlConfig> {
    let Ok(path) = env::var(CONTROL_CONFIG_PATH_ENV) else {
        return Ok(ControlConfig::default());
    };
    load_from_path(path.trim())
}

pub(crate) fn load_from_path(path: &str) -> Result<ControlConfig> {
    if path.is_empty() {
        return Ok(ControlConfig::default());
    }

    let content = fs::read_to_string(path)?;
    let config = ControlConfig::from_json(&content)?;
    config.validate()?;

    log::info!("Loaded control config from {CONTROL_CONFIG_PATH_ENV}='{path}'");
    Ok(config)
}
