//! Config command implementations

use std::path::Path;

use anyhow::Result;
use finsync_core::config::{default_config_path, resolved_config_path};

use super::load_settings;

pub fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let config = load_settings(config_path)?;
    print!("{}", config.to_toml()?);
    Ok(())
}

pub fn cmd_config_path(config_path: Option<&Path>) -> Result<()> {
    match resolved_config_path(config_path)? {
        Some(path) => println!("Using: {}", path.display()),
        None => println!("Using: built-in defaults"),
    }

    if let Some(path) = default_config_path() {
        println!("Override location: {}", path.display());
    }

    Ok(())
}
