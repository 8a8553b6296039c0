//! Configuration commands

use std::path::Path;

use anyhow::Result;
use pennywise_core::config::default_config_path;

use super::core::load_config;

pub fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    print!("{}", config.to_toml()?);
    Ok(())
}

pub fn cmd_config_path() -> Result<()> {
    match default_config_path() {
        Some(path) => {
            let status = if path.exists() { "present" } else { "not created" };
            println!("{} ({})", path.display(), status);
        }
        None => println!("No data directory available on this platform"),
    }
    Ok(())
}
