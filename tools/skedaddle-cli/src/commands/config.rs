//! Manage the configuration file.

use skedaddle_common::config::{config_file_path, AppConfig};

/// Write the built-in defaults to the config file.
pub fn init(force: bool) -> anyhow::Result<()> {
    let path = config_file_path();
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (pass --force to overwrite)",
            path.display()
        );
    }

    let path = AppConfig::default().save()?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

/// Print the config file location and the settings in effect.
pub fn show(config: &AppConfig) -> anyhow::Result<()> {
    let path = config_file_path();
    let state = if path.exists() { "" } else { " (not found, using defaults)" };
    println!("Config file: {}{state}", path.display());
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
