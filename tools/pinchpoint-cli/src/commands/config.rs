//! Create or print the configuration file.

use std::path::PathBuf;

use pinchpoint_common::config::{config_file_path, AppConfig};

pub fn init(path: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let path = path.unwrap_or_else(config_file_path);
    if path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    AppConfig::default()
        .save_to(&path)
        .map_err(|e| anyhow::anyhow!("Failed to write config: {e}"))?;
    println!("Default configuration written to: {}", path.display());
    Ok(())
}

pub fn show(config: &AppConfig) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
