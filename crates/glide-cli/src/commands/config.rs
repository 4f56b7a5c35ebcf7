use std::path::Path;

use anyhow::{bail, Result};

use glide_core::AppConfig;

/// Print the effective configuration as TOML
pub fn show(config: &AppConfig) -> Result<()> {
    print!("{}", config.to_toml_string()?);
    Ok(())
}

/// Write the default configuration to `path`
pub fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    AppConfig::default().save_to(path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
