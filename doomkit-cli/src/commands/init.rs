//! Init command - write the default configuration file.

use std::path::Path;

use doomkit::config::ConfigFile;

use crate::error::CliError;

/// Run the init command.
///
/// An existing file is left alone unless `force` is set.
pub fn run(config_path: &Path, force: bool) -> Result<(), CliError> {
    if config_path.exists() && !force {
        println!("Configuration file already exists: {}", config_path.display());
        println!("Use --force to overwrite it with defaults.");
        return Ok(());
    }

    ConfigFile::default().save_to(config_path)?;

    println!("Configuration file: {}", config_path.display());
    println!();
    println!("Edit this file to change the download sources or game directory.");
    Ok(())
}
