//! Status command - report which game files are present.

use doomkit::{AssetService, CanonicalRole};

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the status command.
pub fn run(runner: &CliRunner) -> Result<(), CliError> {
    let service = AssetService::from_config(runner.config().to_asset_config())?;
    let report = service.status();

    println!("Config:    {}", runner.config_path().display());
    println!("Directory: {}", report.directory.display());
    println!();
    for role in CanonicalRole::ALL {
        let mark = if report.has(role) { "present" } else { "missing" };
        let note = if role.is_required() { "" } else { " (optional)" };
        println!("  {:<10} {}{}", role.file_name(), mark, note);
    }
    println!();

    if let Some(error) = &report.error {
        println!("Could not inspect directory: {}", error);
    } else if report.is_playable() {
        println!("Ready to play.");
    } else {
        println!("Game files missing. Run `doomkit download` to fetch them.");
    }
    Ok(())
}
