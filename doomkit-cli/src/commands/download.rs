//! Download command - fetch and extract the shareware episode.

use std::time::Duration;

use doomkit::AssetService;
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the download command.
pub async fn run(runner: &CliRunner) -> Result<(), CliError> {
    runner.log_startup("download");
    let assets = runner.config().to_asset_config();
    let sources = assets.sources.len();
    let service = AssetService::from_config(assets)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Downloading from {} source(s)...", sources));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let result = service.download().await;
    spinner.finish_and_clear();

    if !result.success {
        return Err(CliError::Download(
            result.error.unwrap_or_else(|| "unknown error".to_string()),
        ));
    }

    if let Some(message) = &result.message {
        println!("{}", message);
    }
    println!("Saved to: {}", service.target().path().display());
    Ok(())
}
