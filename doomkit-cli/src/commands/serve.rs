//! Serve command - expose status, download and file routes over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use doomkit::{AssetServer, AssetService};
use tracing::{info, warn};

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the serve command until Ctrl-C.
///
/// `listen` overrides `[server] listen` from the config file.
pub async fn run(runner: &CliRunner, listen: Option<SocketAddr>) -> Result<(), CliError> {
    runner.log_startup("serve");
    let addr = listen.unwrap_or(runner.config().server.listen);
    let service = AssetService::from_config(runner.config().to_asset_config())?;
    let dir = service.target().path().to_path_buf();

    let server = AssetServer::start(addr, Arc::new(service))
        .await
        .map_err(CliError::Serve)?;

    println!("Serving DOOM files from {}", dir.display());
    println!("  {}/doom/status", server.url());
    println!("  {}/doom/download  (POST)", server.url());
    println!("  {}/doom/files/<name>", server.url());
    println!();
    println!("Press Ctrl-C to stop.");

    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C, shutting down");
    }

    info!("Shutdown requested");
    server.stop().await;
    Ok(())
}
