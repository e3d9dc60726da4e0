//! doomkit CLI - Command-line interface
//!
//! Fetches the DOOM shareware files, reports their status and serves them to
//! the browser emulator.

mod commands;
mod error;
mod runner;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use doomkit::config::config_file_path;

use error::CliError;
use runner::CliRunner;

#[derive(Parser)]
#[command(name = "doomkit")]
#[command(version, about = "Fetch and serve the DOOM shareware episode", long_about = None)]
struct Cli {
    /// Path to the configuration file (default: ~/.doomkit/config.ini)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which game files are present
    Status,

    /// Download and extract the shareware game files
    Download,

    /// Serve status, download and file routes over HTTP
    Serve {
        /// Address to listen on (overrides [server] listen)
        #[arg(long, value_name = "ADDR")]
        listen: Option<SocketAddr>,
    },

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    if let Commands::Init { force } = cli.command {
        let path = cli.config.unwrap_or_else(config_file_path);
        return commands::init::run(&path, force);
    }

    let runner = CliRunner::new(cli.config.as_deref(), cli.verbose)?;

    match cli.command {
        Commands::Status => commands::status::run(&runner),
        Commands::Download => commands::download::run(&runner).await,
        Commands::Serve { listen } => commands::serve::run(&runner, listen).await,
        Commands::Init { .. } => Ok(()),
    }
}
