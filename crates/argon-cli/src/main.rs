mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::error::Result;
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {e}");
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    info!("🚀 argon v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let command_result = match cli.command {
        Commands::Minimize(args) => {
            info!("Dispatching to 'minimize' command.");
            commands::minimize::run(args)
        }
        Commands::Dynamics(args) => {
            info!("Dispatching to 'dynamics' command.");
            commands::dynamics::run(args)
        }
        Commands::Align(args) => {
            info!("Dispatching to 'align' command.");
            commands::align::run(args)
        }
    };

    match &command_result {
        Ok(_) => {
            info!("✅ Command completed successfully.");
            println!("✅ Command completed successfully.");
        }
        Err(e) => {
            error!("❌ Command failed: {e}");
            eprintln!("❌ Command failed: {e}");
        }
    }

    command_result
}
