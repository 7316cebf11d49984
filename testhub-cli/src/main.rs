//! Terminal test hub for the data grid and the mock services.

use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use testhub_cli::logging::init_logging;

mod cli;
mod commands;

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match init_logging(cli.global.verbose) {
        Ok(Some(path)) => info!("logging to {}", path.display()),
        Ok(None) => {}
        Err(e) => eprintln!("warning: logging disabled: {:#}", e),
    }

    let result = match &cli.command {
        Command::Users(args) => commands::run_users(&cli.global, args).await,
        Command::Posts(args) => commands::run_posts(&cli.global, args).await,
        Command::Feed(args) => commands::run_feed(&cli.global, args).await,
        Command::Like(args) => commands::run_like(&cli.global, args).await,
        Command::Stats => commands::run_stats(&cli.global).await,
        Command::CreateUser(args) => commands::run_create_user(&cli.global, args).await,
        Command::Network(args) => commands::run_network(&cli.global, args).await,
        Command::Server(args) => commands::run_server(&cli.global, args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
