//! `pager`: lists Rick and Morty API collections page by page.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pager_logging::{pager_error, LogDestination};

mod app;
mod cli;
mod config;

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let destination = if cli.log_file {
        LogDestination::Both(PathBuf::from("."))
    } else {
        LogDestination::Terminal
    };
    pager_logging::initialize(destination, cli.log_level());

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(config::CONFIG_FILENAME));
    let config = config::load(&config_path);

    let result = match &cli.command {
        Command::List(args) => app::list(&config, args, &mut io::stdout()).await,
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            pager_error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
