//! Pinata CLI
//!
//! Saves and resumes human-vs-engine games as PGN session files.

mod cli;
mod commands;
mod config;
mod play;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::Config;

fn main() -> ExitCode {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Logs go to stderr, quiet unless RUST_LOG says otherwise
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    match commands::run(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
