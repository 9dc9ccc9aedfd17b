pub mod auth;
pub mod capture;
pub mod classifier;
pub mod cli;
mod commands;
pub mod config;
pub mod encoder;
mod error;
pub mod history;
pub mod labels;
pub mod presenter;
pub mod prompt;
pub mod session;
pub mod storage;

pub use error::{Result, SkinScanError};
pub use history::{HistoryStore, ScanRecord};
pub use session::{ScanSession, ScanState};

use std::process::ExitCode;

use clap::Parser;

pub fn run() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(commands::dispatch(cli)) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
