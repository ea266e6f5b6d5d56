//! Relay CLI
//!
//! Sends one prompt through the provider resolution layer and prints the
//! reply.
//!
//! ```bash
//! relay ask "Summarize RFC 9110" --provider openai --fallback-provider local
//! relay providers
//! ```
//!
//! Set `RUST_LOG=relay_core=debug` to watch retries and fallbacks.

mod args;
mod commands;
mod router;

use std::process::ExitCode;

use args::Cli;
use clap::Parser;
use colored::Colorize;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging with environment-based filtering
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match router::route(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}
