//! Command routing

use crate::args::{Cli, Commands};
use crate::commands;

/// Route CLI commands to their handlers
pub async fn route(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Ask(args) => commands::ask::execute(&args, cli.verbose).await,
        Commands::Providers => commands::providers::show_providers(),
    }
}
