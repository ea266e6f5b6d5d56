//! Ask command: one generation through the resolver

use anyhow::anyhow;
use colored::Colorize;
use relay_core::{EnvCredentials, FallbackResolver};
use tracing::debug;

use crate::args::AskArgs;

/// Run one prompt and print the reply
pub async fn execute(args: &AskArgs, verbose: bool) -> anyhow::Result<()> {
    let primary = args.primary_spec();
    let fallback = args.fallback_spec();
    debug!(primary = %primary.label(), fallback = ?fallback.as_ref().map(|f| f.label()), "resolving");

    let resolver =
        FallbackResolver::new(EnvCredentials::new()).with_config(&args.resolver_config());

    let result = match resolver
        .resolve_and_generate(&primary, fallback.as_ref(), &args.request())
        .await
    {
        Ok(result) => result,
        Err(err) => {
            if verbose {
                eprintln!("{} {}", "diagnostic:".dimmed(), err);
                if let Some(primary) = &err.primary {
                    eprintln!("{} {}", "primary:".dimmed(), primary);
                }
            }
            return Err(anyhow!(err.user_message()));
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("{}", result.text);
    if let Some(from) = &result.metadata.fallback_from {
        eprintln!(
            "{}",
            format!(
                "answered by {}/{} after {} failed",
                result.metadata.provider, result.metadata.model, from
            )
            .yellow()
        );
    } else if verbose {
        eprintln!(
            "{}",
            format!(
                "{}/{} in {} attempt(s)",
                result.metadata.provider, result.metadata.model, result.metadata.attempts
            )
            .dimmed()
        );
    }
    Ok(())
}
