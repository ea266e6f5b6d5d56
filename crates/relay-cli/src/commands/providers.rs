//! Providers command: registry listing with credential status

use colored::{ColoredString, Colorize};
use relay_core::config::credential_env_vars;
use relay_core::{CredentialSource, EnvCredentials, ProviderRegistry};

/// Print every supported provider and whether it is usable right now
pub fn show_providers() -> anyhow::Result<()> {
    let registry = ProviderRegistry::new();
    let credentials = EnvCredentials::new();

    println!();
    println!("{}", "Supported Providers".bold().underline());
    println!();

    for id in registry.list_providers() {
        let info = registry.lookup(id)?;
        let has_key = credentials.credential(info.provider).is_some();
        println!(
            "  {} {:<12} {:<32} {}",
            status_icon(has_key, info.requires_api_key),
            id.bold(),
            info.default_model,
            info.api_base_url.dimmed()
        );
        if info.requires_api_key && !has_key {
            println!(
                "      {} {}",
                "set".dimmed(),
                credential_env_vars(info.provider).join(" or ").dimmed()
            );
        }
    }
    println!();
    Ok(())
}

fn status_icon(has_key: bool, requires_key: bool) -> ColoredString {
    match (has_key, requires_key) {
        (true, _) => "✓".green().bold(),
        (false, false) => "○".cyan().bold(),
        (false, true) => "✗".red().bold(),
    }
}
