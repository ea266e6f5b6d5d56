//! CLI argument definitions using clap
//!
//! - relay ask "prompt"             # Generate with the default provider
//! - relay ask -P local "prompt"    # Pick a provider
//! - relay providers                # List providers and credential status

use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use relay_core::config::{DEFAULT_RETRY_COUNT, DEFAULT_TEMPERATURE};
use relay_core::{GenerationRequest, Message, ProviderSpec, ResolverConfig, RetryMode};

#[derive(Parser, Debug)]
#[command(name = "relay")]
#[command(about = "Relay - resilient access to LLM chat backends")]
#[command(version)]
pub struct Cli {
    /// Print full diagnostics for failures
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send one prompt and print the reply
    Ask(AskArgs),

    /// List supported providers and whether a credential is configured
    Providers,
}

#[derive(Args, Debug, Clone)]
pub struct AskArgs {
    /// Prompt text
    pub prompt: String,

    /// System instruction sent before the prompt
    #[arg(long, short)]
    pub system: Option<String>,

    /// Provider id (openai, anthropic, google, openrouter, local)
    #[arg(long, short = 'P', env = "RELAY_PROVIDER", default_value = "openai")]
    pub provider: String,

    /// Model name; defaults to the provider's default model
    #[arg(long, short, env = "RELAY_MODEL", default_value = "")]
    pub model: String,

    /// Provider to try once if the primary fails
    #[arg(long, env = "RELAY_FALLBACK_PROVIDER")]
    pub fallback_provider: Option<String>,

    /// Model for the fallback provider
    #[arg(long, env = "RELAY_FALLBACK_MODEL", default_value = "")]
    pub fallback_model: String,

    /// Additional attempts after the first failure
    #[arg(long, env = "RELAY_RETRY_COUNT", default_value_t = DEFAULT_RETRY_COUNT)]
    pub retry_count: u32,

    /// Retry every failure, including ones that cannot succeed on repeat
    #[arg(long)]
    pub retry_all: bool,

    /// Per-attempt timeout in seconds
    #[arg(long, env = "RELAY_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Endpoint override for the primary provider
    #[arg(long, env = "RELAY_BASE_URL")]
    pub base_url: Option<String>,

    /// Sampling temperature
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Print the result and its metadata as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskArgs {
    /// Primary spec built from the flags
    pub fn primary_spec(&self) -> ProviderSpec {
        let spec = self.apply_options(ProviderSpec::new(&self.provider, &self.model));
        match &self.base_url {
            Some(url) => spec.with_base_url(url),
            None => spec,
        }
    }

    /// Fallback spec, when a fallback provider was given
    pub fn fallback_spec(&self) -> Option<ProviderSpec> {
        self.fallback_provider
            .as_ref()
            .map(|provider| self.apply_options(ProviderSpec::new(provider, &self.fallback_model)))
    }

    /// Request sent to the backend
    pub fn request(&self) -> GenerationRequest {
        match &self.system {
            Some(system) => GenerationRequest::messages(vec![
                Message::system(system),
                Message::user(&self.prompt),
            ]),
            None => GenerationRequest::prompt(&self.prompt),
        }
    }

    /// Retry behaviour
    pub fn resolver_config(&self) -> ResolverConfig {
        let mode = if self.retry_all {
            RetryMode::Uniform
        } else {
            RetryMode::Classified
        };
        ResolverConfig::default().with_retry_mode(mode)
    }

    fn apply_options(&self, spec: ProviderSpec) -> ProviderSpec {
        let mut spec = spec
            .with_temperature(self.temperature)
            .with_retry_count(self.retry_count);
        if let Some(max_tokens) = self.max_tokens {
            spec = spec.with_max_tokens(max_tokens);
        }
        if let Some(secs) = self.timeout {
            spec = spec.with_timeout(Duration::from_secs(secs));
        }
        spec
    }
}
