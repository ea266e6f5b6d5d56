//! Fallback resolution
//!
//! Top-level entry point: resolve a primary spec, run it with retries, and
//! hand at most one failure over to an alternate spec.

mod config;
mod resolver;


pub use config::ResolverConfig;
pub use resolver::FallbackResolver;
