//! CLI commands

pub mod ask;
pub mod providers;
