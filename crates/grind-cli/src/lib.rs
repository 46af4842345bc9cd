//! Submission analytics CLI.
//!
//! This crate provides the `grind` binary: fetching and caching a judge
//! handle's submission history, and rendering the derived dashboard views.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;
