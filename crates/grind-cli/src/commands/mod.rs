//! CLI subcommand implementations.

pub mod calendar;
pub mod export;
pub mod fetch;
pub mod heatmap;
pub mod import;
pub mod status;
pub mod summary;
pub mod tags;
pub mod util;
