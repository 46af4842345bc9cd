use std::io;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use grind_cli::commands::{calendar, export, fetch, heatmap, import, status, summary, tags};
use grind_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref())?;
    tracing::debug!(?config, "loaded configuration");

    let mut stdout = io::stdout();
    match &cli.command {
        Some(Commands::Fetch(args)) => fetch::run(&mut stdout, args, &config)?,
        Some(Commands::Import(args)) => import::run(&mut stdout, args, &config)?,
        Some(Commands::Export { handle }) => {
            export::run(&mut stdout, handle.as_deref(), &config)?;
        }
        Some(Commands::Summary(args)) => summary::run(&mut stdout, args, &config)?,
        Some(Commands::Tags(args)) => tags::run(&mut stdout, args, &config)?,
        Some(Commands::Calendar(args)) => calendar::run(&mut stdout, args, &config)?,
        Some(Commands::Heatmap(args)) => heatmap::run(&mut stdout, args, &config)?,
        Some(Commands::Status) => status::run(&mut stdout, &config)?,
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
