use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod document;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("atomtree=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = cli.format;

    match cli.command {
        Commands::Walkthrough => commands::walkthrough::run(format),
        Commands::Contend(args) => commands::contend::run(&args, format),
        Commands::GetIn(args) => commands::query::get_in(&args, format),
        Commands::AssocIn(args) => commands::query::assoc_in(&args, format),
    }
}
