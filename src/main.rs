mod assembler;
mod categorizer;
mod cli;
mod dedup;
mod discount;
mod error;
mod expiration;
mod fmt;
mod importer;
mod merchant;
mod models;
mod pipeline;
mod reports;
mod rules;
mod scanner;
mod settings;
mod urgency;
mod validator;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { categories } => cli::init::run(categories),
        Commands::Extract {
            file,
            categories,
            today,
            include_expired,
            json,
            output,
        } => cli::extract::run(
            &file,
            categories.as_deref(),
            today.as_deref(),
            include_expired,
            json,
            output.as_deref(),
        ),
        Commands::Demo { today, json } => cli::demo::run(today.as_deref(), json),
        Commands::Merchants { file, top } => cli::merchants::run(&file, top),
        Commands::Categories { categories } => cli::categories::run(categories.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
