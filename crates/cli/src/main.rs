//! Brewery CLI - Database migrations and catalog seeding.
//!
//! # Usage
//!
//! ```bash
//! # Apply the schema migrations
//! brewery-cli migrate
//!
//! # Load the bundled demo catalog
//! brewery-cli seed
//!
//! # Replace the catalog with one read from a file
//! brewery-cli seed --file beers.yaml --clear
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Load a beer catalog into an empty (or cleared) table
//!
//! Both commands read `BREWERY_DATABASE_URL`, falling back to `DATABASE_URL`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "brewery-cli")]
#[command(author, version, about = "Brewery inventory CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Load a beer catalog
    Seed {
        /// YAML catalog to load instead of the bundled one
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Delete every stored beer first
        #[arg(long)]
        clear: bool,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { file, clear } => {
            commands::seed::run(file.as_deref(), clear).await?;
        }
    }
    Ok(())
}
