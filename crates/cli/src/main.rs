//! Webtoon reader CLI - database migrations and catalog seeding.
//!
//! # Usage
//!
//! ```bash
//! # Apply the embedded migrations to WEBTOON_DATABASE_URL
//! webtoon-cli migrate
//!
//! # Load webtoons and chapters from a YAML catalog
//! webtoon-cli seed crates/cli/seed/sample.yaml
//!
//! # Only validate the catalog
//! webtoon-cli seed crates/cli/seed/sample.yaml --dry-run
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "webtoon-cli")]
#[command(author, version, about = "Webtoon reader CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the catalog from a YAML file
    Seed {
        /// Path to the catalog file
        file: PathBuf,

        /// Validate the catalog without writing to the database
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { file, dry_run } => commands::seed::run(&file, dry_run).await?,
    }
    Ok(())
}
