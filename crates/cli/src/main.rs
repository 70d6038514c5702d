//! Fernway CLI - Database migrations and seeding tools.
//!
//! # Usage
//!
//! ```bash
//! # Run storefront database migrations
//! fw-cli migrate storefront
//!
//! # Run admin database migrations
//! fw-cli migrate admin
//!
//! # Run all database migrations
//! fw-cli migrate all
//!
//! # Publish a starter popup campaign
//! fw-cli seed popup-config
//!
//! # Load a few sample catalog products
//! fw-cli seed products
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fw-cli")]
#[command(author, version, about = "Fernway Goods CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        target: MigrateTarget,
    },
    /// Seed the database with starter data
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
}

#[derive(Subcommand)]
enum MigrateTarget {
    /// Run storefront database migrations
    Storefront,
    /// Run admin database migrations
    Admin,
    /// Run all database migrations
    All,
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Publish a starter spinner popup campaign
    PopupConfig,
    /// Insert a few sample catalog products
    Products,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
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
        Commands::Migrate { target } => match target {
            MigrateTarget::Storefront => commands::migrate::storefront().await?,
            MigrateTarget::Admin => commands::migrate::admin().await?,
            MigrateTarget::All => {
                commands::migrate::storefront().await?;
                commands::migrate::admin().await?;
            }
        },
        Commands::Seed { target } => match target {
            SeedTarget::PopupConfig => commands::seed::popup_config().await?,
            SeedTarget::Products => commands::seed::products().await?,
        },
    }
    Ok(())
}
