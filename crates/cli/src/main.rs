//! Lowell CLI - Page checks and catalog inspection.
//!
//! # Usage
//!
//! ```bash
//! # Load the partials and wire the page without starting the server
//! lowell-cli check --partials crates/storefront/partials
//!
//! # List the catalog
//! lowell-cli products
//!
//! # Search the store directory
//! lowell-cli stores "san francisco"
//! ```
//!
//! # Commands
//!
//! - `check` - Run both startup phases and report each partial
//! - `products` - Print the product catalog
//! - `stores` - Print stores matching a query

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "lowell-cli")]
#[command(author, version, about = "Lowell storefront CLI tools")]
struct Cli {
    /// Catalog resource (JSON); defaults to the built-in catalog
    #[arg(long, global = true, env = "STOREFRONT_CATALOG_PATH")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load partials and wire the page
    Check {
        /// Partials directory or base URL
        #[arg(long, env = "STOREFRONT_PARTIALS", default_value = "crates/storefront/partials")]
        partials: String,
    },
    /// Print the product catalog
    Products,
    /// Print stores matching a query (all stores when empty)
    Stores {
        #[arg(default_value = "")]
        query: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = cli.catalog.as_deref();
    match cli.command {
        Commands::Check { partials } => commands::check::run(&partials, catalog).await?,
        Commands::Products => commands::catalog::products(catalog).await?,
        Commands::Stores { query } => commands::catalog::stores(catalog, &query).await?,
    }
    Ok(())
}
