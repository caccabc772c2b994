//! Page assembly check.
//!
//! Runs the same two phases as server startup and prints one line per
//! partial, so a broken deploy is caught before the server refuses to start.

use std::path::Path;

use lowell_storefront::catalog::CatalogResource;
use lowell_storefront::config::{ConfigError, PartialsLocation};
use lowell_storefront::site::Site;
use lowell_storefront::startup::{self, StartupError};
use thiserror::Error;

/// Client id rendered into the shell during a check; never sent anywhere.
const CHECK_CLIENT_ID: &str = "check";

/// Errors from `lowell-cli check`.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Startup(#[from] StartupError),

    #[error("{failed} partial(s) failed to load")]
    Incomplete { failed: usize },
}

/// Load and wire the page from `partials`.
///
/// # Errors
///
/// Returns `CheckError` if any partial fails or wiring finds a missing element.
pub async fn run(partials: &str, catalog: Option<&Path>) -> Result<(), CheckError> {
    let location = PartialsLocation::parse(partials)?;
    let (products, stores) = CatalogResource::load_or_builtin(catalog)
        .await
        .map_err(StartupError::from)?
        .into_parts()
        .map_err(StartupError::from)?;

    let loaded = startup::load_configured_page(&location, CHECK_CLIENT_ID).await?;

    #[allow(clippy::print_stdout)]
    {
        for entry in loaded.report.entries() {
            match &entry.result {
                Ok(bytes) => println!("  ok    {} ({bytes} bytes)", entry.partial),
                Err(e) => println!("  FAIL  {}: {e}", entry.partial),
            }
        }
    }

    let failed = loaded.report.failures().count();

    let site = Site::wire(loaded.page, products, stores).map_err(StartupError::from)?;

    if failed > 0 {
        return Err(CheckError::Incomplete { failed });
    }

    #[allow(clippy::print_stdout)]
    {
        println!(
            "Page wired: {} products, {} stores",
            site.catalog().len(),
            site.stores().len()
        );
    }
    Ok(())
}
