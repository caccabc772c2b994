//! Catalog and store directory inspection.

use std::path::Path;

use lowell_storefront::catalog::{CatalogError, CatalogResource};
use lowell_storefront::stores::NO_STORES_MESSAGE;

/// Print every product with its price.
///
/// # Errors
///
/// Returns `CatalogError` if the resource cannot be read or is invalid.
pub async fn products(path: Option<&Path>) -> Result<(), CatalogError> {
    let (catalog, _) = CatalogResource::load_or_builtin(path).await?.into_parts()?;

    #[allow(clippy::print_stdout)]
    {
        for product in catalog.list_products() {
            println!("{:>3}  {:<40} {}", product.id.to_string(), product.name, product.price);
        }
    }
    Ok(())
}

/// Print the stores matching `query`.
///
/// # Errors
///
/// Returns `CatalogError` if the resource cannot be read or is invalid.
pub async fn stores(path: Option<&Path>, query: &str) -> Result<(), CatalogError> {
    let (_, directory) = CatalogResource::load_or_builtin(path).await?.into_parts()?;
    let matches = directory.filter_stores(query);

    #[allow(clippy::print_stdout)]
    {
        if matches.is_empty() {
            println!("{NO_STORES_MESSAGE}");
        }
        for store in matches {
            println!("{}\n  {}\n  {}", store.name, store.address, store.phone);
        }
    }
    Ok(())
}
