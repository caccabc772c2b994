//! Product catalog.
//!
//! The catalog is immutable configuration data: it is built once at startup,
//! either from the built-in list or from a JSON resource, validated, and then
//! shared read-only by every request.
//!
//! # Resource Format
//!
//! ```json
//! {
//!   "products": [
//!     { "id": 1, "name": "...", "image": "...", "price": "$45",
//!       "short_desc": "...", "long_desc": "..." }
//!   ],
//!   "stores": [
//!     { "name": "...", "address": "...", "phone": "..." }
//!   ]
//! }
//! ```
//!
//! `stores` may be omitted, in which case the built-in store directory is used.

pub mod data;

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use lowell_core::{Price, PriceError, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::stores::{Store, StoreDirectory};

/// Catalog loading and validation errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two products share an id.
    #[error("duplicate product id {0}")]
    DuplicateProductId(ProductId),

    /// A product id is zero or negative.
    #[error("product id {0} is not a positive integer")]
    InvalidProductId(ProductId),

    /// A product's display price cannot be turned into an amount.
    #[error("product {id} has an invalid price: {source}")]
    InvalidPrice {
        id: ProductId,
        #[source]
        source: PriceError,
    },

    /// The resource file could not be read.
    #[error("failed to read catalog resource {path}: {message}")]
    Io { path: String, message: String },

    /// The resource file is not valid catalog JSON.
    #[error("failed to parse catalog resource: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A product offered on the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Image file name under `/static/images/`.
    pub image: String,
    /// Display price, e.g. `"$60"`.
    pub price: String,
    pub short_desc: String,
    pub long_desc: String,
}

impl Product {
    /// The price as a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns `PriceError` if the display price is malformed. Prices in a
    /// constructed [`Catalog`] have already been validated.
    pub fn unit_price(&self) -> Result<Price, PriceError> {
        Price::parse_display(&self.price)
    }
}

/// The validated, immutable product list.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<[Product]>,
}

impl Catalog {
    /// Build a catalog, checking that ids are positive and unique and that
    /// every price parses.
    ///
    /// # Errors
    ///
    /// Returns the first `CatalogError` found.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !product.id.is_positive() {
                return Err(CatalogError::InvalidProductId(product.id));
            }
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateProductId(product.id));
            }
            product
                .unit_price()
                .map_err(|source| CatalogError::InvalidPrice {
                    id: product.id,
                    source,
                })?;
        }

        Ok(Self {
            products: products.into(),
        })
    }

    /// All products in display order.
    #[must_use]
    pub fn list_products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Catalog data as loaded from a resource, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogResource {
    pub products: Vec<Product>,
    #[serde(default = "data::default_stores")]
    pub stores: Vec<Store>,
}

impl CatalogResource {
    /// The built-in products and stores.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            products: data::default_products(),
            stores: data::default_stores(),
        }
    }

    /// Read a catalog resource from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read, or
    /// `CatalogError::Parse` if it is not valid catalog JSON.
    pub async fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| CatalogError::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Load from `path` when given, otherwise use the built-in data.
    ///
    /// # Errors
    ///
    /// See [`CatalogResource::load`].
    pub async fn load_or_builtin(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading catalog resource");
                Self::load(path).await
            }
            None => Ok(Self::builtin()),
        }
    }

    /// Validate into the catalog and store directory.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if product validation fails.
    pub fn into_parts(self) -> Result<(Catalog, StoreDirectory), CatalogError> {
        let catalog = Catalog::new(self.products)?;
        Ok((catalog, StoreDirectory::new(self.stores)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample(id: i32, price: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            image: "product.png".to_string(),
            price: price.to_string(),
            short_desc: String::new(),
            long_desc: String::new(),
        }
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let (catalog, stores) = CatalogResource::builtin().into_parts().unwrap();
        assert_eq!(catalog.len(), 20);
        assert_eq!(stores.len(), 8);
    }

    #[test]
    fn test_find_product_eight() {
        let (catalog, _) = CatalogResource::builtin().into_parts().unwrap();
        let product = catalog.find(ProductId::new(8)).unwrap();
        assert_eq!(product.name, "Live Rosin Disposable Vape - Sativa");
        assert_eq!(product.price, "$60");
        assert_eq!(product.unit_price().unwrap().provider_value(), "60.00");
    }

    #[test]
    fn test_find_missing_product() {
        let (catalog, _) = CatalogResource::builtin().into_parts().unwrap();
        assert!(catalog.find(ProductId::new(21)).is_none());
        assert!(catalog.find(ProductId::new(0)).is_none());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let result = Catalog::new(vec![sample(1, "$10"), sample(1, "$12")]);
        assert!(matches!(
            result,
            Err(CatalogError::DuplicateProductId(id)) if id == ProductId::new(1)
        ));
    }

    #[test]
    fn test_rejects_non_positive_ids() {
        let result = Catalog::new(vec![sample(0, "$10")]);
        assert!(matches!(result, Err(CatalogError::InvalidProductId(_))));
    }

    #[test]
    fn test_rejects_bad_price() {
        let result = Catalog::new(vec![sample(3, "call us")]);
        assert!(matches!(result, Err(CatalogError::InvalidPrice { .. })));
    }

    #[test]
    fn test_resource_without_stores_uses_builtin_directory() {
        let json = r#"{"products":[{"id":1,"name":"A","image":"a.png","price":"$5","short_desc":"s","long_desc":"l"}]}"#;
        let resource: CatalogResource = serde_json::from_str(json).unwrap();
        let (catalog, stores) = resource.into_parts().unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(stores.len(), 8);
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"{"products":[{"id":2,"name":"B","image":"b.png","price":"$7","short_desc":"s","long_desc":"l"}],"stores":[]}"#,
        )
        .unwrap();

        let resource = CatalogResource::load_or_builtin(Some(&path)).await.unwrap();
        let (catalog, stores) = resource.into_parts().unwrap();
        assert_eq!(catalog.list_products().first().unwrap().name, "B");
        assert!(stores.is_empty());
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let result = CatalogResource::load(Path::new("/nonexistent/catalog.json")).await;
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }
}
