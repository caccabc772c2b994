//! Store locator.
//!
//! The directory is a fixed, read-only list of retail partners. The locator is
//! the activated view over it: it starts with the full list and is replaced
//! wholesale by each search. Searches only happen on explicit activation (the
//! search button or Enter in the search field); see [`SearchTrigger`].

use std::sync::Arc;

use askama::Template;
use askama_web::WebTemplate;
use serde::{Deserialize, Serialize};

/// Placeholder shown when a search matches nothing.
pub const NO_STORES_MESSAGE: &str = "No stores found matching your search.";

/// A retail partner carrying the products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub name: String,
    pub address: String,
    pub phone: String,
}

impl Store {
    /// Case-insensitive substring match against name or address.
    #[must_use]
    pub fn matches(&self, query_lower: &str) -> bool {
        self.name.to_lowercase().contains(query_lower)
            || self.address.to_lowercase().contains(query_lower)
    }
}

/// The immutable list of stores.
#[derive(Debug, Clone, Default)]
pub struct StoreDirectory {
    stores: Arc<[Store]>,
}

impl StoreDirectory {
    /// Wrap a store list.
    #[must_use]
    pub fn new(stores: Vec<Store>) -> Self {
        Self {
            stores: stores.into(),
        }
    }

    /// Every store, in directory order.
    #[must_use]
    pub fn all(&self) -> &[Store] {
        &self.stores
    }

    /// Stores whose name or address contains `query`, ignoring case.
    ///
    /// An empty query matches every store.
    #[must_use]
    pub fn filter_stores(&self, query: &str) -> Vec<&Store> {
        let query = query.to_lowercase();
        self.stores.iter().filter(|s| s.matches(&query)).collect()
    }

    /// Number of stores.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    /// Whether the directory is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

/// What caused a search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTrigger {
    /// The search button was activated.
    Button,
    /// A key was released in the search field.
    Key(String),
}

impl SearchTrigger {
    /// Only the button and the Enter key run a search.
    #[must_use]
    pub fn runs_search(&self) -> bool {
        match self {
            Self::Button => true,
            Self::Key(key) => key == "Enter",
        }
    }
}

/// The activated locator: the query last searched and the stores on display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLocator {
    query: Option<String>,
    displayed: Vec<Store>,
}

impl StoreLocator {
    /// Activate the locator with the full, unfiltered list.
    #[must_use]
    pub fn activate(directory: &StoreDirectory) -> Self {
        Self {
            query: None,
            displayed: directory.all().to_vec(),
        }
    }

    /// Replace the displayed list entirely.
    pub fn render_stores(&mut self, stores: Vec<Store>) {
        self.displayed = stores;
    }

    /// Filter the directory and display the matches.
    pub fn filter_stores(&mut self, directory: &StoreDirectory, query: &str) {
        let matches = directory
            .filter_stores(query)
            .into_iter()
            .cloned()
            .collect();
        self.query = Some(query.to_string());
        self.render_stores(matches);
    }

    /// Stores currently on display.
    #[must_use]
    pub fn displayed(&self) -> &[Store] {
        &self.displayed
    }

    /// The last query searched, if any.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Template for the list content.
    #[must_use]
    pub fn list_template(&self) -> StoreListTemplate<'_> {
        StoreListTemplate {
            stores: &self.displayed,
            placeholder: NO_STORES_MESSAGE,
        }
    }
}

/// Store list entries (`<li>` items for `#store-list`).
#[derive(Template, WebTemplate)]
#[template(path = "stores/list.html")]
pub struct StoreListTemplate<'a> {
    pub stores: &'a [Store],
    pub placeholder: &'static str,
}
