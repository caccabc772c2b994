//! Site initializer and dispatch.
//!
//! [`Site::wire`] runs once, after the partial loader has assembled the page.
//! It checks that every element the handlers rely on is present and yields
//! an immutable [`Site`] shared by all requests. Each request then rebuilds
//! a [`SiteState`], feeds [`UiEvent`]s through [`Site::dispatch`] and renders
//! the resulting state onto a copy of the page.

mod render;
mod state;

pub use render::{ProductDetailTemplate, RenderError};
pub use state::{Effect, HEADER_SCROLL_OFFSET, SiteState, UiEvent, View};

use lowell_core::ProductId;
use thiserror::Error;

use crate::age_gate::{AgeGate, BirthDateInput, Verification};
use crate::catalog::Catalog;
use crate::dom::Document;
use crate::growth::GrowthAnimation;
use crate::stores::{SearchTrigger, StoreDirectory, StoreLocator};

/// Element ids the site cannot run without.
pub const REQUIRED_IDS: [&str; 11] = [
    "age-gate",
    "age-form",
    "month",
    "day",
    "year",
    "age-error",
    "main-content",
    "product-detail",
    "store-list",
    "location-search",
    "search-btn",
];

/// Classes that must appear on at least one element.
pub const REQUIRED_CLASSES: [&str; 1] = ["view-product-btn"];

/// Wiring failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitError {
    /// A required element is absent. Holds `#id` or `.class`.
    #[error("required element {0} is missing from the assembled page")]
    MissingElement(String),
}

/// The assembled, validated site.
#[derive(Debug, Clone)]
pub struct Site {
    page: Document,
    catalog: Catalog,
    stores: StoreDirectory,
}

impl Site {
    /// Check the assembled page and bind it to the catalog and stores.
    ///
    /// # Errors
    ///
    /// Returns `InitError::MissingElement` naming the first required element
    /// that is absent.
    pub fn wire(page: Document, catalog: Catalog, stores: StoreDirectory) -> Result<Self, InitError> {
        let elements = page.elements();

        for id in REQUIRED_IDS {
            if !elements.iter().any(|e| e.id() == Some(id)) {
                return Err(InitError::MissingElement(format!("#{id}")));
            }
        }
        for class in REQUIRED_CLASSES {
            if !elements.iter().any(|e| e.has_class(class)) {
                return Err(InitError::MissingElement(format!(".{class}")));
            }
        }

        // Viewing such a card is a no-op.
        for button in elements.iter().filter(|e| e.has_class("view-product-btn")) {
            let known = button
                .data("product-id")
                .and_then(|id| id.parse::<ProductId>().ok())
                .is_some_and(|id| catalog.find(id).is_some());
            if !known {
                tracing::warn!(
                    product_id = button.data("product-id").unwrap_or_default(),
                    "Product card does not match any catalog product"
                );
            }
        }

        tracing::info!(
            products = catalog.len(),
            stores = stores.len(),
            "Site wired"
        );
        Ok(Self {
            page,
            catalog,
            stores,
        })
    }

    /// The assembled page before any per-visitor changes.
    #[must_use]
    pub const fn page(&self) -> &Document {
        &self.page
    }

    /// The product catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The store directory.
    #[must_use]
    pub const fn stores(&self) -> &StoreDirectory {
        &self.stores
    }

    /// State for a fresh page load.
    #[must_use]
    pub fn load(&self, session_verified: bool) -> SiteState {
        let mut state = SiteState::default();
        self.dispatch(&mut state, UiEvent::PageLoaded { session_verified });
        state
    }

    /// Apply an event to `state` and return the effects to execute.
    pub fn dispatch(&self, state: &mut SiteState, event: UiEvent) -> Vec<Effect> {
        match event {
            UiEvent::PageLoaded { session_verified } => {
                state.gate = AgeGate::from_session_flag(session_verified);
                if state.gate.is_verified() {
                    self.activate(state);
                }
                Vec::new()
            }
            UiEvent::SubmitAge { input, today } => self.submit_age(state, &input, today),
            UiEvent::ViewProduct(id) => self.show_detail(state, id),
            UiEvent::BackToShop => {
                state.view = View::ProductList;
                Vec::new()
            }
            UiEvent::SearchStores { query, trigger } => {
                self.search_stores(state, &query, &trigger);
                Vec::new()
            }
            UiEvent::MarkerVisible { stage, ratio } => {
                if let Some(growth) = state.growth.as_mut() {
                    growth.on_marker_visible(&stage, ratio);
                }
                Vec::new()
            }
            UiEvent::Scrolled { offset } => {
                state.header_scrolled = offset > HEADER_SCROLL_OFFSET;
                Vec::new()
            }
            UiEvent::HeroShopNow => vec![Effect::ScrollIntoView("flower")],
            UiEvent::ExploreCollection => vec![Effect::ScrollIntoView("explore-collection")],
        }
    }

    fn submit_age(
        &self,
        state: &mut SiteState,
        input: &BirthDateInput,
        today: chrono::NaiveDate,
    ) -> Vec<Effect> {
        match state.gate.submit(input, today) {
            Ok(Verification::Verified { age }) => {
                tracing::info!(age, "Age gate passed");
                state.gate_error = None;
                self.activate(state);
                vec![Effect::PersistAgeVerified]
            }
            Ok(Verification::AlreadyVerified) => Vec::new(),
            Err(e) => {
                tracing::debug!(reason = ?e, "Age gate rejected submission");
                state.gate_error = Some(e);
                Vec::new()
            }
        }
    }

    fn show_detail(&self, state: &mut SiteState, id: ProductId) -> Vec<Effect> {
        let Some(product) = self.catalog.find(id) else {
            tracing::debug!(product_id = %id, "Unknown product, view unchanged");
            return Vec::new();
        };

        if let Err(e) = state.checkout.render(product) {
            tracing::error!(product_id = %id, error = %e, "Failed to configure payment control");
        }
        state.view = View::Detail(id);
        vec![Effect::ScrollToTop]
    }

    fn search_stores(&self, state: &mut SiteState, query: &str, trigger: &SearchTrigger) {
        if !trigger.runs_search() {
            return;
        }
        if let Some(locator) = state.locator.as_mut() {
            locator.filter_stores(&self.stores, query);
        }
    }

    /// Start the behaviors that only run for verified visitors.
    fn activate(&self, state: &mut SiteState) {
        if state.growth.is_none() {
            state.growth = GrowthAnimation::activate(&self.page);
        }
        if state.locator.is_none() {
            state.locator = Some(StoreLocator::activate(&self.stores));
        }
    }
}
