//! Rendering a [`SiteState`] onto a copy of the assembled page.

use askama::Template;
use thiserror::Error;

use super::{Site, SiteState, View};
use crate::catalog::Product;
use crate::dom::{Document, DomError, escape_attr};

/// Class that hides an element.
const HIDDEN: &str = "hidden";

/// Id of the site header element (optional in the page).
const HEADER_ID: &str = "site-header";

/// Errors while rendering a page.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("page patch failed: {0}")]
    Dom(#[from] DomError),

    #[error("template error: {0}")]
    Template(#[from] askama::Error),
}

/// Content of `#product-detail`.
#[derive(Template)]
#[template(path = "products/detail.html")]
pub struct ProductDetailTemplate<'a> {
    pub product: &'a Product,
}

impl Site {
    /// Render `state` onto a fresh copy of the page.
    ///
    /// # Errors
    ///
    /// Returns `RenderError` if a template fails or a required element has
    /// gone missing (which wiring rules out).
    pub fn render(&self, state: &SiteState) -> Result<Document, RenderError> {
        let mut page = self.page().clone();

        render_gate(&mut page, state)?;
        if state.header_scrolled && page.contains_id(HEADER_ID) {
            page.add_class(HEADER_ID, "scrolled")?;
        }
        if let Some(growth) = &state.growth {
            growth.apply(&mut page);
        }
        if let Some(locator) = &state.locator {
            page.set_inner_html("store-list", &locator.list_template().render()?)?;
            if let Some(query) = locator.query() {
                page.set_attribute("location-search", "value", query)?;
            }
        }
        self.render_view(&mut page, state)?;

        Ok(page)
    }

    fn render_view(&self, page: &mut Document, state: &SiteState) -> Result<(), RenderError> {
        let product = match state.view {
            View::Detail(id) => self.catalog().find(id),
            View::ProductList => None,
        };

        let Some(product) = product else {
            page.add_class("product-detail", HIDDEN)?;
            set_sections_hidden(page, false);
            return Ok(());
        };

        let detail = ProductDetailTemplate { product }.render()?;
        page.set_inner_html("product-detail", &detail)?;
        state.checkout.mount_into(page)?;
        set_sections_hidden(page, true);
        page.remove_class("product-detail", HIDDEN)?;
        Ok(())
    }
}

/// Show either the age gate (with any error) or the main content.
fn render_gate(page: &mut Document, state: &SiteState) -> Result<(), DomError> {
    if state.gate.is_verified() {
        page.add_class("age-gate", HIDDEN)?;
        page.remove_class("main-content", HIDDEN)?;
        return Ok(());
    }

    page.remove_class("age-gate", HIDDEN)?;
    page.add_class("main-content", HIDDEN)?;
    let message = state.gate_error.map_or("", |e| e.message());
    page.set_inner_html("age-error", &escape_attr(message))
}

/// Hide or restore every section other than the product detail.
fn set_sections_hidden(page: &mut Document, hidden: bool) {
    page.set_class_where(HIDDEN, |element| {
        (element.name == "section" && element.id() != Some("product-detail")).then_some(hidden)
    });
}
