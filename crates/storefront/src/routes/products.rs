//! Product detail route handler.

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use lowell_core::ProductId;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::AgeVerified;
use crate::site::{UiEvent, View};
use crate::state::AppState;

/// Render the page with the detail view open for `id`.
///
/// Unknown or malformed ids redirect to the product list.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    AgeVerified(verified): AgeVerified,
    Path(id): Path<String>,
) -> Result<Response> {
    let Ok(product_id) = id.parse::<ProductId>() else {
        return Ok(Redirect::to("/").into_response());
    };

    let site = state.site();
    let mut ui = site.load(verified);
    site.dispatch(&mut ui, UiEvent::ViewProduct(product_id));

    if ui.view == View::ProductList {
        return Ok(Redirect::to("/").into_response());
    }

    Ok(Html(site.render(&ui)?.into_html()).into_response())
}
