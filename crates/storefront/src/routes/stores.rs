//! Store search fragment handler.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::middleware::RequireAgeVerified;
use crate::state::AppState;
use crate::stores::StoreLocator;

/// Query parameters for the store search.
#[derive(Debug, Default, Deserialize)]
pub struct StoreQuery {
    #[serde(default)]
    pub q: String,
}

/// Return the filtered store list items.
#[instrument(skip(state, _verified))]
pub async fn list(
    State(state): State<AppState>,
    _verified: RequireAgeVerified,
    Query(query): Query<StoreQuery>,
) -> Response {
    let directory = state.site().stores();
    let mut locator = StoreLocator::activate(directory);
    locator.filter_stores(directory, &query.q);
    tracing::debug!(matches = locator.displayed().len(), "Store search");
    locator.list_template().into_response()
}
