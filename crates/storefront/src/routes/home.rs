//! Home page route handler.

use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::AgeVerified;
use crate::site::UiEvent;
use crate::state::AppState;
use crate::stores::SearchTrigger;

/// Query parameters for the home page.
#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    /// Store search submitted without scripts.
    pub q: Option<String>,
}

/// Render the assembled page for this visitor.
#[instrument(skip(state))]
pub async fn home(
    State(state): State<AppState>,
    AgeVerified(verified): AgeVerified,
    Query(query): Query<HomeQuery>,
) -> Result<Html<String>> {
    let site = state.site();
    let mut ui = site.load(verified);

    if let Some(q) = query.q {
        site.dispatch(
            &mut ui,
            UiEvent::SearchStores {
                query: q,
                trigger: SearchTrigger::Button,
            },
        );
    }

    Ok(Html(site.render(&ui)?.into_html()))
}
