//! Age gate form handler.

use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::Local;
use tower_sessions::Session;
use tracing::instrument;

use super::apply_effects;
use crate::age_gate::BirthDateInput;
use crate::error::{Result, add_breadcrumb};
use crate::middleware::is_age_verified;
use crate::site::UiEvent;
use crate::state::AppState;

/// Check the submitted birth date.
///
/// Redirects to `/` once the visitor is verified; otherwise re-renders the
/// page with the gate message.
#[instrument(skip(state, session, input))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(input): Form<BirthDateInput>,
) -> Result<Response> {
    let site = state.site();
    let mut ui = site.load(is_age_verified(&session).await);

    let effects = site.dispatch(
        &mut ui,
        UiEvent::SubmitAge {
            input,
            today: Local::now().date_naive(),
        },
    );
    apply_effects(&session, &effects).await?;

    if ui.gate.is_verified() {
        add_breadcrumb("age_gate", "Visitor verified", None);
        return Ok(Redirect::to("/").into_response());
    }

    Ok(Html(site.render(&ui)?.into_html()).into_response())
}
