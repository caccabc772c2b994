//! Checkout API handlers called by the PayPal buttons.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use crate::checkout::{
    CaptureOutput, CheckoutMount, CreateOrderInput, CreateOrderOutput, CreateOrderRequest,
    approval_message,
};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::RequireAgeVerified;
use crate::state::AppState;

/// Create a PayPal order for one unit of a catalog product.
///
/// The amount comes from the catalog, never from the client.
#[instrument(skip(state, _verified))]
pub async fn create_order(
    State(state): State<AppState>,
    _verified: RequireAgeVerified,
    Json(input): Json<CreateOrderInput>,
) -> Result<Json<CreateOrderOutput>> {
    let product = state
        .site()
        .catalog()
        .find(input.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", input.product_id)))?;

    let mut mount = CheckoutMount::default();
    let control = mount
        .render(product)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let request = CreateOrderRequest::for_control(control, state.paypal().payee());
    let order = state.paypal().create_order(&request).await?;

    add_breadcrumb(
        "checkout",
        "Created order",
        Some(&[
            ("order_id", order.id.as_str()),
            ("product", product.name.as_str()),
        ]),
    );

    Ok(Json(CreateOrderOutput { id: order.id }))
}

/// Capture an approved order and return the confirmation message.
#[instrument(skip(state, _verified))]
pub async fn capture_order(
    State(state): State<AppState>,
    _verified: RequireAgeVerified,
    Path(order_id): Path<String>,
) -> Result<Json<CaptureOutput>> {
    let capture = state.paypal().capture_order(&order_id).await?;
    add_breadcrumb(
        "checkout",
        "Captured order",
        Some(&[("order_id", capture.id.as_str())]),
    );

    Ok(Json(CaptureOutput {
        message: approval_message(capture.given_name()),
    }))
}
