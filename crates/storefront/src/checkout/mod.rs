//! Checkout rendering and order building.
//!
//! The product detail view mounts a single payment control into
//! `#paypal-button-container`. The browser's PayPal buttons read the
//! control's data attributes and call back into the storefront API, which
//! builds the order from the server-side catalog and talks to PayPal through
//! [`paypal::PayPalClient`].

pub mod paypal;

use lowell_core::{Email, Price, PriceError, ProductId};
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::dom::{Document, DomError};

/// Id of the element the payment control is mounted into.
pub const PAYMENT_CONTAINER_ID: &str = "paypal-button-container";

/// Shown for any provider, create or capture failure.
pub const PAYMENT_ERROR_MESSAGE: &str = "An error occurred with your payment. Please try again.";

/// Confirmation shown after a successful capture.
#[must_use]
pub fn approval_message(given_name: Option<&str>) -> String {
    match given_name.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => format!("Transaction completed successfully! Thank you, {name}."),
        None => "Transaction completed successfully! Thank you.".to_string(),
    }
}

/// The payment control configured for one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentControl {
    pub product_id: ProductId,
    pub description: String,
    pub amount: Price,
}

impl PaymentControl {
    /// Configure a control for `product`.
    ///
    /// # Errors
    ///
    /// Returns `PriceError` if the product's display price does not parse.
    pub fn for_product(product: &Product) -> Result<Self, PriceError> {
        Ok(Self {
            product_id: product.id,
            description: product.name.clone(),
            amount: product.unit_price()?,
        })
    }
}

/// The payment container: holds at most one control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutMount {
    control: Option<PaymentControl>,
}

impl CheckoutMount {
    /// Remove the mounted control, if any.
    pub fn clear(&mut self) {
        self.control = None;
    }

    /// Mount a control for `product`, replacing any previous one.
    ///
    /// The container is cleared first, so a failure leaves it empty.
    ///
    /// # Errors
    ///
    /// Returns `PriceError` if the product's display price does not parse.
    pub fn render(&mut self, product: &Product) -> Result<&PaymentControl, PriceError> {
        self.clear();
        let control = PaymentControl::for_product(product)?;
        Ok(self.control.insert(control))
    }

    /// The mounted control.
    #[must_use]
    pub const fn control(&self) -> Option<&PaymentControl> {
        self.control.as_ref()
    }

    /// Write the mounted control into the page's payment container.
    ///
    /// An empty mount leaves the container without product attributes.
    ///
    /// # Errors
    ///
    /// Returns `DomError::NotFound` if the page has no payment container.
    pub fn mount_into(&self, document: &mut Document) -> Result<(), DomError> {
        document.set_inner_html(PAYMENT_CONTAINER_ID, "")?;
        let Some(control) = &self.control else {
            return Ok(());
        };

        document.set_attribute(
            PAYMENT_CONTAINER_ID,
            "data-product-id",
            &control.product_id.to_string(),
        )?;
        document.set_attribute(PAYMENT_CONTAINER_ID, "data-description", &control.description)?;
        document.set_attribute(
            PAYMENT_CONTAINER_ID,
            "data-amount",
            &control.amount.provider_value(),
        )?;
        document.set_attribute(
            PAYMENT_CONTAINER_ID,
            "data-currency",
            control.amount.currency_code.code(),
        )
    }
}

// =============================================================================
// Orders v2 request/response types
// =============================================================================

/// Order intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderIntent {
    Capture,
}

/// Body of `POST /v2/checkout/orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateOrderRequest {
    pub intent: OrderIntent,
    pub purchase_units: Vec<PurchaseUnit>,
}

/// A purchase unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseUnit {
    pub description: String,
    pub amount: Amount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payee: Option<Payee>,
}

/// Currency amount as PayPal expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Amount {
    pub currency_code: String,
    pub value: String,
}

/// The merchant receiving the payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payee {
    pub email_address: Email,
}

impl CreateOrderRequest {
    /// A capture order with exactly one purchase unit for `control`.
    #[must_use]
    pub fn for_control(control: &PaymentControl, payee: Option<&Email>) -> Self {
        Self {
            intent: OrderIntent::Capture,
            purchase_units: vec![PurchaseUnit {
                description: control.description.clone(),
                amount: Amount {
                    currency_code: control.amount.currency_code.code().to_string(),
                    value: control.amount.provider_value(),
                },
                payee: payee.map(|email| Payee {
                    email_address: email.clone(),
                }),
            }],
        }
    }
}

/// A created order.
#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Response of `POST /v2/checkout/orders/{id}/capture`.
#[derive(Debug, Clone, Deserialize)]
pub struct CaptureResponse {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub payer: Option<Payer>,
}

impl CaptureResponse {
    /// The payer's given name, when PayPal returned one.
    #[must_use]
    pub fn given_name(&self) -> Option<&str> {
        self.payer
            .as_ref()
            .and_then(|p| p.name.as_ref())
            .and_then(|n| n.given_name.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Payer {
    #[serde(default)]
    pub name: Option<PayerName>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PayerName {
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
}

/// Storefront API request: create an order for a catalog product.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderInput {
    pub product_id: ProductId,
}

/// Storefront API response with the provider order id.
#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderOutput {
    pub id: String,
}

/// Storefront API response after capture.
#[derive(Debug, Clone, Serialize)]
pub struct CaptureOutput {
    pub message: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::CatalogResource;

    fn product(id: i32) -> Product {
        let (catalog, _) = CatalogResource::builtin().into_parts().unwrap();
        catalog.find(ProductId::new(id)).unwrap().clone()
    }

    const DETAIL: &str = r#"<section id="product-detail"><div id="paypal-button-container"></div></section>"#;

    #[test]
    fn test_render_then_render_keeps_only_latest() {
        let mut mount = CheckoutMount::default();
        mount.render(&product(1)).unwrap();
        mount.render(&product(8)).unwrap();

        let control = mount.control().unwrap();
        assert_eq!(control.product_id, ProductId::new(8));
        assert_eq!(control.amount.provider_value(), "60.00");

        let mut document = Document::new(DETAIL);
        mount.mount_into(&mut document).unwrap();
        let container = document.get_element_by_id(PAYMENT_CONTAINER_ID).unwrap();
        assert_eq!(container.data("product-id"), Some("8"));
        assert_eq!(container.data("amount"), Some("60.00"));
        assert_eq!(container.data("currency"), Some("USD"));
    }

    #[test]
    fn test_failed_render_leaves_mount_empty() {
        let mut mount = CheckoutMount::default();
        mount.render(&product(1)).unwrap();

        let mut broken = product(2);
        broken.price = "call for price".to_string();
        assert!(mount.render(&broken).is_err());
        assert!(mount.control().is_none());
    }

    #[test]
    fn test_create_order_request_shape() {
        let control = PaymentControl::for_product(&product(8)).unwrap();
        let payee = Email::parse("payments@lowellfarms.com").unwrap();
        let request = CreateOrderRequest::for_control(&control, Some(&payee));

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "intent": "CAPTURE",
                "purchase_units": [{
                    "description": "Live Rosin Disposable Vape - Sativa",
                    "amount": { "currency_code": "USD", "value": "60.00" },
                    "payee": { "email_address": "payments@lowellfarms.com" }
                }]
            })
        );
    }

    #[test]
    fn test_create_order_request_without_payee() {
        let control = PaymentControl::for_product(&product(3)).unwrap();
        let json = serde_json::to_value(CreateOrderRequest::for_control(&control, None)).unwrap();
        let unit = json["purchase_units"][0].as_object().unwrap();
        assert!(!unit.contains_key("payee"));
        assert_eq!(json["purchase_units"][0]["amount"]["value"], "80.00");
    }

    #[test]
    fn test_capture_response_given_name() {
        let response: CaptureResponse = serde_json::from_str(
            r#"{"id":"5O190127TN364715T","status":"COMPLETED","payer":{"name":{"given_name":"John","surname":"Doe"}}}"#,
        )
        .unwrap();
        assert_eq!(response.given_name(), Some("John"));
        assert_eq!(
            approval_message(response.given_name()),
            "Transaction completed successfully! Thank you, John."
        );
    }

    #[test]
    fn test_approval_message_without_name() {
        assert_eq!(
            approval_message(None),
            "Transaction completed successfully! Thank you."
        );
        assert_eq!(
            approval_message(Some("  ")),
            "Transaction completed successfully! Thank you."
        );
    }
}
