//! Checkout route handlers.
//!
//! The checkout page summarizes the session cart with a flat shipping rate.
//! Submitting the form hands the order to the intake endpoint; the response
//! is a result fragment swapped next to the form, so the form keeps its
//! input when a submission fails.

use std::collections::BTreeMap;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension, Form,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{AppendHeaders, Html, IntoResponse, Response},
};
use harbor_core::Email;
use harbor_core::checkout::{
    CheckoutPage, CheckoutPhase, CheckoutSummary, OrderRequest, SubmitOutcome,
};
use harbor_core::controller::CartController;
use harbor_core::menu::CartMenu;
use harbor_core::store::CartStore;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::RequestId;
use crate::routes::cart::CART_UPDATED_EVENT;
use crate::routes::{SHOP_PATH, redirect};
use crate::services::SessionCartStore;
use crate::state::AppState;

/// Form fields that must be present and non-blank.
pub const REQUIRED_FIELDS: [&str; 3] = ["name", "email", "address"];

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub summary: CheckoutSummary,
}

/// How a submission ended, as shown to the shopper.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultKind {
    /// Order accepted: modal confirmation.
    Confirmed,
    /// Order not accepted: blocking alert, cart kept.
    Failed,
    /// Another submission for this visitor is still running.
    InFlight,
    /// The form was incomplete.
    Invalid,
}

/// Checkout result fragment template (for HTMX).
///
/// Carries its own status code, so it implements `IntoResponse` by hand.
/// A confirmation also carries the cart menu left after the order, so the
/// header badge is updated out of band.
#[derive(Template)]
#[template(path = "partials/checkout_result.html")]
pub struct CheckoutResultTemplate {
    pub kind: ResultKind,
    pub message: String,
    pub menu: Option<CartMenu>,
}

impl CheckoutResultTemplate {
    fn new(kind: ResultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            menu: None,
        }
    }

    fn confirmed(grand_total: &str, menu: CartMenu) -> Self {
        Self {
            kind: ResultKind::Confirmed,
            message: format!("Thank you! Your order totalling {grand_total} has been placed."),
            menu: Some(menu),
        }
    }

    const fn status(&self) -> StatusCode {
        match self.kind {
            ResultKind::Confirmed => StatusCode::OK,
            ResultKind::Failed => StatusCode::BAD_GATEWAY,
            ResultKind::InFlight => StatusCode::CONFLICT,
            ResultKind::Invalid => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for CheckoutResultTemplate {
    fn into_response(self) -> Response {
        let status = self.status();
        match self.render() {
            Ok(body) => (status, Html(body)).into_response(),
            Err(e) => AppError::Internal(format!("checkout result template: {e}")).into_response(),
        }
    }
}

/// Trim every submitted field, then check the required ones.
///
/// The email address is normalized through [`Email`].
///
/// # Errors
///
/// Returns a shopper-facing message naming what is missing or malformed.
pub fn validate_order_fields(
    fields: BTreeMap<String, String>,
) -> std::result::Result<BTreeMap<String, String>, String> {
    let mut fields: BTreeMap<String, String> = fields
        .into_iter()
        .map(|(name, value)| (name, value.trim().to_string()))
        .collect();

    let missing: Vec<&str> = REQUIRED_FIELDS
        .into_iter()
        .filter(|name| fields.get(*name).is_none_or(String::is_empty))
        .collect();
    if !missing.is_empty() {
        return Err(format!("Please fill in: {}.", missing.join(", ")));
    }

    if let Some(raw) = fields.get_mut("email") {
        let email = Email::parse(raw).map_err(|e| format!("Please check your email: {e}."))?;
        *raw = email.as_str().to_string();
    }

    Ok(fields)
}

/// Display the checkout page, or send the shopper back to the shop when the
/// cart is empty.
#[instrument(skip(headers, session))]
pub async fn show(headers: HeaderMap, session: Session) -> Response {
    let controller = CartController::load(SessionCartStore::new(session)).await;

    match CheckoutPage::from_cart(controller.cart()) {
        CheckoutPage::Empty => redirect(&headers, SHOP_PATH),
        CheckoutPage::Populated(summary) => CheckoutTemplate { summary }.into_response(),
    }
}

/// Submit the order (HTMX).
///
/// One submission per visitor may be in flight; a concurrent one gets `409`.
/// The ticket is claimed before the cart is read, so a submission that starts
/// after another has cleared the cart sees the empty cart. A success clears
/// the cart and fires `cart-updated`; a failure answers `502` and leaves the
/// cart alone.
#[instrument(skip(state, headers, session, fields, request_id))]
pub async fn submit(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    headers: HeaderMap,
    session: Session,
    Form(fields): Form<BTreeMap<String, String>>,
) -> Result<Response> {
    let visitor = session.id().map_or_else(
        || uuid::Uuid::new_v4().to_string(),
        |id| id.to_string(),
    );
    let Some(_ticket) = state.submissions().begin(visitor) else {
        tracing::info!("Rejected duplicate order submission");
        return Ok(CheckoutResultTemplate::new(
            ResultKind::InFlight,
            "Your order is already being submitted.",
        )
        .into_response());
    };

    let mut controller = CartController::load(SessionCartStore::new(session)).await;

    let summary = match CheckoutPage::from_cart(controller.cart()) {
        CheckoutPage::Empty => return Ok(redirect(&headers, SHOP_PATH)),
        CheckoutPage::Populated(summary) => summary,
    };

    let fields = match validate_order_fields(fields) {
        Ok(fields) => fields,
        Err(message) => {
            return Ok(CheckoutResultTemplate::new(ResultKind::Invalid, message).into_response());
        }
    };

    let phase = CheckoutPhase::for_cart(controller.cart())
        .begin_submit()
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let order = OrderRequest::new(
        fields,
        controller.cart().clone(),
        summary.grand_total.clone(),
    );

    let request_id = request_id.map(|Extension(id)| id.to_string());
    let mut crumbs = vec![("total", summary.grand_total.as_str())];
    if let Some(id) = request_id.as_deref() {
        crumbs.push(("request_id", id));
    }
    add_breadcrumb("checkout", "Submitting order", &crumbs);

    let outcome = match state.order_intake().submit(&order).await {
        Ok(()) => SubmitOutcome::Success,
        Err(e) => {
            tracing::warn!(error = %e, items = order.cart().len(), "Order submission failed");
            SubmitOutcome::Failure
        }
    };

    let phase = phase
        .resolve(outcome)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !phase.clears_cart() {
        return Ok(CheckoutResultTemplate::new(
            ResultKind::Failed,
            "There was a problem submitting your order. Please try again.",
        )
        .into_response());
    }

    tracing::info!(total = %summary.grand_total, "Order submitted");
    let confirmation = confirm_order(&mut controller, &summary.grand_total).await;

    Ok((
        AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
        confirmation,
    )
        .into_response())
}

/// Clear the cart of an accepted order and build the confirmation.
///
/// The order has already been placed, so a cart that cannot be cleared is
/// reported to Sentry and the shopper is still told the order went through.
async fn confirm_order<S: CartStore>(
    controller: &mut CartController<S>,
    grand_total: &str,
) -> CheckoutResultTemplate {
    if let Err(e) = controller.clear_cart().await {
        tracing::error!(error = %e, "Order placed but the cart could not be cleared");
        sentry::capture_error(&e);
    }
    CheckoutResultTemplate::confirmed(grand_total, CartMenu::from(controller.cart()))
}
