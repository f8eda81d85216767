//! Checkout page projection, checkout phases, and the order request body.
//!
//! # Phases
//!
//! ```text
//! Empty ──────────────────────────────► (redirect to the shop, terminal)
//! AwaitingSubmit ──► Submitting ──┬──► Succeeded (cart cleared, terminal)
//!                        ▲        └──► Failed
//!                        └──────────────┘ (shopper resubmits)
//! ```

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::types::{Cart, CurrencyCode, Price};

/// Flat shipping charge added to every order.
pub const SHIPPING_FLAT_RATE: Decimal = Decimal::TEN;

/// Form field names that can never override the order snapshot.
pub const RESERVED_FIELDS: [&str; 2] = ["cart", "total"];

/// One line on the checkout page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLine {
    pub name: String,
    pub size_label: &'static str,
    pub price: String,
}

/// Populated checkout page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSummary {
    pub lines: Vec<CheckoutLine>,
    pub subtotal: String,
    pub shipping: String,
    pub grand_total: String,
    grand_total_amount: Decimal,
}

impl CheckoutSummary {
    #[must_use]
    pub const fn grand_total_amount(&self) -> Decimal {
        self.grand_total_amount
    }
}

/// What the checkout page shows for a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutPage {
    /// Nothing to check out; send the shopper back to the listing.
    Empty,
    Populated(CheckoutSummary),
}

impl CheckoutPage {
    /// Project `cart` in the default store currency.
    #[must_use]
    pub fn from_cart(cart: &Cart) -> Self {
        Self::project(cart, CurrencyCode::default())
    }

    /// Project `cart` using `currency` for amounts.
    #[must_use]
    pub fn project(cart: &Cart, currency: CurrencyCode) -> Self {
        if cart.is_empty() {
            return Self::Empty;
        }

        let lines = cart
            .iter()
            .map(|item| CheckoutLine {
                name: item.name().to_string(),
                size_label: item.size().label(),
                price: Price::new(item.price(), currency).display(),
            })
            .collect();
        let subtotal = cart.total();
        let grand_total = subtotal + SHIPPING_FLAT_RATE;

        Self::Populated(CheckoutSummary {
            lines,
            subtotal: Price::new(subtotal, currency).display(),
            shipping: Price::new(SHIPPING_FLAT_RATE, currency).display(),
            grand_total: Price::new(grand_total, currency).display(),
            grand_total_amount: grand_total,
        })
    }
}

/// Result of handing an order to the intake endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Success,
    Failure,
}

/// Where a checkout is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutPhase {
    Empty,
    AwaitingSubmit,
    Submitting,
    Succeeded,
    Failed,
}

/// A transition the current phase does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot {action} while checkout is {phase}")]
pub struct CheckoutTransitionError {
    pub phase: CheckoutPhase,
    pub action: &'static str,
}

impl CheckoutPhase {
    /// Entry phase for a cart.
    #[must_use]
    pub fn for_cart(cart: &Cart) -> Self {
        if cart.is_empty() {
            Self::Empty
        } else {
            Self::AwaitingSubmit
        }
    }

    /// Start a submission.
    ///
    /// # Errors
    ///
    /// Only an awaiting or failed checkout can be submitted.
    pub const fn begin_submit(self) -> Result<Self, CheckoutTransitionError> {
        match self {
            Self::AwaitingSubmit | Self::Failed => Ok(Self::Submitting),
            phase => Err(CheckoutTransitionError {
                phase,
                action: "submit",
            }),
        }
    }

    /// Settle a submission.
    ///
    /// # Errors
    ///
    /// Only a submitting checkout can be resolved.
    pub const fn resolve(self, outcome: SubmitOutcome) -> Result<Self, CheckoutTransitionError> {
        match (self, outcome) {
            (Self::Submitting, SubmitOutcome::Success) => Ok(Self::Succeeded),
            (Self::Submitting, SubmitOutcome::Failure) => Ok(Self::Failed),
            (phase, _) => Err(CheckoutTransitionError {
                phase,
                action: "resolve",
            }),
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Empty | Self::Succeeded)
    }

    /// Whether the cart must be cleared on entering this phase.
    #[must_use]
    pub const fn clears_cart(self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

impl fmt::Display for CheckoutPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Empty => "empty",
            Self::AwaitingSubmit => "awaiting submit",
            Self::Submitting => "submitting",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        })
    }
}

/// JSON body sent to the order intake endpoint.
///
/// Serializes as `{ ...form_fields, "cart": [...], "total": "$30.00" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    #[serde(flatten)]
    form_fields: BTreeMap<String, String>,
    cart: Cart,
    total: String,
}

impl OrderRequest {
    /// Build a request, dropping form fields that collide with the snapshot.
    #[must_use]
    pub fn new(mut form_fields: BTreeMap<String, String>, cart: Cart, total: String) -> Self {
        form_fields.retain(|name, _| !RESERVED_FIELDS.contains(&name.as_str()));
        Self {
            form_fields,
            cart,
            total,
        }
    }

    #[must_use]
    pub const fn form_fields(&self) -> &BTreeMap<String, String> {
        &self.form_fields
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn total(&self) -> &str {
        &self.total
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{CartItem, Size};

    fn tee_cart() -> Cart {
        [CartItem::new("Tee", Decimal::new(2000, 2), Size::M, "a.jpg").unwrap()]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_empty_cart_has_no_summary() {
        assert_eq!(CheckoutPage::from_cart(&Cart::new()), CheckoutPage::Empty);
    }

    #[test]
    fn test_single_tee_totals() {
        let CheckoutPage::Populated(summary) = CheckoutPage::from_cart(&tee_cart()) else {
            panic!("expected populated checkout");
        };
        assert_eq!(summary.subtotal, "$20.00");
        assert_eq!(summary.shipping, "$10.00");
        assert_eq!(summary.grand_total, "$30.00");
        assert_eq!(summary.grand_total_amount(), Decimal::new(30, 0));
        assert_eq!(
            summary.lines,
            vec![CheckoutLine {
                name: "Tee".to_string(),
                size_label: "M",
                price: "$20.00".to_string(),
            }]
        );
    }

    #[test]
    fn test_phase_happy_path() {
        let phase = CheckoutPhase::for_cart(&tee_cart());
        assert_eq!(phase, CheckoutPhase::AwaitingSubmit);
        let phase = phase.begin_submit().unwrap();
        let phase = phase.resolve(SubmitOutcome::Success).unwrap();
        assert_eq!(phase, CheckoutPhase::Succeeded);
        assert!(phase.clears_cart());
        assert!(phase.is_terminal());
    }

    #[test]
    fn test_phase_failure_allows_resubmit() {
        let failed = CheckoutPhase::AwaitingSubmit
            .begin_submit()
            .and_then(|p| p.resolve(SubmitOutcome::Failure))
            .unwrap();
        assert_eq!(failed, CheckoutPhase::Failed);
        assert!(!failed.clears_cart());
        assert_eq!(failed.begin_submit(), Ok(CheckoutPhase::Submitting));
    }

    #[test]
    fn test_phase_rejects_invalid_transitions() {
        let err = CheckoutPhase::Empty.begin_submit().unwrap_err();
        assert_eq!(err.to_string(), "cannot submit while checkout is empty");
        assert!(CheckoutPhase::Submitting.begin_submit().is_err());
        assert!(CheckoutPhase::AwaitingSubmit.resolve(SubmitOutcome::Success).is_err());
        assert!(CheckoutPhase::Succeeded.begin_submit().is_err());
    }

    #[test]
    fn test_order_request_body_shape() {
        let fields = BTreeMap::from([
            ("name".to_string(), "Ada".to_string()),
            ("email".to_string(), "ada@example.com".to_string()),
            ("total".to_string(), "$0.01".to_string()),
        ]);
        let request = OrderRequest::new(fields, tee_cart(), "$30.00".to_string());
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "name": "Ada",
                "email": "ada@example.com",
                "cart": [{"name": "Tee", "price": 20.0, "size": "m", "image": "a.jpg"}],
                "total": "$30.00",
            })
        );
    }
}
