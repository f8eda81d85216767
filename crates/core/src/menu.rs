//! Slide-out cart menu projection.

use crate::types::{Cart, CartItem, CurrencyCode, Price};

/// Message shown in place of lines when the cart is empty.
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty.";

/// One rendered cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartMenuLine {
    pub name: String,
    pub image: String,
    /// Upper-cased size for display.
    pub size_label: &'static str,
    pub price: String,
}

/// Everything the cart panel and the header badge show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartMenu {
    pub lines: Vec<CartMenuLine>,
    pub total: String,
    pub count: usize,
    pub badge_visible: bool,
    pub empty_message: Option<&'static str>,
}

impl CartMenu {
    /// Project `cart` using `currency` for amounts.
    #[must_use]
    pub fn project(cart: &Cart, currency: CurrencyCode) -> Self {
        let lines = cart
            .iter()
            .map(|item| CartMenuLine::project(item, currency))
            .collect();
        let count = cart.len();

        Self {
            lines,
            total: Price::new(cart.total(), currency).display(),
            count,
            badge_visible: count > 0,
            empty_message: cart.is_empty().then_some(EMPTY_CART_MESSAGE),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl From<&Cart> for CartMenu {
    fn from(cart: &Cart) -> Self {
        Self::project(cart, CurrencyCode::default())
    }
}

impl CartMenuLine {
    fn project(item: &CartItem, currency: CurrencyCode) -> Self {
        Self {
            name: item.name().to_string(),
            image: item.image().to_string(),
            size_label: item.size().label(),
            price: Price::new(item.price(), currency).display(),
        }
    }
}
