//! Cart and cart item types.
//!
//! The cart serializes as a bare JSON array of items:
//!
//! ```json
//! [{"name": "Tee", "price": 20.0, "size": "m", "image": "/static/img/tee.jpg"}]
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::size::Size;

/// Errors that can occur when building a [`CartItem`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartItemError {
    /// The item has no name.
    #[error("cart item name cannot be empty")]
    EmptyName,
    /// The price is below zero.
    #[error("cart item price cannot be negative (got {0})")]
    NegativePrice(Decimal),
}

/// A single line in the cart.
///
/// Items are immutable once added. There is no quantity: adding the same
/// product twice produces two entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCartItem")]
pub struct CartItem {
    name: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    price: Decimal,
    size: Size,
    image: String,
}

/// Unchecked wire form, validated through `TryFrom`.
#[derive(Deserialize)]
struct RawCartItem {
    name: String,
    #[serde(deserialize_with = "rust_decimal::serde::float::deserialize")]
    price: Decimal,
    size: Size,
    image: String,
}

impl TryFrom<RawCartItem> for CartItem {
    type Error = CartItemError;

    fn try_from(raw: RawCartItem) -> Result<Self, Self::Error> {
        Self::new(raw.name, raw.price, raw.size, raw.image)
    }
}

impl CartItem {
    /// Create a cart item.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the price is negative.
    pub fn new(
        name: impl Into<String>,
        price: Decimal,
        size: Size,
        image: impl Into<String>,
    ) -> Result<Self, CartItemError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CartItemError::EmptyName);
        }
        if price < Decimal::ZERO {
            return Err(CartItemError::NegativePrice(price));
        }
        Ok(Self {
            name,
            price,
            size,
            image: image.into(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn price(&self) -> Decimal {
        self.price
    }

    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }
}

/// An ordered collection of cart items; insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart(Vec<CartItem>);

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append an item.
    pub fn push(&mut self, item: CartItem) {
        self.0.push(item);
    }

    pub(crate) fn pop(&mut self) -> Option<CartItem> {
        self.0.pop()
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CartItem> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of item prices.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.0.iter().map(CartItem::price).sum()
    }
}

impl FromIterator<CartItem> for Cart {
    fn from_iter<I: IntoIterator<Item = CartItem>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
