//! Persisted cart slot.
//!
//! A [`CartStore`] owns one slot holding the cart as a JSON array. Reads fail
//! soft: a missing or unreadable slot is an empty cart, never an error.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;

use crate::types::Cart;

/// Name of the slot the cart is persisted under.
pub const CART_SLOT_KEY: &str = "cart";

/// Errors writing to the cart slot.
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// The cart could not be encoded.
    #[error("failed to encode cart: {0}")]
    Encode(#[from] serde_json::Error),

    /// The backing storage rejected the write.
    #[error("cart storage unavailable: {0}")]
    Backend(String),
}

/// Storage for a single visitor's cart.
pub trait CartStore: Send + Sync {
    /// Read the persisted cart, or an empty cart if there is none or it
    /// cannot be read.
    fn load(&self) -> impl Future<Output = Cart> + Send;

    /// Overwrite the slot with `cart`.
    fn save(&self, cart: &Cart) -> impl Future<Output = Result<(), CartStoreError>> + Send;

    /// Remove the slot.
    fn clear(&self) -> impl Future<Output = Result<(), CartStoreError>> + Send;
}

/// Decode a raw slot value, falling back to an empty cart.
#[must_use]
pub fn decode_cart(raw: &str) -> Cart {
    serde_json::from_str(raw).map_or_else(|e| discard(&e), decode_cart_value)
}

/// Decode a slot value that has already been parsed as JSON, falling back to
/// an empty cart.
#[must_use]
pub fn decode_cart_value(value: serde_json::Value) -> Cart {
    serde_json::from_value(value).unwrap_or_else(|e| discard(&e))
}

fn discard(error: &serde_json::Error) -> Cart {
    tracing::warn!(error = %error, "Discarding unreadable persisted cart");
    Cart::new()
}

/// In-memory cart slot holding the serialized JSON text.
///
/// Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryCartStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryCartStore {
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot pre-filled with arbitrary raw content.
    #[must_use]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(raw.into()))),
        }
    }

    /// The raw slot content, if any.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CartStore for MemoryCartStore {
    async fn load(&self) -> Cart {
        self.raw().map_or_else(Cart::new, |raw| decode_cart(&raw))
    }

    async fn save(&self, cart: &Cart) -> Result<(), CartStoreError> {
        let encoded = serde_json::to_string(cart)?;
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(encoded);
        Ok(())
    }

    async fn clear(&self) -> Result<(), CartStoreError> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        Ok(())
    }
}
