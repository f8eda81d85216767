//! Session-backed cart slot.
//!
//! The visitor's cart lives under the `cart` key of their session record as a
//! JSON array, which survives page loads for as long as the session does.

use harbor_core::Cart;
use harbor_core::store::{CART_SLOT_KEY, CartStore, CartStoreError, decode_cart_value};
use tower_sessions::Session;

/// Cart slot stored in the visitor's session.
#[derive(Clone)]
pub struct SessionCartStore {
    session: Session,
}

impl SessionCartStore {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }
}

impl CartStore for SessionCartStore {
    async fn load(&self) -> Cart {
        match self.session.get::<serde_json::Value>(CART_SLOT_KEY).await {
            Ok(Some(value)) => decode_cart_value(value),
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read cart from session");
                Cart::new()
            }
        }
    }

    async fn save(&self, cart: &Cart) -> Result<(), CartStoreError> {
        self.session
            .insert(CART_SLOT_KEY, cart)
            .await
            .map_err(backend)?;
        self.persist().await
    }

    async fn clear(&self) -> Result<(), CartStoreError> {
        self.session
            .remove::<serde_json::Value>(CART_SLOT_KEY)
            .await
            .map_err(backend)?;
        self.persist().await
    }
}

impl SessionCartStore {
    /// Write the session record through to the store now rather than when
    /// the response leaves, so a request that starts after this one returns
    /// sees the new cart.
    async fn persist(&self) -> Result<(), CartStoreError> {
        self.session.save().await.map_err(backend)
    }
}

fn backend(error: tower_sessions::session::Error) -> CartStoreError {
    CartStoreError::Backend(error.to_string())
}
