//! Cart mutations.
//!
//! A [`CartController`] is built per request from the visitor's store. Every
//! mutation persists before returning, and returns the updated [`Cart`] so the
//! caller can render it straight away.

use rust_decimal::Decimal;

use crate::store::{CartStore, CartStoreError};
use crate::types::{Cart, CartItem};

/// Owns one visitor's cart and the store it is persisted to.
#[derive(Debug)]
pub struct CartController<S> {
    store: S,
    cart: Cart,
}

impl<S: CartStore> CartController<S> {
    /// Restore the cart from `store`.
    pub async fn load(store: S) -> Self {
        let cart = store.load().await;
        Self { store, cart }
    }

    /// The current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Append `item` and persist the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write; the item is not kept
    /// in that case.
    pub async fn add_item(&mut self, item: CartItem) -> Result<&Cart, CartStoreError> {
        self.cart.push(item);
        if let Err(e) = self.store.save(&self.cart).await {
            self.cart.pop();
            return Err(e);
        }
        Ok(&self.cart)
    }

    /// Sum of item prices.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.cart.total()
    }

    /// Empty the cart and remove the persisted slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot remove the slot; the in-memory
    /// cart is left untouched in that case.
    pub async fn clear_cart(&mut self) -> Result<&Cart, CartStoreError> {
        self.store.clear().await?;
        self.cart.clear();
        Ok(&self.cart)
    }

    /// Consume the controller, returning the cart.
    #[must_use]
    pub fn into_cart(self) -> Cart {
        self.cart
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::MemoryCartStore;
    use crate::types::Size;

    /// Store whose writes always fail.
    struct BrokenStore;

    impl CartStore for BrokenStore {
        async fn load(&self) -> Cart {
            Cart::new()
        }

        async fn save(&self, _cart: &Cart) -> Result<(), CartStoreError> {
            Err(CartStoreError::Backend("disk full".to_string()))
        }

        async fn clear(&self) -> Result<(), CartStoreError> {
            Err(CartStoreError::Backend("disk full".to_string()))
        }
    }

    fn item(name: &str, cents: i64) -> CartItem {
        CartItem::new(name, Decimal::new(cents, 2), Size::M, "a.jpg").unwrap()
    }

    #[tokio::test]
    async fn test_add_item_tracks_total_and_length() {
        let mut controller = CartController::load(MemoryCartStore::new()).await;
        let prices = [2000, 1999, 1, 0, 4550];
        for (i, cents) in prices.iter().enumerate() {
            let cart = controller.add_item(item("Tee", *cents)).await.unwrap();
            assert_eq!(cart.len(), i + 1);
        }
        let expected: Decimal = prices.iter().map(|c| Decimal::new(*c, 2)).sum();
        assert_eq!(controller.total(), expected);
    }

    #[tokio::test]
    async fn test_add_item_persists_every_mutation() {
        let store = MemoryCartStore::new();
        let mut controller = CartController::load(store.clone()).await;
        controller.add_item(item("Tee", 2000)).await.unwrap();
        controller.add_item(item("Cap", 1500)).await.unwrap();

        let restored = CartController::load(store).await;
        assert_eq!(restored.cart(), controller.cart());
        assert_eq!(restored.cart().items()[1].name(), "Cap");
    }

    #[tokio::test]
    async fn test_clear_cart_removes_slot() {
        let store = MemoryCartStore::new();
        let mut controller = CartController::load(store.clone()).await;
        controller.add_item(item("Tee", 2000)).await.unwrap();

        assert!(controller.clear_cart().await.unwrap().is_empty());
        assert!(store.raw().is_none());
        assert!(CartController::load(store).await.cart().is_empty());
    }

    #[tokio::test]
    async fn test_failed_save_does_not_keep_item() {
        let mut controller = CartController::load(BrokenStore).await;
        assert!(controller.add_item(item("Tee", 2000)).await.is_err());
        assert!(controller.cart().is_empty());
    }

    #[tokio::test]
    async fn test_failed_clear_keeps_cart() {
        let store = MemoryCartStore::new();
        store
            .save(&[item("Tee", 2000)].into_iter().collect())
            .await
            .unwrap();
        let mut controller = CartController {
            store: BrokenStore,
            cart: store.load().await,
        };
        assert!(controller.clear_cart().await.is_err());
        assert_eq!(controller.into_cart().len(), 1);
    }
}
