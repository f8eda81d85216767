//! Core types for Harbor Threads.
//!
//! This module provides type-safe wrappers for the storefront's domain values.

pub mod cart;
pub mod email;
pub mod price;
pub mod size;

pub use cart::{Cart, CartItem, CartItemError};
pub use email::{Email, EmailError};
pub use price::{CurrencyCode, Price};
pub use size::{Size, SizeError};
