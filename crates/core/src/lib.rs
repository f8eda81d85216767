//! Harbor Threads Core - storefront domain logic.
//!
//! This crate holds everything the storefront decides without touching the
//! network or rendering HTML:
//! - the cart, its persisted slot, and the controller that mutates it
//! - projections of the cart for the slide-out menu and the checkout page
//! - the checkout state machine and the order request body
//! - product filtering and the page chrome rules (sticky header, fade-in)
//!
//! # Architecture
//!
//! Storage is abstracted behind [`store::CartStore`], so the controller can be
//! driven by the storefront's session slot or by an in-memory slot in tests.
//!
//! # Modules
//!
//! - [`types`] - Cart items, sizes, prices and emails
//! - [`store`] - Persisted cart slot
//! - [`controller`] - Cart mutations
//! - [`menu`] - Cart menu projection
//! - [`checkout`] - Checkout page projection, phases and order request
//! - [`filter`] - Product filter selection
//! - [`chrome`] - Sticky header and fade-in reveal rules

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod chrome;
pub mod controller;
pub mod filter;
pub mod menu;
pub mod store;
pub mod types;

pub use types::*;
