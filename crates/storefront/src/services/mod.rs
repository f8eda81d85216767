//! Business logic services for storefront.
//!
//! # Services
//!
//! - `cart_store` - Session-backed cart slot
//! - `order_intake` - Client for the third-party order intake endpoint
//! - `submissions` - One-in-flight order submission guard

pub mod cart_store;
pub mod order_intake;
pub mod submissions;

pub use cart_store::SessionCartStore;
pub use order_intake::{OrderIntakeClient, OrderIntakeError};
pub use submissions::{SubmissionGuard, SubmissionTicket};
