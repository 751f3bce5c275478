//! Checkout module.
//!
//! Contains the scripted checkout flow that completes an order and clears
//! the cart.

mod flow;

pub use flow::{CheckoutFlow, CheckoutReceipt, CheckoutStep};
