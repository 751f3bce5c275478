//! Scripted checkout flow.

use bandstore_storage::Backend;
use serde::Serialize;

use crate::cart::{CartStore, LineItem};
use crate::config::CheckoutConfig;
use crate::error::CheckoutError;
use crate::ids::OrderId;
use crate::money::Money;
use crate::notify;

/// Steps in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CheckoutStep {
    /// Cart review, nothing submitted yet.
    Review,
    /// Order submitted, waiting on the simulated processor.
    Encrypting,
    /// Order accepted and cart cleared.
    Complete,
    /// Redirect delay elapsed.
    Redirected,
}

impl CheckoutStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Review => "review",
            CheckoutStep::Encrypting => "encrypting",
            CheckoutStep::Complete => "complete",
            CheckoutStep::Redirected => "redirected",
        }
    }
}

/// Summary of a completed checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutReceipt {
    pub order_id: OrderId,
    /// Items as they were when the order was placed.
    pub items: Vec<LineItem>,
    pub total: Money,
    /// Page the UI should navigate to.
    pub redirect_to: String,
}

/// Simulated order completion.
///
/// No payment is taken. The flow shows progress notifications, waits the
/// configured delays and clears the cart.
#[derive(Debug, Clone)]
pub struct CheckoutFlow {
    config: CheckoutConfig,
    step: CheckoutStep,
}

impl CheckoutFlow {
    pub fn new(config: CheckoutConfig) -> Self {
        Self {
            config,
            step: CheckoutStep::Review,
        }
    }

    /// Current step.
    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Complete the order for everything in `store`.
    ///
    /// An empty cart is rejected before any notification or delay.
    pub async fn complete<B: Backend>(
        &mut self,
        store: &mut CartStore<B>,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        let state = store.state();
        if state.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let order_id = OrderId::generate();
        tracing::info!(
            order_id = %order_id,
            items = state.len(),
            total = state.total.amount_minor,
            "starting checkout"
        );

        self.step = CheckoutStep::Encrypting;
        store.notify(notify::MSG_ENCRYPTING_ORDER);
        tokio::time::sleep(self.config.encrypt_delay()).await;

        store.notify(notify::MSG_ORDER_COMPLETE);
        store.clear();
        self.step = CheckoutStep::Complete;
        tracing::info!(order_id = %order_id, "checkout complete");

        tokio::time::sleep(self.config.redirect_delay()).await;
        self.step = CheckoutStep::Redirected;

        Ok(CheckoutReceipt {
            order_id,
            items: state.items,
            total: state.total,
            redirect_to: self.config.redirect_to.clone(),
        })
    }
}
