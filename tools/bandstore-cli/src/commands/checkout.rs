//! Checkout command.

use anyhow::Result;
use bandstore_cart::checkout::CheckoutFlow;
use bandstore_cart::render::CartView;

use crate::context::Context;

/// Run the checkout command.
pub async fn run(ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;

    let view = CartView::from(&store.state());
    if !view.is_empty() {
        ctx.output.header("Order summary");
        for (label, value) in view.checkout_lines() {
            ctx.output.kv(&label, &value);
        }
    }

    let mut flow = CheckoutFlow::new(ctx.config.cart.checkout.clone());
    let receipt = flow.complete(&mut store).await?;

    if ctx.output.is_json() {
        ctx.output.json(&receipt);
    } else {
        ctx.output.kv("Order", receipt.order_id.as_str());
        ctx.output.kv("Charged", &receipt.total.to_string());
        ctx.output.info(&format!("Continue to {}", receipt.redirect_to));
    }

    if !store.persistence().is_healthy() {
        ctx.output.warn("The cart could not be cleared on disk");
    }
    store.close();
    Ok(())
}
