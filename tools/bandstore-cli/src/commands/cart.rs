//! Direct cart commands: add, remove, qty, show, clear.

use anyhow::{bail, Result};
use bandstore_cart::render::CartView;
use bandstore_cart::QuantityChange;

use super::{AddArgs, ClearArgs, QtyArgs, RemoveArgs};
use crate::context::Context;

/// Run the add command.
pub async fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    let quantity = store.add_item(args.id.as_str(), args.name, args.price, args.image)?;
    ctx.output.debug(&format!("{} now has quantity {}", args.id, quantity));
    finish(store, ctx);
    Ok(())
}

/// Run the remove command.
pub async fn remove(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    if store.remove_item(&args.id) {
        ctx.output.success(&format!("Removed {}", args.id));
    } else {
        ctx.output.info(&format!("{} is not in the cart", args.id));
    }
    finish(store, ctx);
    Ok(())
}

/// Run the qty command.
pub async fn qty(args: QtyArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    match store.change_quantity(&args.id, args.delta)? {
        QuantityChange::Updated(quantity) => {
            ctx.output.success(&format!("{} quantity is now {}", args.id, quantity))
        }
        QuantityChange::Removed => ctx.output.success(&format!("Removed {}", args.id)),
        QuantityChange::NotFound => ctx.output.info(&format!("{} is not in the cart", args.id)),
    }
    finish(store, ctx);
    Ok(())
}

/// Run the show command.
pub async fn show(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    ctx.output.cart(&CartView::from(&store.state()));
    store.close();
    Ok(())
}

/// Run the clear command.
pub async fn clear(args: ClearArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    check_clear(args.yes, store.len())?;
    store.clear();
    ctx.output.success("Cart cleared");
    finish(store, ctx);
    Ok(())
}

/// A non-empty cart is only cleared when confirmed with `--yes`.
fn check_clear(yes: bool, items: usize) -> Result<()> {
    if !yes && items > 0 {
        bail!("Refusing to remove {} item(s) without --yes", items);
    }
    Ok(())
}

/// Print the cart and report storage problems before closing.
pub(crate) fn finish<B: bandstore_storage::Backend>(
    store: bandstore_cart::CartStore<B>,
    ctx: &Context,
) {
    if let bandstore_cart::Persistence::Degraded { reason } = store.persistence() {
        ctx.output.warn(&format!("Cart was not saved: {}", reason));
    }
    ctx.output.cart(&CartView::from(&store.state()));
    store.close();
}
