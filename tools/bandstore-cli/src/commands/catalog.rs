//! Catalog commands: add a product or ticket the way a page button would.

use anyhow::{bail, Result};
use bandstore_cart::catalog::{Binding, CatalogBinder, CatalogEntry};

use super::cart::finish;
use super::{AddProductArgs, AddTicketArgs};
use crate::context::Context;

/// Run the add-product command.
pub async fn add_product(args: AddProductArgs, ctx: &Context) -> Result<()> {
    let entry = CatalogEntry::Product {
        index: args.index,
        name: Some(args.name),
        price_text: args.price,
        image: Some(args.image),
        has_add_control: !args.no_control,
    };
    add_entry(&entry, ctx)
}

/// Run the add-ticket command.
pub async fn add_ticket(args: AddTicketArgs, ctx: &Context) -> Result<()> {
    let entry = CatalogEntry::Ticket {
        index: args.index,
        city: Some(args.city),
        date: Some(args.date),
        button_text: Some(args.button),
    };
    add_entry(&entry, ctx)
}

fn add_entry(entry: &CatalogEntry, ctx: &Context) -> Result<()> {
    let binder = CatalogBinder::new(&ctx.config.cart.catalog, ctx.config.cart.currency()?);
    let Some(binding) = binder.bind(entry) else {
        bail!("Catalog entry is missing a name, image or price");
    };

    let mut store = ctx.open_store()?;
    describe(&binding, ctx);
    binding.add_to(&mut store)?;
    finish(store, ctx);

    if let Some(page) = &binding.redirect_to {
        ctx.output.info(&format!("Continue to {}", page));
    }
    Ok(())
}

fn describe(binding: &Binding, ctx: &Context) {
    ctx.output.debug(&format!(
        "{} [{}] bound to {} ({} minor units)",
        binding.name, binding.label, binding.id, binding.unit_price
    ));
}
