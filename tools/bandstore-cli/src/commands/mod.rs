//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod checkout;

use clap::Args;

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Item id.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Unit price in minor units (paise, cents).
    #[arg(allow_negative_numbers = true)]
    pub price: i64,

    /// Image URI.
    #[arg(short, long, default_value = "")]
    pub image: String,
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Item id.
    pub id: String,
}

/// Arguments for the qty command.
#[derive(Args)]
pub struct QtyArgs {
    /// Item id.
    pub id: String,

    /// Signed change, e.g. 2 or -1.
    #[arg(allow_negative_numbers = true)]
    pub delta: i64,
}

/// Arguments for the clear command.
#[derive(Args)]
pub struct ClearArgs {
    /// Confirm removing every item; required when the cart is not empty.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the add-product command.
#[derive(Args)]
pub struct AddProductArgs {
    /// Position of the product on its page.
    #[arg(long, default_value = "0")]
    pub index: usize,

    /// Product name as displayed.
    pub name: String,

    /// Price text as displayed, e.g. "₹1,299".
    #[arg(short, long)]
    pub price: Option<String>,

    /// Product image URI.
    #[arg(short, long)]
    pub image: String,

    /// The page has no add control for this product.
    #[arg(long)]
    pub no_control: bool,
}

/// Arguments for the add-ticket command.
#[derive(Args)]
pub struct AddTicketArgs {
    /// Position of the tour date on its page.
    #[arg(long, default_value = "0")]
    pub index: usize,

    /// City of the show.
    pub city: String,

    /// Date as displayed.
    pub date: String,

    /// Buy button text, e.g. "₹2,499".
    #[arg(short, long, default_value = "")]
    pub button: String,
}
