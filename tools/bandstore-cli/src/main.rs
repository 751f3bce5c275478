//! Bandstore CLI - drive the merch and ticket cart from a terminal.
//!
//! Commands:
//! - `bandstore add` - Add one unit of an item
//! - `bandstore add-product` - Add a product as a catalog button would
//! - `bandstore add-ticket` - Add a tour date ticket
//! - `bandstore remove` - Remove an item
//! - `bandstore qty` - Change an item's quantity
//! - `bandstore show` - Print the cart
//! - `bandstore clear` - Empty the cart
//! - `bandstore checkout` - Complete the order

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AddArgs, AddProductArgs, AddTicketArgs, ClearArgs, QtyArgs, RemoveArgs};

/// Bandstore CLI - manage the storefront cart
#[derive(Parser)]
#[command(name = "bandstore")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Directory holding cart data
    #[arg(long, global = true)]
    data_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add one unit of an item
    Add(AddArgs),

    /// Add a product from a catalog page
    AddProduct(AddProductArgs),

    /// Add a ticket for a tour date
    AddTicket(AddTicketArgs),

    /// Remove an item from the cart
    Remove(RemoveArgs),

    /// Change the quantity of an item
    Qty(QtyArgs),

    /// Show the cart
    Show,

    /// Remove everything from the cart
    Clear(ClearArgs),

    /// Complete the order
    Checkout,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = output::Output::new(cli.verbose, cli.json);

    let ctx = match context::Context::load(cli.config.as_deref(), cli.data_dir.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Add(args) => commands::cart::add(args, &ctx).await,
        Commands::AddProduct(args) => commands::catalog::add_product(args, &ctx).await,
        Commands::AddTicket(args) => commands::catalog::add_ticket(args, &ctx).await,
        Commands::Remove(args) => commands::cart::remove(args, &ctx).await,
        Commands::Qty(args) => commands::cart::qty(args, &ctx).await,
        Commands::Show => commands::cart::show(&ctx).await,
        Commands::Clear(args) => commands::cart::clear(args, &ctx).await,
        Commands::Checkout => commands::checkout::run(&ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
