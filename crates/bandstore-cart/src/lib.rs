//! Persisted shopping cart for the bandstore site.
//!
//! - **Cart**: [`CartStore`] owns the line items and mirrors them to storage
//!   after every mutation
//! - **Events**: subscribers get a [`CartEvent`] and fresh state after each change
//! - **Catalog**: derives item ids and prices from scraped shop entries
//! - **Checkout**: scripted order completion that clears the cart
//!
//! # Example
//!
//! ```rust
//! use bandstore_cart::prelude::*;
//! use bandstore_storage::MemoryBackend;
//!
//! let mut store = CartStore::open(MemoryBackend::new(), "sm_cart", Currency::INR);
//! store.add_item("p1", "Tee", 500, "img1").unwrap();
//! store.add_item("p1", "Tee", 500, "img1").unwrap();
//! store.change_quantity("p1", -1).unwrap();
//!
//! let state = store.state();
//! assert_eq!(state.items[0].quantity, 1);
//! assert_eq!(state.total.amount_minor, 500);
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod events;
pub mod ids;
pub mod money;
pub mod notify;
pub mod render;

pub use cart::{CartState, CartStore, LineItem, Persistence, QuantityChange};
pub use config::CartConfig;
pub use error::{CartError, CheckoutError, ConfigError};
pub use events::{CartEvent, Subscriber, SubscriptionId};
pub use ids::{ItemId, OrderId};
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{
        CartState, CartStore, LineItem, Persistence, QuantityChange, MAX_QUANTITY_PER_ITEM,
        MAX_UNIT_PRICE,
    };
    pub use crate::catalog::{Binding, CatalogBinder, CatalogEntry};
    pub use crate::checkout::{CheckoutFlow, CheckoutReceipt, CheckoutStep};
    pub use crate::config::CartConfig;
    pub use crate::error::{CartError, CheckoutError, ConfigError};
    pub use crate::events::{CartEvent, Subscriber, SubscriptionId};
    pub use crate::ids::{ItemId, OrderId};
    pub use crate::money::{Currency, Money};
    pub use crate::notify::{Notifier, RecordingNotifier, ToastQueue, TracingNotifier};
    pub use crate::render::{CartView, LiveView};
}
