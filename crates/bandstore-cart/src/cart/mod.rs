//! Shopping cart module.
//!
//! Contains the line item type, the read-only state snapshot, the stored
//! layout and the store that owns them.

mod line_item;
mod persist;
mod state;
mod store;

pub use line_item::{LineItem, MAX_QUANTITY_PER_ITEM, MAX_UNIT_PRICE};
pub use persist::PAYLOAD_VERSION;
pub use state::CartState;
pub use store::{CartStore, Persistence, QuantityChange};
