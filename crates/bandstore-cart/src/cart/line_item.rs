//! Line item type.

use serde::{Deserialize, Serialize};

use crate::ids::ItemId;
use crate::money::{Currency, Money};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: u32 = 9999;

/// Maximum unit price in minor units.
pub const MAX_UNIT_PRICE: i64 = 1_000_000_000_000;

/// One purchasable entry in the cart.
///
/// Serialized field names match the stored layout:
/// `{id, name, price, image, quantity}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Key of the purchasable entity.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Unit price in minor units.
    #[serde(rename = "price")]
    pub unit_price: u64,
    /// Image URI.
    pub image: String,
    /// Quantity, at least 1 while the item is in a cart.
    pub quantity: u32,
}

impl LineItem {
    /// Create a line item with quantity 1.
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        unit_price: u64,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit_price,
            image: image.into(),
            quantity: 1,
        }
    }

    /// Unit price as money.
    pub fn unit_money(&self, currency: Currency) -> Money {
        Money::new(self.unit_price, currency)
    }

    /// `unit_price × quantity`.
    ///
    /// Bounded by `MAX_UNIT_PRICE × MAX_QUANTITY_PER_ITEM`, which fits in a u64.
    pub fn line_total(&self, currency: Currency) -> Money {
        self.unit_money(currency)
            .checked_mul(u64::from(self.quantity))
            .unwrap_or(Money::new(u64::MAX, currency))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_has_quantity_one() {
        let item = LineItem::new("p1", "Tee", 500, "img1");
        assert_eq!(item.quantity, 1);
        assert_eq!(item.id.as_str(), "p1");
    }

    #[test]
    fn test_line_total() {
        let mut item = LineItem::new("p1", "Tee", 500, "img1");
        item.quantity = 3;
        assert_eq!(item.line_total(Currency::INR).amount_minor, 1500);
    }

    #[test]
    fn test_stored_field_names() {
        let item = LineItem::new("p1", "Tee", 500, "img1");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "p1",
                "name": "Tee",
                "price": 500,
                "image": "img1",
                "quantity": 1
            })
        );
    }

    #[test]
    fn test_max_line_total_fits() {
        let mut item = LineItem::new("p1", "Vault", MAX_UNIT_PRICE as u64, "img");
        item.quantity = MAX_QUANTITY_PER_ITEM;
        let total = item.line_total(Currency::INR).amount_minor;
        assert_eq!(total, MAX_UNIT_PRICE as u64 * u64::from(MAX_QUANTITY_PER_ITEM));
    }
}
