//! Read-only cart snapshot.

use serde::Serialize;

use crate::cart::LineItem;
use crate::money::{Currency, Money};

/// Ordered items plus a freshly computed total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartState {
    /// Items in insertion order.
    pub items: Vec<LineItem>,
    /// Σ(unit_price × quantity).
    pub total: Money,
}

impl CartState {
    /// Build a snapshot, computing the total from scratch.
    ///
    /// A total too large for a u64 is clamped to `u64::MAX` and logged.
    pub fn from_items(items: &[LineItem], currency: Currency) -> Self {
        let total = items
            .iter()
            .try_fold(Money::zero(currency), |acc, item| {
                acc.checked_add(&item.line_total(currency))
            })
            .unwrap_or_else(|| {
                tracing::warn!(items = items.len(), "cart total overflows, clamping");
                Money::new(u64::MAX, currency)
            });

        Self {
            items: items.to_vec(),
            total,
        }
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Number of distinct line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up an item by id.
    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id.as_str() == id)
    }

    pub fn currency(&self) -> Currency {
        self.total.currency
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price: u64, quantity: u32) -> LineItem {
        let mut item = LineItem::new(id, id, price, "img");
        item.quantity = quantity;
        item
    }

    #[test]
    fn test_total_and_count() {
        let state = CartState::from_items(&[item("a", 500, 2), item("b", 300, 1)], Currency::INR);
        assert_eq!(state.total.amount_minor, 1300);
        assert_eq!(state.item_count(), 3);
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_total_overflow_clamps() {
        let items: Vec<LineItem> = (0..2000)
            .map(|i| item(&format!("p{i}"), 1_000_000_000_000, 9999))
            .collect();
        let state = CartState::from_items(&items, Currency::INR);
        assert_eq!(state.total.amount_minor, u64::MAX);
        assert_eq!(state.total.currency, Currency::INR);
    }

    #[test]
    fn test_empty_state() {
        let state = CartState::from_items(&[], Currency::INR);
        assert!(state.is_empty());
        assert!(state.total.is_zero());
    }
}
