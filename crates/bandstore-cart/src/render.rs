//! Display data for cart and checkout summaries.

use std::cell::RefCell;
use std::fmt::Write as _;
use std::rc::Rc;

use serde::Serialize;

use crate::cart::CartState;
use crate::events::{CartEvent, Subscriber};

/// Shown in place of the item list when the cart is empty.
pub const EMPTY_CART_TEXT: &str = "Your cart is empty";

/// Line item display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_price: String,
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub total: String,
    pub item_count: u64,
}

impl From<&CartState> for CartView {
    fn from(state: &CartState) -> Self {
        let currency = state.currency();
        let items = state
            .items
            .iter()
            .map(|item| CartItemView {
                id: item.id.to_string(),
                name: item.name.clone(),
                image: item.image.clone(),
                quantity: item.quantity,
                unit_price: item.unit_money(currency).display(),
                line_price: item.line_total(currency).display(),
            })
            .collect();

        let total = state.total.display();
        Self {
            items,
            subtotal: total.clone(),
            total,
            item_count: state.item_count(),
        }
    }
}

impl CartView {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Plain-text cart page: one line per item, then the total.
    pub fn render_text(&self) -> String {
        if self.is_empty() {
            return format!("{EMPTY_CART_TEXT}\nTotal: {}\n", self.total);
        }

        let mut out = String::new();
        for item in &self.items {
            let _ = writeln!(
                out,
                "{} x{} @ {} = {}",
                item.name, item.quantity, item.unit_price, item.line_price
            );
        }
        let _ = writeln!(out, "Subtotal: {}", self.subtotal);
        let _ = writeln!(out, "Total: {}", self.total);
        out
    }

    /// Checkout page summary lines: `name xN` and the line price.
    pub fn checkout_lines(&self) -> Vec<(String, String)> {
        self.items
            .iter()
            .map(|item| (format!("{} x{}", item.name, item.quantity), item.line_price.clone()))
            .collect()
    }
}

/// Subscriber that keeps the latest view. Clones share the same view.
#[derive(Debug, Clone, Default)]
pub struct LiveView {
    inner: Rc<RefCell<LiveViewInner>>,
}

#[derive(Debug, Default)]
struct LiveViewInner {
    view: Option<CartView>,
    renders: usize,
}

impl LiveView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent view, if the store has emitted anything yet.
    pub fn current(&self) -> Option<CartView> {
        self.inner.borrow().view.clone()
    }

    /// How many times the view was rebuilt.
    pub fn renders(&self) -> usize {
        self.inner.borrow().renders
    }
}

impl Subscriber for LiveView {
    fn on_event(&mut self, _event: &CartEvent, state: &CartState) {
        let mut inner = self.inner.borrow_mut();
        inner.view = Some(CartView::from(state));
        inner.renders += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{CartStore, LineItem};
    use crate::money::Currency;
    use bandstore_storage::MemoryBackend;

    #[test]
    fn test_view_from_state() {
        let mut tee = LineItem::new("p1", "Tee", 129_900, "tee.png");
        tee.quantity = 2;
        let state = CartState::from_items(&[tee], Currency::INR);

        let view = CartView::from(&state);
        assert_eq!(view.items[0].unit_price, "\u{20b9}1,299");
        assert_eq!(view.items[0].line_price, "\u{20b9}2,598");
        assert_eq!(view.total, "\u{20b9}2,598");
        assert_eq!(view.item_count, 2);
        assert_eq!(
            view.checkout_lines(),
            vec![("Tee x2".to_string(), "\u{20b9}2,598".to_string())]
        );
    }

    #[test]
    fn test_empty_text() {
        let view = CartView::from(&CartState::from_items(&[], Currency::INR));
        assert_eq!(view.render_text(), "Your cart is empty\nTotal: \u{20b9}0\n");
    }

    #[test]
    fn test_render_text() {
        let state = CartState::from_items(&[LineItem::new("p1", "Cap", 30_000, "cap.png")], Currency::INR);
        assert_eq!(
            CartView::from(&state).render_text(),
            "Cap x1 @ \u{20b9}300 = \u{20b9}300\nSubtotal: \u{20b9}300\nTotal: \u{20b9}300\n"
        );
    }

    #[test]
    fn test_live_view_tracks_store() {
        let mut store = CartStore::open(MemoryBackend::new(), "sm_cart", Currency::INR);
        let live = LiveView::new();
        store.subscribe(live.clone());

        assert_eq!(live.renders(), 1);
        assert!(live.current().unwrap().is_empty());

        store.add_item("p1", "Tee", 50_000, "tee.png").unwrap();
        store.change_quantity("p1", 2).unwrap();

        let view = live.current().unwrap();
        assert_eq!(live.renders(), 3);
        assert_eq!(view.items[0].quantity, 3);
        assert_eq!(view.total, "\u{20b9}1,500");
    }
}
