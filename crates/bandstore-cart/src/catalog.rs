//! Catalog binder.
//!
//! Turns entries scraped from the shop pages into add-to-cart bindings. The
//! page scraping itself lives with the UI; this module only decides ids,
//! names, prices and labels.

use bandstore_storage::Backend;

use crate::cart::CartStore;
use crate::config::CatalogConfig;
use crate::error::CartError;
use crate::ids::ItemId;
use crate::money::{Currency, Money};

/// Characters of the product name kept in its id.
const ID_NAME_PREFIX: usize = 5;

/// Label for free items.
pub const LABEL_FREE: &str = "Download Free";

/// Label for priced items.
pub const LABEL_ADD: &str = "Add to Cart";

/// A purchasable entry found on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEntry {
    /// Merch, fan-club item or showcase item.
    Product {
        /// Position among products on the page.
        index: usize,
        name: Option<String>,
        price_text: Option<String>,
        image: Option<String>,
        /// Whether the page already has an add control for this entry.
        has_add_control: bool,
    },
    /// Tour date.
    Ticket {
        /// Position among tickets on the page.
        index: usize,
        city: Option<String>,
        date: Option<String>,
        /// Text of the buy button; usually carries the price.
        button_text: Option<String>,
    },
}

/// Everything needed to wire an add control to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub id: ItemId,
    pub name: String,
    /// Unit price in minor units.
    pub unit_price: u64,
    pub image: String,
    /// Text for a control the binder creates.
    pub label: &'static str,
    /// Page to go to after adding, if any.
    pub redirect_to: Option<String>,
}

impl Binding {
    /// Add this binding's item to the store.
    pub fn add_to<B: Backend>(&self, store: &mut CartStore<B>) -> Result<u32, CartError> {
        let price = i64::try_from(self.unit_price).unwrap_or(i64::MAX);
        store.add_item(self.id.clone(), self.name.clone(), price, self.image.clone())
    }
}

/// Derives bindings from catalog entries.
#[derive(Debug, Clone)]
pub struct CatalogBinder {
    currency: Currency,
    ticket_price: u64,
    ticket_image: String,
    cart_page: String,
}

impl CatalogBinder {
    pub fn new(config: &CatalogConfig, currency: Currency) -> Self {
        Self {
            currency,
            ticket_price: config.ticket_price,
            ticket_image: config.ticket_image.clone(),
            cart_page: config.cart_page.clone(),
        }
    }

    /// Bind a single entry.
    ///
    /// Returns `None` for entries missing the fields needed to sell them.
    pub fn bind(&self, entry: &CatalogEntry) -> Option<Binding> {
        match entry {
            CatalogEntry::Product {
                index,
                name: Some(name),
                price_text,
                image: Some(image),
                has_add_control,
            } => {
                let major = price_text.as_deref().and_then(parse_price).unwrap_or(0);
                let unit_price = self.to_minor(major)?;
                let kind = if *has_add_control { "product" } else { "merch" };
                let prefix: String = name.chars().take(ID_NAME_PREFIX).collect();

                Some(Binding {
                    id: ItemId::new(format!("{kind}-{index}-{prefix}")),
                    name: name.clone(),
                    unit_price,
                    image: image.clone(),
                    label: if unit_price == 0 { LABEL_FREE } else { LABEL_ADD },
                    redirect_to: None,
                })
            }
            CatalogEntry::Ticket {
                index,
                city: Some(city),
                date: Some(date),
                button_text: Some(button_text),
            } => {
                let major = parse_price(button_text)
                    .filter(|p| *p > 0)
                    .unwrap_or(self.ticket_price);
                let unit_price = self.to_minor(major)?;

                Some(Binding {
                    id: ItemId::new(format!("ticket-{index}-{city}")),
                    name: format!("Ticket: {city} ({date})"),
                    unit_price,
                    image: self.ticket_image.clone(),
                    label: LABEL_ADD,
                    redirect_to: Some(self.cart_page.clone()),
                })
            }
            _ => {
                tracing::debug!(?entry, "skipping incomplete catalog entry");
                None
            }
        }
    }

    /// Bind every usable entry, in page order.
    pub fn bind_all<'a>(&self, entries: impl IntoIterator<Item = &'a CatalogEntry>) -> Vec<Binding> {
        entries.into_iter().filter_map(|e| self.bind(e)).collect()
    }

    fn to_minor(&self, major: u64) -> Option<u64> {
        let money = Money::from_major(major, self.currency);
        if money.is_none() {
            tracing::warn!(price = major, "catalog price overflows, skipping entry");
        }
        money.map(|m| m.amount_minor)
    }
}

/// Extract a whole-unit price from display text by keeping only digits.
///
/// `"₹2,499"` → `Some(2499)`. Returns `None` when there are no digits or the
/// number does not fit.
pub fn parse_price(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogConfig;

    fn binder() -> CatalogBinder {
        CatalogBinder::new(&CatalogConfig::default(), Currency::INR)
    }

    fn product(index: usize, name: &str, price: &str, has_add_control: bool) -> CatalogEntry {
        CatalogEntry::Product {
            index,
            name: Some(name.to_string()),
            price_text: Some(price.to_string()),
            image: Some("tee.png".to_string()),
            has_add_control,
        }
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("\u{20b9}2,499"), Some(2499));
        assert_eq!(parse_price("Buy - Rs. 999 /-"), Some(999));
        assert_eq!(parse_price("Free"), None);
        assert_eq!(parse_price("99999999999999999999999"), None);
    }

    #[test]
    fn test_product_with_control() {
        let binding = binder()
            .bind(&product(2, "Daily Essential Tee", "\u{20b9}1,299", true))
            .unwrap();

        assert_eq!(binding.id.as_str(), "product-2-Daily");
        assert_eq!(binding.unit_price, 129_900);
        assert_eq!(binding.label, LABEL_ADD);
        assert_eq!(binding.redirect_to, None);
    }

    #[test]
    fn test_product_without_control_is_merch() {
        let binding = binder().bind(&product(0, "Cap", "Free", false)).unwrap();
        assert_eq!(binding.id.as_str(), "merch-0-Cap");
        assert_eq!(binding.unit_price, 0);
        assert_eq!(binding.label, LABEL_FREE);
    }

    #[test]
    fn test_name_prefix_counts_chars() {
        let binding = binder().bind(&product(1, "Nayaab Hoodie", "500", true)).unwrap();
        assert_eq!(binding.id.as_str(), "product-1-Nayaa");
    }

    #[test]
    fn test_ticket_binding() {
        let entry = CatalogEntry::Ticket {
            index: 3,
            city: Some("London".to_string()),
            date: Some("14 Nov".to_string()),
            button_text: Some("Buy \u{20b9}3,999".to_string()),
        };
        let binding = binder().bind(&entry).unwrap();

        assert_eq!(binding.id.as_str(), "ticket-3-London");
        assert_eq!(binding.name, "Ticket: London (14 Nov)");
        assert_eq!(binding.unit_price, 399_900);
        assert_eq!(binding.image, CatalogConfig::default().ticket_image);
        assert_eq!(binding.redirect_to.as_deref(), Some("cart.html"));
    }

    #[test]
    fn test_ticket_default_price() {
        let entry = CatalogEntry::Ticket {
            index: 0,
            city: Some("Delhi".to_string()),
            date: Some("1 Jan".to_string()),
            button_text: Some("Get Tickets".to_string()),
        };
        assert_eq!(binder().bind(&entry).unwrap().unit_price, 249_900);
    }

    #[test]
    fn test_incomplete_entries_skipped() {
        let entries = vec![
            CatalogEntry::Product {
                index: 0,
                name: None,
                price_text: Some("100".into()),
                image: Some("x".into()),
                has_add_control: true,
            },
            CatalogEntry::Product {
                index: 1,
                name: Some("Tee".into()),
                price_text: None,
                image: None,
                has_add_control: true,
            },
            CatalogEntry::Ticket {
                index: 0,
                city: Some("Pune".into()),
                date: None,
                button_text: Some("Buy".into()),
            },
            product(2, "Poster", "150", true),
        ];

        let bindings = binder().bind_all(&entries);
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].id.as_str(), "product-2-Poste");
    }

    #[test]
    fn test_binding_adds_to_store() {
        use bandstore_storage::MemoryBackend;

        let mut store = CartStore::open(MemoryBackend::new(), "sm_cart", Currency::INR);
        let binding = binder().bind(&product(0, "Tee", "500", true)).unwrap();

        binding.add_to(&mut store).unwrap();
        binding.add_to(&mut store).unwrap();

        let state = store.state();
        assert_eq!(state.get("product-0-Tee").unwrap().quantity, 2);
        assert_eq!(state.total.amount_minor, 100_000);
    }
}
