//! The cart store.

use bandstore_storage::{Backend, StorageError, Store};

use crate::cart::persist::{self, PayloadRef};
use crate::cart::{CartState, LineItem, MAX_QUANTITY_PER_ITEM, MAX_UNIT_PRICE};
use crate::config::CartConfig;
use crate::error::{CartError, ConfigError, RestoreError};
use crate::events::{CartEvent, Subscriber, SubscriptionId, Subscribers};
use crate::ids::ItemId;
use crate::money::Currency;
use crate::notify::{self, Notifier, TracingNotifier};

/// Whether the last write reached storage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Persistence {
    #[default]
    Healthy,
    /// Writes are failing; state lives in memory only.
    Degraded { reason: String },
}

impl Persistence {
    pub fn is_healthy(&self) -> bool {
        matches!(self, Persistence::Healthy)
    }
}

/// Outcome of [`CartStore::change_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// Item now has this quantity.
    Updated(u32),
    /// Quantity dropped to zero or below and the item was removed.
    Removed,
    /// No item with that id.
    NotFound,
}

/// Owner of the cart's line items and their stored mirror.
///
/// Every mutation writes the full item list to storage before returning.
/// When a write fails the store keeps going from memory, reports
/// [`Persistence::Degraded`] and warns the user once.
pub struct CartStore<B> {
    items: Vec<LineItem>,
    storage: Store<B>,
    key: String,
    currency: Currency,
    persistence: Persistence,
    /// Whether the current degraded episode has been reported.
    warned: bool,
    subscribers: Subscribers,
    notifier: Box<dyn Notifier>,
}

impl<B: Backend> CartStore<B> {
    /// Open the store, restoring any items saved under `key`.
    ///
    /// Restore problems are logged and leave the cart empty; they never fail
    /// the open.
    pub fn open(backend: B, key: impl Into<String>, currency: Currency) -> Self {
        let key = key.into();
        let storage = Store::new(backend);

        let (items, persistence) = match restore(&storage, &key, currency) {
            Ok(Some(restored)) => {
                if restored.dropped > 0 {
                    tracing::warn!(
                        key = %key,
                        dropped = restored.dropped,
                        "dropped invalid cart entries during restore"
                    );
                }
                if restored.version < persist::PAYLOAD_VERSION {
                    tracing::info!(
                        key = %key,
                        from = restored.version,
                        to = persist::PAYLOAD_VERSION,
                        "cart payload will be migrated on next write"
                    );
                }
                (restored.items, Persistence::Healthy)
            }
            Ok(None) => (Vec::new(), Persistence::Healthy),
            Err(RestoreError::Storage(e)) => {
                tracing::warn!(key = %key, error = %e, "cart storage unreadable, starting empty");
                (
                    Vec::new(),
                    Persistence::Degraded {
                        reason: e.to_string(),
                    },
                )
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "ignoring stored cart, starting empty");
                (Vec::new(), Persistence::Healthy)
            }
        };

        tracing::debug!(key = %key, items = items.len(), "cart store opened");

        Self {
            items,
            storage,
            key,
            currency,
            persistence,
            warned: false,
            subscribers: Subscribers::default(),
            notifier: Box::new(TracingNotifier),
        }
    }

    /// Open using the key and currency from `config`.
    pub fn from_config(backend: B, config: &CartConfig) -> Result<Self, ConfigError> {
        let currency = config.currency()?;
        Ok(Self::open(backend, config.storage_key.clone(), currency))
    }

    /// Replace the notifier.
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Tear down the store and hand back the backend.
    ///
    /// If storage was degraded, one final write is attempted first.
    pub fn close(mut self) -> B {
        if !self.persistence.is_healthy() {
            let change = self.persist();
            self.report(change);
        }
        tracing::debug!(key = %self.key, items = self.items.len(), "cart store closed");
        self.storage.into_backend()
    }

    /// Add one unit of an item.
    ///
    /// Increments the quantity if `id` is already in the cart, otherwise
    /// appends it with quantity 1. Returns the new quantity.
    pub fn add_item(
        &mut self,
        id: impl Into<ItemId>,
        name: impl Into<String>,
        unit_price: i64,
        image: impl Into<String>,
    ) -> Result<u32, CartError> {
        let id = id.into();
        let name = name.into();

        if id.is_blank() {
            return Err(CartError::EmptyId);
        }
        if unit_price < 0 {
            return Err(CartError::NegativePrice {
                id: id.into_inner(),
                price: unit_price,
            });
        }
        if unit_price > MAX_UNIT_PRICE {
            return Err(CartError::PriceTooLarge {
                id: id.into_inner(),
                price: unit_price,
                max: MAX_UNIT_PRICE,
            });
        }

        let quantity = match self.position(id.as_str()) {
            Some(index) => {
                let item = &mut self.items[index];
                if item.quantity >= MAX_QUANTITY_PER_ITEM {
                    return Err(CartError::QuantityExceedsLimit {
                        id: id.into_inner(),
                        requested: i64::from(item.quantity) + 1,
                        max: MAX_QUANTITY_PER_ITEM,
                    });
                }
                item.quantity += 1;
                item.quantity
            }
            None => {
                // Checked non-negative above.
                let price = unit_price as u64;
                self.items
                    .push(LineItem::new(id.clone(), name.as_str(), price, image));
                1
            }
        };

        tracing::debug!(id = %id, quantity, "added item to cart");
        let change = self.persist();
        self.notifier.notify(&notify::added_to_cart(&name));
        self.emit(CartEvent::ItemAdded { id, quantity });
        self.report(change);
        Ok(quantity)
    }

    /// Remove an item. Unknown ids are a no-op.
    ///
    /// Returns whether an item was removed.
    pub fn remove_item(&mut self, id: &str) -> bool {
        let removed = match self.position(id) {
            Some(index) => Some(self.items.remove(index)),
            None => None,
        };

        let change = self.persist();

        let found = match removed {
            Some(item) => {
                tracing::debug!(id = %item.id, "removed item from cart");
                self.emit(CartEvent::ItemRemoved { id: item.id });
                true
            }
            None => {
                tracing::debug!(id, "remove ignored, item not in cart");
                false
            }
        };
        self.report(change);
        found
    }

    /// Adjust an item's quantity by `delta`.
    ///
    /// A result of zero or less removes the item. Unknown ids are a no-op.
    pub fn change_quantity(&mut self, id: &str, delta: i64) -> Result<QuantityChange, CartError> {
        let Some(index) = self.position(id) else {
            tracing::debug!(id, delta, "quantity change ignored, item not in cart");
            return Ok(QuantityChange::NotFound);
        };

        let current = i64::from(self.items[index].quantity);
        let next = current.checked_add(delta).unwrap_or(i64::MAX);

        if next <= 0 {
            self.remove_item(id);
            return Ok(QuantityChange::Removed);
        }
        if next > i64::from(MAX_QUANTITY_PER_ITEM) {
            return Err(CartError::QuantityExceedsLimit {
                id: id.to_string(),
                requested: next,
                max: MAX_QUANTITY_PER_ITEM,
            });
        }

        // Bounded by MAX_QUANTITY_PER_ITEM above.
        let quantity = next as u32;
        let item = &mut self.items[index];
        item.quantity = quantity;
        let id = item.id.clone();

        tracing::debug!(id = %id, delta, quantity, "changed item quantity");
        let change = self.persist();
        self.emit(CartEvent::QuantityChanged { id, quantity });
        self.report(change);
        Ok(QuantityChange::Updated(quantity))
    }

    /// Remove every item and persist the empty cart.
    pub fn clear(&mut self) {
        self.items.clear();
        tracing::debug!(key = %self.key, "cleared cart");
        let change = self.persist();
        self.emit(CartEvent::Cleared);
        self.report(change);
    }

    /// Snapshot of the items and their total.
    pub fn state(&self) -> CartState {
        CartState::from_items(&self.items, self.currency)
    }

    /// Borrow an item by id.
    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id.as_str() == id)
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    pub fn persistence(&self) -> &Persistence {
        &self.persistence
    }

    /// Send a message through the store's notifier.
    pub fn notify(&mut self, message: &str) {
        self.notifier.notify(message);
    }

    /// Register a subscriber for change events.
    ///
    /// The subscriber immediately receives a `Restored` event with the
    /// current state so it can render once.
    pub fn subscribe(&mut self, subscriber: impl Subscriber + 'static) -> SubscriptionId {
        let mut subscriber = Box::new(subscriber);
        subscriber.on_event(
            &CartEvent::Restored {
                items: self.items.len(),
            },
            &self.state(),
        );
        self.subscribers.add(subscriber)
    }

    /// Remove a subscriber. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn backend(&self) -> &B {
        self.storage.backend()
    }

    pub fn backend_mut(&mut self) -> &mut B {
        self.storage.backend_mut()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|i| i.id.as_str() == id)
    }

    /// Write the items and update the persistence state.
    ///
    /// Returns the health event to announce once the caller has reported
    /// its own change.
    fn persist(&mut self) -> Option<CartEvent> {
        let payload = PayloadRef::new(&self.items);
        match self.storage.set(&self.key, &payload) {
            Ok(()) => {
                if self.persistence.is_healthy() {
                    return None;
                }
                tracing::info!(key = %self.key, "cart storage recovered");
                self.persistence = Persistence::Healthy;
                self.warned = false;
                Some(CartEvent::PersistenceRecovered)
            }
            Err(e) => self.degrade(e),
        }
    }

    fn degrade(&mut self, error: StorageError) -> Option<CartEvent> {
        tracing::warn!(
            key = %self.key,
            error = %error,
            "failed to persist cart, keeping state in memory"
        );

        let reason = error.to_string();
        self.persistence = Persistence::Degraded {
            reason: reason.clone(),
        };
        if self.warned {
            return None;
        }
        self.warned = true;
        Some(CartEvent::PersistenceDegraded { reason })
    }

    fn report(&mut self, change: Option<CartEvent>) {
        let Some(event) = change else {
            return;
        };
        if matches!(event, CartEvent::PersistenceDegraded { .. }) {
            self.notifier.notify(notify::MSG_STORAGE_UNAVAILABLE);
        }
        self.emit(event);
    }

    fn emit(&mut self, event: CartEvent) {
        if self.subscribers.is_empty() {
            return;
        }
        let state = self.state();
        self.subscribers.emit(&event, &state);
    }
}

impl<B> std::fmt::Debug for CartStore<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("items", &self.items)
            .field("currency", &self.currency)
            .field("persistence", &self.persistence)
            .field("subscribers", &self.subscribers)
            .finish_non_exhaustive()
    }
}

fn restore<B: Backend>(
    storage: &Store<B>,
    key: &str,
    currency: Currency,
) -> Result<Option<persist::Restored>, RestoreError> {
    match storage.get_raw(key)? {
        Some(raw) => Ok(Some(persist::decode(&raw, currency)?)),
        None => Ok(None),
    }
}
