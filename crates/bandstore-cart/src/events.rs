//! Change notifications emitted by the cart store.

use crate::cart::CartState;
use crate::ids::ItemId;

/// Something that changed in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// Items were loaded from storage at open.
    Restored { items: usize },
    /// An item was added or its quantity bumped by an add.
    ItemAdded { id: ItemId, quantity: u32 },
    /// An item's quantity changed.
    QuantityChanged { id: ItemId, quantity: u32 },
    /// An item left the cart.
    ItemRemoved { id: ItemId },
    /// All items were removed.
    Cleared,
    /// Storage stopped accepting writes; the store now runs from memory.
    PersistenceDegraded { reason: String },
    /// Storage accepted a write again.
    PersistenceRecovered,
}

/// Receives store events together with the state after the change.
pub trait Subscriber {
    fn on_event(&mut self, event: &CartEvent, state: &CartState);
}

impl<F> Subscriber for F
where
    F: FnMut(&CartEvent, &CartState),
{
    fn on_event(&mut self, event: &CartEvent, state: &CartState) {
        self(event, state)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Registry of subscribers, notified in subscription order.
#[derive(Default)]
pub(crate) struct Subscribers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Box<dyn Subscriber>)>,
}

impl Subscribers {
    pub fn add(&mut self, subscriber: Box<dyn Subscriber>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, subscriber));
        id
    }

    pub fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(sid, _)| *sid != id);
        self.entries.len() < before
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn emit(&mut self, event: &CartEvent, state: &CartState) {
        for (_, subscriber) in &mut self.entries {
            subscriber.on_event(event, state);
        }
    }
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.entries.len())
            .finish()
    }
}
