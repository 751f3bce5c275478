//! User-visible notifications.
//!
//! A [`Notifier`] is a fire-and-forget sink for short text messages. The
//! store sends one on every add, checkout sends progress messages, and the
//! store warns once when storage stops working.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Shown while the checkout is "processing".
pub const MSG_ENCRYPTING_ORDER: &str = "Encrypting order...";

/// Shown when the checkout completes.
pub const MSG_ORDER_COMPLETE: &str = "Vault Transaction Successful!";

/// Shown once when storage stops accepting writes.
pub const MSG_STORAGE_UNAVAILABLE: &str =
    "Cart could not be saved. Your items are kept until you leave the page.";

/// Confirmation text for an add.
pub fn added_to_cart(name: &str) -> String {
    format!("{name} added to cart!")
}

/// Sink for notification messages.
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&mut self, message: &str) {
        tracing::info!(target: "bandstore::notify", "{message}");
    }
}

/// Collects messages in order. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    messages: Rc<RefCell<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages received so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    /// Remove and return all messages.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.messages.borrow_mut())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

/// A message on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub shown_at: Instant,
    pub expires_at: Instant,
}

impl Toast {
    pub fn is_visible_at(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Auto-dismissing toast stack. Clones share the same stack.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    toasts: Rc<RefCell<Vec<Toast>>>,
    dismiss_after: Duration,
}

impl ToastQueue {
    pub fn new(dismiss_after: Duration) -> Self {
        Self {
            toasts: Rc::default(),
            dismiss_after,
        }
    }

    /// Add a toast shown at `now`.
    pub fn push_at(&self, message: impl Into<String>, now: Instant) {
        self.toasts.borrow_mut().push(Toast {
            message: message.into(),
            shown_at: now,
            expires_at: now + self.dismiss_after,
        });
    }

    /// Messages still on screen at `now`, oldest first.
    pub fn visible_at(&self, now: Instant) -> Vec<String> {
        self.toasts
            .borrow()
            .iter()
            .filter(|t| t.is_visible_at(now))
            .map(|t| t.message.clone())
            .collect()
    }

    /// Drop dismissed toasts. Returns how many were removed.
    pub fn prune(&self, now: Instant) -> usize {
        let mut toasts = self.toasts.borrow_mut();
        let before = toasts.len();
        toasts.retain(|t| t.is_visible_at(now));
        before - toasts.len()
    }

    pub fn len(&self) -> usize {
        self.toasts.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.borrow().is_empty()
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(Duration::from_millis(3000))
    }
}

impl Notifier for ToastQueue {
    fn notify(&mut self, message: &str) {
        self.push_at(message, Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_added_message() {
        assert_eq!(added_to_cart("Daily Essential Tee"), "Daily Essential Tee added to cart!");
    }

    #[test]
    fn test_recording_notifier_shares_buffer() {
        let recorder = RecordingNotifier::new();
        let mut sink = recorder.clone();
        sink.notify("one");
        sink.notify("two");

        assert_eq!(recorder.messages(), vec!["one", "two"]);
        assert_eq!(recorder.take(), vec!["one", "two"]);
        assert!(recorder.messages().is_empty());
    }

    #[test]
    fn test_toasts_dismiss() {
        let queue = ToastQueue::new(Duration::from_millis(3000));
        let start = Instant::now();
        queue.push_at("first", start);
        queue.push_at("second", start + Duration::from_millis(1000));

        assert_eq!(queue.visible_at(start), vec!["first", "second"]);
        assert_eq!(
            queue.visible_at(start + Duration::from_millis(3500)),
            vec!["second"]
        );
        assert_eq!(queue.prune(start + Duration::from_millis(5000)), 2);
        assert!(queue.is_empty());
    }
}
