//! Change notifications for cart observers.
//!
//! UI collaborators (navbar badge, cart page, add-to-cart controls) register
//! a callback with [`CartStore::subscribe`](super::CartStore::subscribe) and
//! are called after every mutation that changed the cart.

use gamekey_core::{CartItem, ProductId};
use serde::Serialize;

/// What changed in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartEvent {
    /// The item list was loaded from storage.
    Hydrated { count: usize },
    /// An item was appended.
    Added { id: ProductId },
    /// An item was removed.
    Removed { id: ProductId },
    /// The cart was emptied.
    Cleared,
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

/// Callback invoked with the event and the cart's items after the change.
pub type Listener = Box<dyn FnMut(&CartEvent, &[CartItem]) + Send>;
