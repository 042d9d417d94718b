//! The shopper's cart and its persistence.
//!
//! [`CartStore`] owns the authoritative item list for one shopper session and
//! mirrors it into a single storage slot after every mutation. Storage is a
//! convenience: if it fails, the failure is logged and the in-memory cart
//! keeps working.

use std::collections::HashSet;
use std::fmt;

use gamekey_core::{CartItem, CurrencyCode, Price, ProductId};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::events::{CartEvent, Listener, SubscriptionId};
use super::storage::{CartStorage, StorageError};

/// Storage slot used when none is configured.
pub const DEFAULT_CART_KEY: &str = "cart";

/// Why the last persistence attempt failed.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The item list could not be encoded.
    #[error("failed to encode cart: {0}")]
    Encode(#[from] serde_json::Error),

    /// The storage backend rejected the write or delete.
    #[error("failed to persist cart: {0}")]
    Storage(#[from] StorageError),
}

/// Order-summary figures for the cart page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub item_count: usize,
    /// Sum of reference prices.
    pub subtotal: Price,
    /// Sum of per-item discounts.
    pub savings: Price,
    /// Sum of current prices; what the shopper pays.
    pub total: Price,
}

/// The shopper's cart.
///
/// Items are unique by [`ProductId`] and kept in insertion order. Derived
/// values (`item_count`, `total`, ...) are computed from the list on every
/// call.
///
/// # Example
///
/// ```rust
/// use gamekey_core::{CartItem, ProductId};
/// use gamekey_storefront::cart::{CartStore, MemoryStorage};
/// use rust_decimal::Decimal;
///
/// let mut cart = CartStore::open(MemoryStorage::new());
/// cart.add_to_cart(CartItem {
///     id: ProductId::new(1),
///     slug: "grand-theft-auto-v".into(),
///     name: "Grand Theft Auto V".into(),
///     image: String::new(),
///     price: Decimal::new(1000, 2),
///     original_price: Decimal::new(1250, 2),
///     platform: "PC".into(),
/// });
/// assert_eq!(cart.item_count(), 1);
/// assert_eq!(cart.total(), Decimal::new(10, 0));
/// ```
pub struct CartStore<S> {
    storage: S,
    key: String,
    currency: CurrencyCode,
    items: Vec<CartItem>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    last_persist_error: Option<PersistError>,
}

impl<S> fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("currency", &self.currency)
            .field("items", &self.items)
            .field("listeners", &self.listeners.len())
            .field("last_persist_error", &self.last_persist_error)
            .finish_non_exhaustive()
    }
}

impl<S: CartStorage> CartStore<S> {
    /// Create an empty cart over `storage` using the default slot.
    ///
    /// Nothing is read until [`hydrate`](Self::hydrate) is called.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_CART_KEY)
    }

    /// Create an empty cart over `storage` using a custom slot name.
    #[must_use]
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            currency: CurrencyCode::default(),
            items: Vec::new(),
            listeners: Vec::new(),
            next_subscription: 0,
            last_persist_error: None,
        }
    }

    /// Create a cart over `storage` and hydrate it immediately.
    #[must_use]
    pub fn open(storage: S) -> Self {
        let mut store = Self::new(storage);
        store.hydrate();
        store
    }

    /// Set the currency used by [`summary`](Self::summary).
    #[must_use]
    pub fn currency(mut self, currency: CurrencyCode) -> Self {
        self.currency = currency;
        self
    }

    /// Load the persisted item list, replacing the in-memory one.
    ///
    /// A missing record yields an empty cart. An unreadable or unparseable
    /// record is logged and also yields an empty cart. Duplicate ids in the
    /// record are collapsed, keeping the first occurrence.
    pub fn hydrate(&mut self) {
        self.items = match self.storage.read(&self.key) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<CartItem>>(&raw) {
                Ok(items) => dedup_by_id(items),
                Err(e) => {
                    warn!(key = %self.key, error = %e, "Failed to parse persisted cart, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read persisted cart, starting empty");
                Vec::new()
            }
        };

        debug!(key = %self.key, count = self.items.len(), "Cart hydrated");
        self.notify(&CartEvent::Hydrated {
            count: self.items.len(),
        });
    }

    /// Append `item` unless an item with the same id is already present.
    ///
    /// Returns `true` if the item was added. A duplicate id is a no-op: the
    /// item added first wins, including its price.
    pub fn add_to_cart(&mut self, item: CartItem) -> bool {
        if self.contains(item.id) {
            debug!(id = %item.id, "Item already in cart");
            return false;
        }

        let id = item.id;
        self.items.push(item);
        self.persist();
        self.notify(&CartEvent::Added { id });
        true
    }

    /// Remove the item with `id`, returning it if it was present.
    ///
    /// When the cart becomes empty the persisted record is deleted instead
    /// of being written as an empty list.
    pub fn remove_from_cart(&mut self, id: ProductId) -> Option<CartItem> {
        let Some(index) = self.items.iter().position(|item| item.id == id) else {
            debug!(%id, "Item not in cart, nothing to remove");
            return None;
        };

        let removed = self.items.remove(index);
        self.persist();
        self.notify(&CartEvent::Removed { id });
        Some(removed)
    }

    /// Empty the cart and delete the persisted record.
    pub fn clear_cart(&mut self) {
        let was_empty = self.items.is_empty();
        self.items.clear();
        self.persist();
        if !was_empty {
            self.notify(&CartEvent::Cleared);
        }
    }

    /// Current items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of items in the cart.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether an item with `id` is in the cart.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Sum of current prices.
    #[must_use]
    pub fn total(&self) -> Decimal {
        saturating_sum(self.items.iter().map(|item| item.price))
    }

    /// Sum of reference (pre-discount) prices.
    #[must_use]
    pub fn original_total(&self) -> Decimal {
        saturating_sum(self.items.iter().map(|item| item.original_price))
    }

    /// Sum of per-item savings.
    #[must_use]
    pub fn savings(&self) -> Decimal {
        saturating_sum(self.items.iter().map(CartItem::savings))
    }

    /// Figures for the order-summary panel, in the configured currency.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            item_count: self.item_count(),
            subtotal: Price::new(self.original_total(), self.currency),
            savings: Price::new(self.savings(), self.currency),
            total: Price::new(self.total(), self.currency),
        }
    }

    /// Register a listener called after every effective mutation.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&CartEvent, &[CartItem]) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    /// Error from the most recent persistence attempt, if it failed.
    #[must_use]
    pub const fn last_persist_error(&self) -> Option<&PersistError> {
        self.last_persist_error.as_ref()
    }

    /// Storage slot name.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&mut self) {
        let result = self.try_persist();
        if let Err(e) = &result {
            warn!(key = %self.key, error = %e, "Cart not persisted, keeping in-memory state");
        }
        self.last_persist_error = result.err();
    }

    fn try_persist(&mut self) -> Result<(), PersistError> {
        if self.items.is_empty() {
            self.storage.remove(&self.key)?;
        } else {
            let encoded = serde_json::to_string(&self.items)?;
            self.storage.write(&self.key, &encoded)?;
        }
        Ok(())
    }

    fn notify(&mut self, event: &CartEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event, &self.items);
        }
    }
}

/// Sum that clamps at the `Decimal` range instead of panicking.
///
/// Records loaded from storage are not price-checked, so their sums may
/// exceed what a `Decimal` can hold.
fn saturating_sum(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, Decimal::saturating_add)
}

fn dedup_by_id(items: Vec<CartItem>) -> Vec<CartItem> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(item.id))
        .collect()
}
