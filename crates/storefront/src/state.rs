//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::cart::{CartStore, FileStorage, StorageError};
use crate::config::StorefrontConfig;

/// The cart type served by the storefront.
pub type Cart = CartStore<FileStorage>;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The cart sits behind an async
/// mutex so concurrent requests are applied one at a time, keeping a single
/// logical writer.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cart: Mutex<Cart>,
}

impl AppState {
    /// Create a new application state, opening and hydrating the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage directory cannot be created.
    pub fn new(config: &StorefrontConfig) -> Result<Self, StorageError> {
        let storage = FileStorage::open(&config.cart.storage_dir)?;
        let cart = CartStore::with_key(storage, config.cart.storage_key.clone())
            .currency(config.currency);
        Ok(Self::with_cart(cart))
    }

    /// Create a state around an existing cart.
    ///
    /// Registers the change logger and hydrates the cart.
    #[must_use]
    pub fn with_cart(mut cart: Cart) -> Self {
        cart.subscribe(|event, items| {
            tracing::info!(?event, item_count = items.len(), "Cart changed");
        });
        cart.hydrate();

        Self {
            inner: Arc::new(AppStateInner {
                cart: Mutex::new(cart),
            }),
        }
    }

    /// Get the shopper's cart.
    #[must_use]
    pub fn cart(&self) -> &Mutex<Cart> {
        &self.inner.cart
    }
}
