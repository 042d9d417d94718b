//! Shopping cart state.
//!
//! # Architecture
//!
//! - [`CartStore`] holds the item list and the derived totals
//! - [`CartStorage`] is the durable slot the list is mirrored into
//!   ([`FileStorage`] on disk, [`MemoryStorage`] for tests)
//! - [`CartEvent`] listeners replace framework reactivity: anything that
//!   displays the cart subscribes and is called after each change

pub mod events;
pub mod storage;
pub mod store;

pub use events::{CartEvent, Listener, SubscriptionId};
pub use storage::{CartStorage, FileStorage, MemoryStorage, StorageError, is_valid_key};
pub use store::{CartStore, CartSummary, DEFAULT_CART_KEY, PersistError};
