//! Integration tests for GameKey.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p gamekey-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart store over real files
//! - `cart_api` - HTTP cart endpoints driven in-process
//!
//! Shared fixtures live in this library.

use std::path::Path;

use gamekey_core::{CartItem, ProductId};
use gamekey_storefront::config::StorefrontConfig;
use gamekey_storefront::state::AppState;
use rust_decimal::Decimal;

/// A cart item with a price in cents and a reference price twice as high.
#[must_use]
pub fn sample_item(id: i32, price_cents: i64) -> CartItem {
    CartItem {
        id: ProductId::new(id),
        slug: format!("game-{id}"),
        name: format!("Game {id}"),
        image: format!("/images/game-{id}.png"),
        price: Decimal::new(price_cents, 2),
        original_price: Decimal::new(price_cents * 2, 2),
        platform: "Steam Key".to_string(),
    }
}

/// Storefront configuration storing the cart under `dir`.
///
/// # Panics
///
/// Panics if the default configuration fails to load.
#[must_use]
pub fn test_config(dir: &Path) -> StorefrontConfig {
    let dir = dir.to_string_lossy().into_owned();
    StorefrontConfig::from_lookup(|key| (key == "CART_STORAGE_DIR").then(|| dir.clone()))
        .expect("test configuration is valid")
}

/// Application state with a file-backed cart under `dir`.
///
/// # Panics
///
/// Panics if the storage directory cannot be created.
#[must_use]
pub fn test_state(dir: &Path) -> AppState {
    AppState::new(&test_config(dir)).expect("storage directory can be created")
}
