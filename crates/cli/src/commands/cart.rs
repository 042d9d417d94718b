//! Cart inspection and editing commands.
//!
//! # Usage
//!
//! ```bash
//! # Show the persisted cart
//! gk-cli cart show
//!
//! # Add an item
//! gk-cli cart add --id 3498 --slug grand-theft-auto-v --name "Grand Theft Auto V" \
//!     --price 23.99 --original-price 29.99 --platform "Steam Key"
//!
//! # Remove an item / empty the cart
//! gk-cli cart remove 3498
//! gk-cli cart clear
//!
//! # Fill the cart with the fallback games at demo prices
//! gk-cli cart seed
//! ```
//!
//! # Environment Variables
//!
//! Same as the storefront: `CART_STORAGE_DIR`, `CART_STORAGE_KEY`,
//! `STOREFRONT_CURRENCY`.

use gamekey_core::{CartItem, CartItemError, Price, ProductId};
use gamekey_storefront::cart::{CartStorage, CartStore, FileStorage, StorageError};
use gamekey_storefront::catalog::{DemoPrice, FALLBACK_GAMES};
use gamekey_storefront::config::{ConfigError, StorefrontConfig};
use rand::Rng;
use thiserror::Error;

/// Errors that can occur while running cart commands.
#[derive(Debug, Error)]
pub enum CartCommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Storage directory could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Item prices are out of range.
    #[error("Invalid item: {0}")]
    InvalidItem(#[from] CartItemError),
}

/// Open the configured cart and hydrate it.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the storage directory
/// cannot be created.
pub fn open() -> Result<CartStore<FileStorage>, CartCommandError> {
    let config = StorefrontConfig::from_env()?;
    let storage = FileStorage::open(&config.cart.storage_dir)?;

    tracing::debug!(
        dir = %storage.dir().display(),
        key = %config.cart.storage_key,
        "Opening cart"
    );

    let mut cart = CartStore::with_key(storage, config.cart.storage_key).currency(config.currency);
    cart.hydrate();
    Ok(cart)
}

/// Log the cart contents and order summary.
pub fn show<S: CartStorage>(cart: &CartStore<S>) {
    if cart.is_empty() {
        tracing::info!("Your cart is empty");
        return;
    }

    let summary = cart.summary();
    let currency = summary.total.currency_code;
    let noun = if summary.item_count == 1 { "Item" } else { "Items" };
    tracing::info!("{} {}", summary.item_count, noun);

    for item in cart.items() {
        tracing::info!(
            "  [{}] {} ({}) {} (was {})",
            item.id,
            item.name,
            item.platform,
            item.price_in(currency),
            Price::new(item.original_price, currency),
        );
    }

    tracing::info!("Subtotal: {}", summary.subtotal);
    tracing::info!("Discount: -{}", summary.savings);
    tracing::info!("Total:    {}", summary.total);
}

/// Add an item, returning whether it was new.
///
/// # Errors
///
/// Returns an error if a price is negative or above the item price limit.
pub fn add<S: CartStorage>(
    cart: &mut CartStore<S>,
    item: CartItem,
) -> Result<bool, CartCommandError> {
    item.check_prices()?;

    let id = item.id;
    let name = item.name.clone();
    let added = cart.add_to_cart(item);
    report_persistence(cart);

    if added {
        tracing::info!("Added {} ({}) to cart", name, id);
    } else {
        tracing::info!("Product {} is already in the cart", id);
    }
    Ok(added)
}

/// Remove an item, returning whether it was present.
pub fn remove<S: CartStorage>(cart: &mut CartStore<S>, id: ProductId) -> bool {
    let removed = cart.remove_from_cart(id);
    report_persistence(cart);

    match &removed {
        Some(item) => tracing::info!("Removed {} ({}) from cart", item.name, id),
        None => tracing::info!("Product {} is not in the cart", id),
    }
    removed.is_some()
}

/// Empty the cart.
pub fn clear<S: CartStorage>(cart: &mut CartStore<S>) {
    let count = cart.item_count();
    cart.clear_cart();
    report_persistence(cart);
    tracing::info!("Cleared {} item(s) from cart", count);
}

/// Add every fallback game at a freshly generated demo price.
///
/// Returns the number of games that were not already in the cart.
pub fn seed<S: CartStorage, R: Rng + ?Sized>(cart: &mut CartStore<S>, rng: &mut R) -> usize {
    let mut added = 0;
    for game in FALLBACK_GAMES {
        let price = DemoPrice::generate(rng);
        if cart.add_to_cart(game.to_cart_item(&price)) {
            added += 1;
            tracing::info!(
                "Seeded {} at {} (-{}%)",
                game.name,
                price.price,
                price.discount_percent
            );
        }
    }
    report_persistence(cart);
    tracing::info!("Seeded {} new item(s), cart now has {}", added, cart.item_count());
    added
}

/// Warn when the last change stayed in memory only.
fn report_persistence<S: CartStorage>(cart: &CartStore<S>) {
    if let Some(e) = cart.last_persist_error() {
        tracing::warn!("Cart change was not saved: {e}");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use gamekey_storefront::cart::MemoryStorage;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rust_decimal::Decimal;

    use super::*;

    fn item(id: i32) -> CartItem {
        CartItem {
            id: ProductId::new(id),
            slug: format!("game-{id}"),
            name: format!("Game {id}"),
            image: String::new(),
            price: Decimal::new(999, 2),
            original_price: Decimal::new(1999, 2),
            platform: "PC".to_string(),
        }
    }

    #[test]
    fn test_add_remove_clear() {
        let mut cart = CartStore::new(MemoryStorage::new());

        assert!(add(&mut cart, item(1)).unwrap());
        assert!(!add(&mut cart, item(1)).unwrap());
        assert!(add(&mut cart, item(2)).unwrap());
        show(&cart);

        assert!(remove(&mut cart, ProductId::new(1)));
        assert!(!remove(&mut cart, ProductId::new(1)));
        assert_eq!(cart.item_count(), 1);

        clear(&mut cart);
        assert!(cart.is_empty());
        assert!(!cart.storage().contains(cart.key()));
        show(&cart);
    }

    #[test]
    fn test_add_rejects_out_of_range_prices() {
        let mut cart = CartStore::new(MemoryStorage::new());

        let mut negative_reference = item(1);
        negative_reference.original_price = Decimal::new(-5, 0);
        assert!(matches!(
            add(&mut cart, negative_reference),
            Err(CartCommandError::InvalidItem(CartItemError::NegativePrice))
        ));

        let mut huge = item(2);
        huge.price = Decimal::from_i128_with_scale(5 * 10_i128.pow(28), 0);
        assert!(matches!(
            add(&mut cart, huge),
            Err(CartCommandError::InvalidItem(CartItemError::PriceTooHigh))
        ));

        assert!(cart.is_empty());
        assert!(!cart.storage().contains(cart.key()));
    }

    #[test]
    fn test_seed_is_idempotent_by_id() {
        let mut cart = CartStore::new(MemoryStorage::new());
        let mut rng = StdRng::seed_from_u64(42);

        assert_eq!(seed(&mut cart, &mut rng), FALLBACK_GAMES.len());
        let total = cart.total();
        assert!(total > Decimal::ZERO);

        assert_eq!(seed(&mut cart, &mut rng), 0);
        assert_eq!(cart.item_count(), FALLBACK_GAMES.len());
        assert_eq!(cart.total(), total);
    }
}
