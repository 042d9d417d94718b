//! Catalog data the storefront can fall back on.
//!
//! When the game catalog API is unreachable (or no API key is configured)
//! pages render a small built-in list instead. The same entries seed the cart
//! from the CLI.

pub mod pricing;

use gamekey_core::{CartItem, ProductId};

pub use pricing::{DemoPrice, discounted_price};

/// A game as listed in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogGame {
    pub id: ProductId,
    pub slug: &'static str,
    pub name: &'static str,
    pub background_image: &'static str,
    /// Platform names, primary platform first.
    pub platforms: &'static [&'static str],
    pub metacritic: Option<u8>,
    pub released: Option<&'static str>,
}

/// Built-in games shown when the catalog API is unavailable.
pub const FALLBACK_GAMES: &[CatalogGame] = &[
    CatalogGame {
        id: ProductId::new(1),
        slug: "grand-theft-auto-v",
        name: "Grand Theft Auto V",
        background_image: "/urban-chaos-sunset.png",
        platforms: &["PC", "PlayStation", "Xbox"],
        metacritic: Some(92),
        released: Some("2013-09-17"),
    },
    CatalogGame {
        id: ProductId::new(2),
        slug: "the-witcher-3-wild-hunt",
        name: "The Witcher 3: Wild Hunt",
        background_image: "/weathered-warrior.png",
        platforms: &["PC", "PlayStation", "Xbox"],
        metacritic: Some(93),
        released: Some("2015-05-18"),
    },
];

impl CatalogGame {
    /// First listed platform, or "PC" if none are listed.
    #[must_use]
    pub fn primary_platform(&self) -> &'static str {
        self.platforms.first().copied().unwrap_or("PC")
    }

    /// Snapshot this game into a cart item at the given price.
    #[must_use]
    pub fn to_cart_item(&self, price: &DemoPrice) -> CartItem {
        CartItem {
            id: self.id,
            slug: self.slug.to_string(),
            name: self.name.to_string(),
            image: self.background_image.to_string(),
            price: price.price,
            original_price: price.original,
            platform: key_type(self.primary_platform()).to_string(),
        }
    }
}

/// Look up a fallback game by slug.
#[must_use]
pub fn find_fallback(slug: &str) -> Option<&'static CatalogGame> {
    FALLBACK_GAMES.iter().find(|game| game.slug == slug)
}

/// Kind of activation key sold for a platform.
#[must_use]
pub fn key_type(platform: &str) -> &'static str {
    let platform = platform.to_lowercase();
    if platform.contains("playstation") {
        "PSN Key"
    } else if platform.contains("xbox") {
        "Xbox Key"
    } else if platform.contains("nintendo") {
        "Nintendo Key"
    } else {
        "Steam Key"
    }
}
