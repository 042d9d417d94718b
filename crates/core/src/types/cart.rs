//! Cart line items.
//!
//! A [`CartItem`] is a product reference plus the pricing snapshot that was
//! shown when the shopper added it. The cart holds each product at most once,
//! so there is no quantity field.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::ProductId;
use super::price::{CurrencyCode, Price};

/// Highest unit price accepted for a cart item.
///
/// Keeps cart sums far away from the `Decimal` range.
pub const MAX_ITEM_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Why a cart item's prices were rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartItemError {
    #[error("prices cannot be negative")]
    NegativePrice,

    #[error("prices cannot exceed {}", MAX_ITEM_PRICE)]
    PriceTooHigh,
}

/// A product in the shopper's cart.
///
/// The JSON form uses camelCase keys and plain JSON numbers for prices, the
/// same shape the browser storefront writes to local storage. Prices are
/// written with every digit of the decimal, so a reload gives back exactly
/// the amounts that were stored:
///
/// ```json
/// {"id":1,"slug":"grand-theft-auto-v","name":"Grand Theft Auto V",
///  "image":"/urban-chaos-sunset.png","price":23.99,"originalPrice":29.99,
///  "platform":"Steam Key"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Catalog product id, unique within a cart.
    pub id: ProductId,
    /// Detail page slug.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Image URL or path. May be empty.
    #[serde(default)]
    pub image: String,
    /// Current (discounted) unit price.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,
    /// Pre-discount reference price.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub original_price: Decimal,
    /// Platform label (e.g. "PC", "Xbox Key").
    pub platform: String,
}

impl CartItem {
    /// Check that both prices lie within `0..=MAX_ITEM_PRICE`.
    ///
    /// # Errors
    ///
    /// Returns which bound a price violates.
    pub fn check_prices(&self) -> Result<(), CartItemError> {
        for price in [self.price, self.original_price] {
            if price < Decimal::ZERO {
                return Err(CartItemError::NegativePrice);
            }
            if price > MAX_ITEM_PRICE {
                return Err(CartItemError::PriceTooHigh);
            }
        }
        Ok(())
    }

    /// Amount saved against the reference price, never negative.
    #[must_use]
    pub fn savings(&self) -> Decimal {
        self.original_price
            .saturating_sub(self.price)
            .max(Decimal::ZERO)
    }

    /// Whole-percent discount relative to the reference price.
    ///
    /// Returns 0 when there is no reference price or no discount.
    #[must_use]
    pub fn discount_percent(&self) -> u32 {
        if self.original_price <= Decimal::ZERO {
            return 0;
        }
        // savings <= original_price, so the ratio stays within 0..=1
        let ratio = self
            .savings()
            .checked_div(self.original_price)
            .unwrap_or(Decimal::ZERO);
        let pct = (ratio * Decimal::ONE_HUNDRED).round();
        u32::try_from(pct.mantissa()).unwrap_or(0)
    }

    /// Current price in the given currency.
    #[must_use]
    pub const fn price_in(&self, currency: CurrencyCode) -> Price {
        Price::new(self.price, currency)
    }

    /// Path of the product's detail page.
    #[must_use]
    pub fn detail_path(&self) -> String {
        format!("/game/{}", self.slug)
    }
}
