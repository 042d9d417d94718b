//! Demo pricing for catalog entries.
//!
//! The catalog API carries no prices, so the storefront shows a randomly
//! picked list price and discount for every product. Nothing here is real
//! money; it only has to look plausible and stay internally consistent.

use rand::Rng;
use rand::seq::IndexedRandom;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// List prices, in cents.
pub const PRICE_TIERS_CENTS: [i64; 7] = [999, 1499, 1999, 2999, 3999, 4999, 5999];

/// Discount percentages.
pub const DISCOUNT_TIERS: [u32; 11] = [10, 15, 20, 25, 30, 35, 40, 45, 50, 60, 70];

/// A generated price with its discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DemoPrice {
    /// List price before the discount.
    pub original: Decimal,
    /// Whole-percent discount.
    pub discount_percent: u32,
    /// Price after the discount, rounded to cents.
    pub price: Decimal,
}

impl DemoPrice {
    /// Build a price from a list price and discount.
    #[must_use]
    pub fn new(original: Decimal, discount_percent: u32) -> Self {
        Self {
            original,
            discount_percent,
            price: discounted_price(original, discount_percent),
        }
    }

    /// Pick a random list price and discount from the tiers.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let cents = PRICE_TIERS_CENTS.choose(rng).copied().unwrap_or(999);
        let discount = DISCOUNT_TIERS.choose(rng).copied().unwrap_or(10);
        Self::new(Decimal::new(cents, 2), discount)
    }
}

/// Apply a percentage discount, rounding half away from zero to cents.
///
/// Discounts above 100% are treated as 100%.
#[must_use]
pub fn discounted_price(original: Decimal, discount_percent: u32) -> Decimal {
    let keep = Decimal::from(100 - discount_percent.min(100));
    (original * keep / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_discounted_price() {
        assert_eq!(
            discounted_price(Decimal::new(2999, 2), 20),
            Decimal::new(2399, 2)
        );
        // 39.99 * 0.85 = 33.9915
        assert_eq!(
            discounted_price(Decimal::new(3999, 2), 15),
            Decimal::new(3399, 2)
        );
        // 9.99 * 0.5 = 4.995
        assert_eq!(
            discounted_price(Decimal::new(999, 2), 50),
            Decimal::new(500, 2)
        );
        assert_eq!(discounted_price(Decimal::new(999, 2), 150), Decimal::ZERO);
    }

    #[test]
    fn test_generated_prices_stay_in_tiers() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let demo = DemoPrice::generate(&mut rng);
            assert!(
                PRICE_TIERS_CENTS
                    .iter()
                    .any(|&c| Decimal::new(c, 2) == demo.original)
            );
            assert!(DISCOUNT_TIERS.contains(&demo.discount_percent));
            assert!(demo.price < demo.original);
            assert_eq!(
                demo.price,
                discounted_price(demo.original, demo.discount_percent)
            );
        }
    }
}
