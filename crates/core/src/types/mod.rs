//! Core types for GameKey.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod price;

pub use cart::{CartItem, CartItemError, MAX_ITEM_PRICE};
pub use id::*;
pub use price::{CurrencyCode, CurrencyCodeError, Price};
