//! GameKey Core - Shared types library.
//!
//! This crate provides common types used across all GameKey components:
//! - `storefront` - Cart store, storage backends and the HTTP cart API
//! - `cli` - Command-line tools for inspecting and editing the cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product IDs, prices, currencies and cart items

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
