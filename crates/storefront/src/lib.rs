//! GameKey Storefront library.
//!
//! This crate provides the cart store and the storefront HTTP surface as a
//! library, allowing it to be tested and reused by the CLI.
//!
//! # Modules
//!
//! - [`cart`] - Cart store, storage backends and change events
//! - [`catalog`] - Fallback catalog entries and demo pricing
//! - [`config`] - Environment-based configuration
//! - [`routes`] - Axum handlers for the cart API

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
