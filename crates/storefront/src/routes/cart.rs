//! Cart route handlers.
//!
//! The cart lives in process memory (mirrored to disk by the store), so every
//! handler locks it, applies one operation and answers with the fresh state.

use axum::{
    Json,
    extract::{Path, State},
};
use gamekey_core::{CartItem, CurrencyCode, Price, ProductId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::{AppState, Cart};

/// Message returned by the demo checkout.
pub const CHECKOUT_MESSAGE: &str =
    "Thank you for your purchase! This is a demo, so no actual purchase was made.";

/// Cart item display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub id: ProductId,
    pub slug: String,
    pub url: String,
    pub name: String,
    pub image: Option<String>,
    pub platform: String,
    pub price: String,
    pub original_price: String,
    pub discount_percent: u32,
}

impl CartItemView {
    fn new(item: &CartItem, currency: CurrencyCode) -> Self {
        Self {
            id: item.id,
            slug: item.slug.clone(),
            url: item.detail_path(),
            name: item.name.clone(),
            image: (!item.image.is_empty()).then(|| item.image.clone()),
            platform: item.platform.clone(),
            price: item.price_in(currency).display(),
            original_price: Price::new(item.original_price, currency).display(),
            discount_percent: item.discount_percent(),
        }
    }
}

/// Cart display data: items plus the order summary.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: usize,
    pub subtotal: String,
    pub savings: String,
    pub total: String,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let summary = cart.summary();
        let currency = summary.total.currency_code;
        Self {
            items: cart
                .items()
                .iter()
                .map(|item| CartItemView::new(item, currency))
                .collect(),
            item_count: summary.item_count,
            subtotal: summary.subtotal.display(),
            savings: summary.savings.display(),
            total: summary.total.display(),
        }
    }
}

/// Navbar badge data.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CartCount {
    pub count: usize,
}

/// Result of an add-to-cart request.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AddToCartResponse {
    /// `false` when the product was already in the cart.
    pub added: bool,
    pub count: usize,
}

/// Remove-from-cart request body.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub id: ProductId,
}

/// Demo checkout confirmation.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutReceipt {
    pub item_count: usize,
    pub total: String,
    pub message: &'static str,
}

/// Display the cart.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartView> {
    let cart = state.cart().lock().await;
    Json(CartView::from(&*cart))
}

/// Look up a single cart item (drives the "Added to Cart" button state).
#[instrument(skip(state))]
pub async fn item(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<CartItem>> {
    let cart = state.cart().lock().await;
    cart.items()
        .iter()
        .find(|item| item.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id} is not in the cart")))
}

/// Add an item to the cart.
///
/// Adding a product that is already in the cart succeeds with
/// `added: false` and leaves the cart unchanged.
#[instrument(skip(state, item), fields(id = %item.id))]
pub async fn add(
    State(state): State<AppState>,
    Json(item): Json<CartItem>,
) -> Result<Json<AddToCartResponse>> {
    validate_item(&item)?;

    let id = item.id.to_string();
    let mut cart = state.cart().lock().await;
    let added = cart.add_to_cart(item);
    add_breadcrumb("cart", "Added item", Some(&[("product_id", id.as_str())]));

    Ok(Json(AddToCartResponse {
        added,
        count: cart.item_count(),
    }))
}

/// Remove an item from the cart. Unknown ids are ignored.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Json(form): Json<RemoveFromCartRequest>,
) -> Json<CartView> {
    let mut cart = state.cart().lock().await;
    if cart.remove_from_cart(form.id).is_some() {
        let id = form.id.to_string();
        add_breadcrumb("cart", "Removed item", Some(&[("product_id", id.as_str())]));
    }
    Json(CartView::from(&*cart))
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Json<CartView> {
    let mut cart = state.cart().lock().await;
    cart.clear_cart();
    Json(CartView::from(&*cart))
}

/// Get the cart count badge.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Json<CartCount> {
    let cart = state.cart().lock().await;
    Json(CartCount {
        count: cart.item_count(),
    })
}

/// Demo checkout: empties the cart without charging anything.
#[instrument(skip(state))]
pub async fn checkout(State(state): State<AppState>) -> Result<Json<CheckoutReceipt>> {
    let mut cart = state.cart().lock().await;
    if cart.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_string()));
    }

    let receipt = CheckoutReceipt {
        item_count: cart.item_count(),
        total: cart.summary().total.display(),
        message: CHECKOUT_MESSAGE,
    };
    cart.clear_cart();
    add_breadcrumb("checkout", "Demo checkout completed", None);
    tracing::info!(item_count = receipt.item_count, total = %receipt.total, "Demo checkout");

    Ok(Json(receipt))
}

/// Reject items that could not have come from the catalog.
fn validate_item(item: &CartItem) -> Result<()> {
    if item.slug.trim().is_empty() {
        return Err(AppError::BadRequest("slug is required".to_string()));
    }
    if item.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }
    item.check_prices()
        .map_err(|e| AppError::BadRequest(e.to_string()))
}
