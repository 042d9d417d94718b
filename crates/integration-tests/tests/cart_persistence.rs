//! Integration tests for the cart store over file storage.
//!
//! Each test uses its own temporary directory, so a "reload" is simply a
//! new store opened on the same directory.

use std::fs;

use gamekey_core::ProductId;
use gamekey_integration_tests::sample_item;
use gamekey_storefront::cart::{CartStore, DEFAULT_CART_KEY, FileStorage};
use rust_decimal::Decimal;

fn open(dir: &std::path::Path) -> CartStore<FileStorage> {
    CartStore::open(FileStorage::open(dir).expect("open storage"))
}

// =============================================================================
// Reload Tests
// =============================================================================

#[test]
fn test_cart_survives_reload() {
    let dir = tempfile::tempdir().expect("tempdir");

    let mut cart = open(dir.path());
    cart.add_to_cart(sample_item(1, 1000));
    cart.add_to_cart(sample_item(2, 500));
    let expected = cart.items().to_vec();
    drop(cart);

    let reloaded = open(dir.path());
    assert_eq!(reloaded.items(), expected.as_slice());
    assert_eq!(reloaded.item_count(), 2);
    assert_eq!(reloaded.total(), Decimal::new(1500, 2));
}

#[test]
fn test_scenario_record_lifecycle() {
    let dir = tempfile::tempdir().expect("tempdir");
    let record = dir.path().join(format!("{DEFAULT_CART_KEY}.json"));
    let mut cart = open(dir.path());

    cart.add_to_cart(sample_item(1, 1000));
    cart.add_to_cart(sample_item(2, 500));
    cart.add_to_cart(sample_item(1, 9900));
    assert_eq!(cart.item_count(), 2);
    assert_eq!(cart.total(), Decimal::new(1500, 2));

    cart.remove_from_cart(ProductId::new(2));
    assert_eq!(cart.total(), Decimal::new(1000, 2));
    assert!(record.exists(), "record kept while items remain");

    cart.remove_from_cart(ProductId::new(1));
    assert_eq!(cart.item_count(), 0);
    assert_eq!(cart.total(), Decimal::ZERO);
    assert!(!record.exists(), "record deleted once the cart is empty");

    assert!(open(dir.path()).is_empty());
}

#[test]
fn test_clear_deletes_record() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut cart = open(dir.path());
    cart.add_to_cart(sample_item(7, 1999));

    cart.clear_cart();

    assert!(cart.is_empty());
    assert_eq!(cart.total(), Decimal::ZERO);
    assert!(!dir.path().join("cart.json").exists());
}

// =============================================================================
// Hydration Tests
// =============================================================================

#[test]
fn test_hydrates_browser_written_record() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join("cart.json"),
        r#"[{"id":3498,"slug":"grand-theft-auto-v","name":"Grand Theft Auto V",
            "image":"/urban-chaos-sunset.png","price":23.99,"originalPrice":29.99,
            "platform":"Steam Key"},
           {"id":3328,"slug":"the-witcher-3-wild-hunt","name":"The Witcher 3: Wild Hunt",
            "image":"","price":10,"originalPrice":20,"platform":"PC"}]"#,
    )
    .expect("write record");

    let cart = open(dir.path());
    assert_eq!(cart.item_count(), 2);
    assert_eq!(cart.total(), Decimal::new(3399, 2));
    assert!(cart.contains(ProductId::new(3498)));
}

#[test]
fn test_reload_keeps_exact_prices() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut item = sample_item(11, 0);
    item.price = "10.123456789012345678".parse().expect("decimal");
    item.original_price = "0.1".parse().expect("decimal");

    let mut cart = open(dir.path());
    cart.add_to_cart(item.clone());
    drop(cart);

    let reloaded = open(dir.path());
    assert_eq!(reloaded.items(), std::slice::from_ref(&item));
    assert_eq!(reloaded.total().to_string(), "10.123456789012345678");
}

#[test]
fn test_corrupt_record_starts_empty_and_is_replaced() {
    let dir = tempfile::tempdir().expect("tempdir");
    let record = dir.path().join("cart.json");
    fs::write(&record, "[{\"id\": 1, \"slug\":").expect("write record");

    let mut cart = open(dir.path());
    assert!(cart.is_empty());

    cart.add_to_cart(sample_item(4, 1499));
    let reloaded = open(dir.path());
    assert_eq!(reloaded.item_count(), 1);
    assert!(reloaded.contains(ProductId::new(4)));
}

#[test]
fn test_external_wipe_empties_next_session() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut cart = open(dir.path());
    cart.add_to_cart(sample_item(1, 100));

    fs::remove_file(dir.path().join("cart.json")).expect("wipe");

    assert!(open(dir.path()).is_empty());
}
