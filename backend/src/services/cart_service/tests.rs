use rust_decimal_macros::dec;
use uuid::Uuid;

use super::ensure_stock;
use crate::error::AppError;
use crate::models::CartItemRow;

#[test]
fn stock_check_allows_exact_fit() {
    assert!(ensure_stock("Denim Jacket", 5, 5).is_ok());
    assert!(ensure_stock("Denim Jacket", 5, 1).is_ok());
}

#[test]
fn stock_check_rejects_over_ask() {
    let err = ensure_stock("Denim Jacket", 2, 3).unwrap_err();
    match err {
        AppError::InsufficientStock(message) => {
            assert!(message.contains("Denim Jacket"));
            assert!(message.contains("3 requested"));
            assert!(message.contains("2 available"));
        }
        other => panic!("expected InsufficientStock, got {:?}", other),
    }
}

#[test]
fn stock_check_rejects_when_out_of_stock() {
    assert!(ensure_stock("Denim Jacket", 0, 1).is_err());
}

// Adding the same product twice merges into one line; the second add is
// checked against stock with the quantities combined.
#[test]
fn repeated_add_totals_as_one_merged_line() {
    assert!(ensure_stock("Denim Jacket", 10, 3).is_ok());
    assert!(ensure_stock("Denim Jacket", 10, 3 + 2).is_ok());
    assert!(ensure_stock("Denim Jacket", 10, 5 + 6).is_err());

    let merged = CartItemRow {
        id: Uuid::new_v4(),
        product_id: Uuid::new_v4(),
        quantity: 5,
        price: dec!(500),
        name: "Denim Jacket".to_string(),
        brand: "Roadster".to_string(),
        image: None,
        current_price: dec!(500),
        stock: 10,
    };
    assert_eq!(merged.item_total(), dec!(2500));
}
