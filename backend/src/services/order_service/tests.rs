use chrono::TimeZone;
use rust_decimal_macros::dec;
use storefront_platform_shared::{PaymentMethod, ShippingAddress};

use super::*;

fn line(product: Uuid, quantity: i32) -> OrderItemInput {
    OrderItemInput { product, quantity }
}

fn sample_address() -> ShippingAddress {
    ShippingAddress {
        full_name: "Asha Verma".to_string(),
        phone: "9876543210".to_string(),
        address: "12 MG Road".to_string(),
        city: "Bengaluru".to_string(),
        state: "Karnataka".to_string(),
        pincode: "560001".to_string(),
    }
}

fn request_with_totals(
    items_price: Option<Decimal>,
    shipping_price: Option<Decimal>,
    total_price: Option<Decimal>,
) -> CreateOrderRequest {
    CreateOrderRequest {
        items: vec![line(Uuid::new_v4(), 1)],
        shipping_address: sample_address(),
        payment_method: PaymentMethod::Cod,
        coupon_code: None,
        items_price,
        shipping_price,
        total_price,
    }
}

#[test]
fn duplicate_lines_merge_into_one() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();

    let merged = merge_lines(&[line(a, 1), line(b, 2), line(a, 3)]);

    assert_eq!(merged, vec![(a, 4), (b, 2)]);
}

#[test]
fn order_number_carries_date_and_id_fragment() {
    let placed_at = chrono::Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap();
    let id = Uuid::parse_str("a1b2c3d4-0000-0000-0000-000000000000").unwrap();

    assert_eq!(order_number(placed_at, id), "ORD-20250314-A1B2C3");
}

#[test]
fn totals_add_flat_shipping_and_subtract_discount() {
    let totals = compute_totals(dec!(1000), SHIPPING_FEE, dec!(150));

    assert_eq!(totals.items_price, dec!(1000.00));
    assert_eq!(totals.shipping_price, dec!(99.00));
    assert_eq!(totals.discount, dec!(150.00));
    assert_eq!(totals.total_price, dec!(949.00));
}

#[test]
fn discount_never_drives_total_negative() {
    let totals = compute_totals(dec!(50), Decimal::ZERO, dec!(500));

    assert_eq!(totals.total_price, Decimal::ZERO);
}

#[test]
fn stale_client_totals_are_rejected() {
    let totals = compute_totals(dec!(1000), SHIPPING_FEE, Decimal::ZERO);

    let request = request_with_totals(Some(dec!(900)), None, None);
    assert!(matches!(
        verify_client_totals(&request, totals),
        Err(AppError::Validation(_))
    ));

    let request = request_with_totals(None, None, Some(dec!(1000)));
    assert!(matches!(
        verify_client_totals(&request, totals),
        Err(AppError::Validation(_))
    ));
}

#[test]
fn matching_or_absent_client_totals_pass() {
    let totals = compute_totals(dec!(1000), SHIPPING_FEE, Decimal::ZERO);

    let request = request_with_totals(None, None, None);
    assert!(verify_client_totals(&request, totals).is_ok());

    let request = request_with_totals(Some(dec!(1000)), Some(dec!(99)), Some(dec!(1099)));
    assert!(verify_client_totals(&request, totals).is_ok());
}

#[test]
fn unforced_moves_follow_the_lifecycle() {
    assert!(validate_transition(OrderStatus::Processing, OrderStatus::Confirmed, false).is_ok());
    assert!(validate_transition(OrderStatus::Shipped, OrderStatus::Cancelled, false).is_ok());

    assert!(matches!(
        validate_transition(OrderStatus::Processing, OrderStatus::Shipped, false),
        Err(AppError::InvalidStateTransition(_))
    ));
}

#[test]
fn forced_moves_skip_states_but_not_terminal_orders() {
    assert!(validate_transition(OrderStatus::Processing, OrderStatus::Delivered, true).is_ok());
    assert!(validate_transition(OrderStatus::Shipped, OrderStatus::Processing, true).is_ok());

    assert!(matches!(
        validate_transition(OrderStatus::Delivered, OrderStatus::Processing, true),
        Err(AppError::InvalidStateTransition(_))
    ));
    assert!(matches!(
        validate_transition(OrderStatus::Cancelled, OrderStatus::Confirmed, true),
        Err(AppError::InvalidStateTransition(_))
    ));
    assert!(matches!(
        validate_transition(OrderStatus::Shipped, OrderStatus::Shipped, true),
        Err(AppError::InvalidStateTransition(_))
    ));
}
