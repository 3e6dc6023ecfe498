// tests/cart_view_tests.rs
mod common;

use common::*;
use duka::view::{line_total, subtotal, total_item_count};
use duka::CartLine;

#[test]
fn total_item_count_sums_quantities() {
  let cart = vec![line(1, 100.0, 2), line(2, 50.0, 1), line(3, 10.0, 4)];
  assert_eq!(total_item_count(&cart), 7);
}

#[test]
fn line_total_is_quantity_times_price() {
  let l = line(1, 19.99, 3);
  assert!((line_total(&l) - 59.97).abs() < 1e-9);
}

#[test]
fn subtotal_handles_number_and_string_prices() {
  // Prices arrive inconsistently typed from upstream; both forms must
  // coerce and sum identically.
  let cart: Vec<CartLine> = serde_json::from_str(
    r#"[
      {"productId":1,"title":"A","image":"a.png","price":"100.00","quantity":2},
      {"productId":2,"title":"B","image":"b.png","price":50,"quantity":1}
    ]"#,
  )
  .unwrap();

  assert_eq!(subtotal(&cart), 250.0);
  assert_eq!(total_item_count(&cart), 3);
}

#[test]
fn subtotal_of_empty_cart_is_zero() {
  assert_eq!(subtotal(&[]), 0.0);
  assert_eq!(total_item_count(&[]), 0);
}

#[test]
fn subtotal_matches_per_line_sum() {
  let cart = vec![line(1, 12.5, 2), line(2, 7.25, 3), line(3, 0.99, 5)];
  let expected: f64 = cart.iter().map(line_total).sum();
  assert_eq!(subtotal(&cart), expected);
}
