// duka/src/cart/line.rs

use serde::{Deserialize, Serialize};

use crate::models::Price;

/// One product's presence in the cart.
///
/// Title, image and unit price are snapshotted at add time and never
/// re-fetched. The wire form is camelCase so carts written by earlier
/// clients parse unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
  /// Unique within the cart; at most one line per product.
  pub product_id: i64,
  pub title: String,
  pub image: String,
  pub price: Price,
  pub quantity: u32,
}
