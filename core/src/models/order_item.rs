// duka/src/models/order_item.rs

use serde::{Deserialize, Serialize};

use crate::models::price::Price;

/// One cart line as persisted against an order. `price` is the unit price
/// at order time, independent of later product price changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
  pub order_item_id: i64,
  pub order_id: i64,
  pub product_id: i64,
  pub quantity: u32,
  pub price: Price,
}

/// Payload for the create-order-item call, one per cart line.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderItem {
  pub order_id: i64,
  pub product_id: i64,
  pub quantity: u32,
  pub price: Price,
}

/// Partial update for an existing order item.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemPatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub quantity: Option<u32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub price: Option<Price>,
}
