// duka/src/models/mod.rs

//! Canonical data model for the remote backend's entities.
//!
//! The backend's response shapes vary across versions; everything is
//! normalized into these structs at the service boundary so the rest of
//! the crate never sees the inconsistency.

pub mod order;
pub mod order_item;
pub mod payment;
pub mod price;

pub use order::{NewOrder, Order, OrderPatch, OrderStatus};
pub use order_item::{NewOrderItem, OrderItem, OrderItemPatch};
pub use payment::{StkPushRequest, StkPushResponse, STK_ACCEPTED_CODE};
pub use price::Price;
