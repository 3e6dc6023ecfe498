// tests/common/mod.rs
#![allow(dead_code)] // Allow unused helpers in this common test module

use duka::{
  CartLine, CartStore, CheckoutSequencer, MemorySlot, MockOrderItemService, MockOrderService, MockPaymentGateway,
  PaymentInitiator, Price,
};
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::Level;

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

/// A cart line with snapshotted display fields derived from the id.
pub fn line(product_id: i64, price: f64, quantity: u32) -> CartLine {
  CartLine {
    product_id,
    title: format!("Product {product_id}"),
    image: format!("https://img.example/{product_id}.png"),
    price: Price::new(price),
    quantity,
  }
}

pub fn memory_store() -> CartStore {
  CartStore::new(Arc::new(MemorySlot::new()))
}

/// The in-memory backend, with handles kept concrete so tests can script
/// failures and inspect what the services recorded.
pub struct MockBackend {
  pub orders: Arc<MockOrderService>,
  pub items: Arc<MockOrderItemService>,
  pub gateway: Arc<MockPaymentGateway>,
}

pub fn mock_backend() -> MockBackend {
  MockBackend {
    orders: Arc::new(MockOrderService::new()),
    items: Arc::new(MockOrderItemService::new()),
    gateway: Arc::new(MockPaymentGateway::new()),
  }
}

pub fn sequencer(backend: &MockBackend) -> CheckoutSequencer {
  CheckoutSequencer::new(backend.orders.clone(), backend.items.clone())
}

pub fn initiator(backend: &MockBackend) -> PaymentInitiator {
  PaymentInitiator::new(backend.gateway.clone())
}
