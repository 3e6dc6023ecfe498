// duka/src/cart/store.rs

//! Sole source of truth for cart contents: pure read/write operations over
//! one storage slot, written through synchronously on every mutation.

use std::sync::Arc;
use tracing::warn;

use crate::cart::line::CartLine;
use crate::cart::storage::StorageSlot;
use crate::error::{DukaError, DukaResult};

pub struct CartStore {
  slot: Arc<dyn StorageSlot>,
}

impl CartStore {
  pub fn new(slot: Arc<dyn StorageSlot>) -> Self {
    Self { slot }
  }

  /// Returns the current cart. A missing or unparsable slot is an empty
  /// cart, never an error.
  pub fn get_cart(&self) -> Vec<CartLine> {
    let raw = match self.slot.load() {
      Ok(Some(raw)) => raw,
      Ok(None) => return Vec::new(),
      Err(e) => {
        warn!(error = %e, "cart slot unreadable, treating as empty");
        return Vec::new();
      }
    };

    match serde_json::from_str(&raw) {
      Ok(lines) => lines,
      Err(e) => {
        warn!(error = %e, "cart slot contents unparsable, treating as empty");
        Vec::new()
      }
    }
  }

  /// Adds a line. A line with the same product id has its quantity
  /// increased by the incoming quantity instead of being duplicated.
  pub fn add_to_cart(&self, line: CartLine) -> DukaResult<()> {
    let mut cart = self.get_cart();
    match cart.iter_mut().find(|l| l.product_id == line.product_id) {
      Some(existing) => existing.quantity += line.quantity,
      None => cart.push(line),
    }
    self.persist(&cart)
  }

  /// Drops the matching line. No-op when the product is not in the cart.
  pub fn remove_from_cart(&self, product_id: i64) -> DukaResult<()> {
    let mut cart = self.get_cart();
    cart.retain(|l| l.product_id != product_id);
    self.persist(&cart)
  }

  /// Sets the quantity for the matching line, floored at 1. No-op when the
  /// product is not in the cart.
  pub fn update_quantity(&self, product_id: i64, quantity: i64) -> DukaResult<()> {
    let mut cart = self.get_cart();
    let Some(line) = cart.iter_mut().find(|l| l.product_id == product_id) else {
      return Ok(());
    };
    line.quantity = quantity.clamp(1, i64::from(u32::MAX)) as u32;
    self.persist(&cart)
  }

  /// Deletes the slot entirely.
  pub fn clear_cart(&self) -> DukaResult<()> {
    self.slot.clear().map_err(|source| DukaError::Storage { source })
  }

  fn persist(&self, cart: &[CartLine]) -> DukaResult<()> {
    let payload = serde_json::to_string(cart).map_err(|e| DukaError::Storage { source: e.into() })?;
    self.slot.store(&payload).map_err(|source| DukaError::Storage { source })
  }
}
