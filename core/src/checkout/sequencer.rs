// duka/src/checkout/sequencer.rs

//! Turns a cart snapshot into one remote Order plus its OrderItems, one
//! round trip per cart line, and tracks the single in-flight order
//! identifier for the session.

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::cart::{view, CartLine};
use crate::error::{DukaError, DukaResult};
use crate::models::{NewOrder, NewOrderItem, Price};
use crate::services::{OrderItemService, OrderService};

/// Where the current checkout session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutPhase {
  /// No order created for the current cart.
  Idle,
  /// Order-creation request in flight.
  Submitting,
  /// Order created; item-creation requests in flight.
  ItemsSubmitting { order_id: i64 },
  /// Order identifier held; leaving this phase requires an explicit delete.
  Placed { order_id: i64 },
  /// Delete request in flight for the held identifier.
  Deleting { order_id: i64 },
}

impl CheckoutPhase {
  fn name(&self) -> &'static str {
    match self {
      CheckoutPhase::Idle => "idle",
      CheckoutPhase::Submitting => "submitting",
      CheckoutPhase::ItemsSubmitting { .. } => "items-submitting",
      CheckoutPhase::Placed { .. } => "placed",
      CheckoutPhase::Deleting { .. } => "deleting",
    }
  }
}

/// Sequences order placement against the remote backend.
///
/// Item calls are issued strictly in cart-line order, each awaited before
/// the next. There is no automatic retry, no timeout beyond the HTTP
/// client's own, and no cancellation; retries are caller-initiated.
pub struct CheckoutSequencer {
  orders: Arc<dyn OrderService>,
  items: Arc<dyn OrderItemService>,
  // Guards are taken briefly and never held across an await.
  phase: RwLock<CheckoutPhase>,
}

impl CheckoutSequencer {
  pub fn new(orders: Arc<dyn OrderService>, items: Arc<dyn OrderItemService>) -> Self {
    Self {
      orders,
      items,
      phase: RwLock::new(CheckoutPhase::Idle),
    }
  }

  pub fn phase(&self) -> CheckoutPhase {
    *self.phase.read()
  }

  /// The identifier of the placed order, if any.
  pub fn order_id(&self) -> Option<i64> {
    match *self.phase.read() {
      CheckoutPhase::Placed { order_id } => Some(order_id),
      _ => None,
    }
  }

  /// Creates one Order, then one OrderItem per cart line.
  ///
  /// The total is the view-model subtotal at the moment of submission; it
  /// is not recomputed as items are created. On an item failure the order
  /// (and any items already created) stays on the server and the sequencer
  /// lands in `Placed`, so the partial order can still be deleted; nothing
  /// is rolled back automatically.
  #[instrument(skip(self, cart), fields(lines = cart.len()))]
  pub async fn create_order(&self, user_id: i64, cart: &[CartLine]) -> DukaResult<i64> {
    if cart.is_empty() {
      return Err(DukaError::EmptyCart);
    }
    self.claim_idle()?;

    let total = view::subtotal(cart);
    info!(user_id, total, "submitting order");

    let order = match self
      .orders
      .create_order(&NewOrder {
        user_id,
        total_amount: Price::new(total),
      })
      .await
    {
      Ok(order) => order,
      Err(e) => {
        self.set_phase(CheckoutPhase::Idle);
        return Err(DukaError::OrderCreation { source: e.into() });
      }
    };

    // The server-assigned identifier is authoritative; without one there
    // is nothing to attach items to.
    if order.order_id <= 0 {
      self.set_phase(CheckoutPhase::Idle);
      return Err(DukaError::OrderCreation {
        source: anyhow::anyhow!("response lacked a usable order identifier"),
      });
    }
    let order_id = order.order_id;
    self.set_phase(CheckoutPhase::ItemsSubmitting { order_id });

    for (created, line) in cart.iter().enumerate() {
      let item = NewOrderItem {
        order_id,
        product_id: line.product_id,
        quantity: line.quantity,
        price: line.price,
      };
      if let Err(e) = self.items.create_order_item(&item).await {
        warn!(
          order_id,
          product_id = line.product_id,
          items_created = created,
          "item submission halted, partial order left on server"
        );
        self.set_phase(CheckoutPhase::Placed { order_id });
        return Err(DukaError::OrderItemCreation {
          product_id: line.product_id,
          items_created: created,
          source: e.into(),
        });
      }
    }

    self.set_phase(CheckoutPhase::Placed { order_id });
    info!(order_id, "order placed");
    Ok(order_id)
  }

  /// Deletes the held order and returns the sequencer to `Idle`.
  ///
  /// The cart is left untouched either way. A failed delete keeps the
  /// identifier so the caller can retry.
  #[instrument(skip(self))]
  pub async fn delete_order(&self) -> DukaResult<()> {
    let order_id = {
      let mut phase = self.phase.write();
      match *phase {
        CheckoutPhase::Placed { order_id } => {
          *phase = CheckoutPhase::Deleting { order_id };
          order_id
        }
        other => {
          return Err(DukaError::InvalidState {
            expected: "placed",
            actual: other.name(),
          })
        }
      }
    };

    match self.orders.delete_order(order_id).await {
      Ok(()) => {
        self.set_phase(CheckoutPhase::Idle);
        info!(order_id, "order deleted");
        Ok(())
      }
      Err(e) => {
        self.set_phase(CheckoutPhase::Placed { order_id });
        Err(DukaError::OrderDeletion {
          order_id,
          source: e.into(),
        })
      }
    }
  }

  /// Check-and-transition under one write lock, so a second concurrent
  /// checkout observes the non-idle phase and fails instead of racing.
  fn claim_idle(&self) -> DukaResult<()> {
    let mut phase = self.phase.write();
    match *phase {
      CheckoutPhase::Idle => {
        *phase = CheckoutPhase::Submitting;
        Ok(())
      }
      other => Err(DukaError::InvalidState {
        expected: "idle",
        actual: other.name(),
      }),
    }
  }

  fn set_phase(&self, next: CheckoutPhase) {
    *self.phase.write() = next;
  }
}
