// duka/src/lib.rs

//! Duka: a headless shopping-cart and checkout core.
//!
//! Duka implements the data and state contract of a storefront's
//! cart-to-order pipeline, with no UI concerns:
//!  - A durable, write-through cart store over a single storage slot.
//!  - Pure view-model totals derived from cart snapshots.
//!  - A checkout sequencer that creates one remote Order followed by one
//!    OrderItem per cart line, sequentially, tracking the session's
//!    in-flight order identifier.
//!  - A payment initiator for one-shot mobile-money STK pushes, with
//!    local phone-number normalization.
//!  - Service traits over the remote backend, with reqwest-backed and
//!    in-memory mock implementations.

pub mod cart;
pub mod checkout;
pub mod error;
pub mod models;
pub mod payment;
pub mod services;
pub mod session;

// --- Re-exports for the Public API ---

// The cart store and its building blocks.
pub use crate::cart::{CartLine, CartStore, FileSlot, MemorySlot, StorageSlot};

// Derived totals over cart snapshots.
pub use crate::cart::view;

// The checkout state machine.
pub use crate::checkout::{CheckoutPhase, CheckoutSequencer};

// Payment initiation and phone normalization.
pub use crate::payment::{format_phone_number, PaymentInitiator};

// Canonical backend entities and wire types.
pub use crate::models::{
  NewOrder, NewOrderItem, Order, OrderItem, OrderItemPatch, OrderPatch, OrderStatus, Price, StkPushRequest,
  StkPushResponse, STK_ACCEPTED_CODE,
};

// Service seams and their implementations.
pub use crate::services::{
  HttpBackend, MockOrderItemService, MockOrderService, MockPaymentGateway, OrderItemService, OrderService,
  PaymentGateway,
};

pub use crate::error::{DukaError, DukaResult};

pub use crate::session::SessionContext;
