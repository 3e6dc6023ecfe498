// duka/src/checkout/mod.rs

pub mod sequencer;

pub use sequencer::{CheckoutPhase, CheckoutSequencer};
