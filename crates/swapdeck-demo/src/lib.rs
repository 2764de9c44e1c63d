//! Synthetic responses for demo mode.
//!
//! The simulator never touches the network and returns synchronously.
//! Structural fields are deterministic (fixed mock exchange rates,
//! exact `Decimal` arithmetic); identifier-like fields (hashes,
//! signatures) are intentionally random so repeated demo calls look
//! like a real non-idempotent upstream. The randomness source is a
//! seedable RNG injected at construction so tests can pin it.

pub mod simulator;

pub use simulator::{DemoPricing, DemoSimulator};
