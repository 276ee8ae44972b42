//! Venue booking core: the reservation lifecycle, the payment-reconciliation
//! rules driving its status, and the space-availability conflict check.
//! Persistence and transport live behind the traits in [`ports`].

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod services;
pub mod use_cases;

pub use error::CoreError;
