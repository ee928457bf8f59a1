//! # Utilities
//!
//! Helpers shared across the engine and by hosts that do not bring their own storage.
//!
//! Currently, this module exports the following sub-module:
//! - [`attempt_store`]: An in-memory implementation of the attempt storage traits.

pub mod attempt_store;
