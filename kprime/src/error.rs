//! K-prime Error Types
//!
//! This module defines the [`KprimeError`] enum, which covers every failure the engine reports:
//! weight lookups, scoring method resolution and the integrity of the per-attempt row order.
//!
//! An incomplete response is not an error. It is reported through
//! [`crate::KprimeQuestion::is_gradable_response`] and
//! [`crate::KprimeQuestion::get_validation_error`] instead.
//!
//! # Example
//!
//! ```rust
//! use kprime::error::KprimeError;
//!
//! fn lookup(weight: Option<f64>) -> Result<f64, KprimeError> {
//!     weight.ok_or(KprimeError::MissingWeight { row: 1, column: 2 })
//! }
//!
//! assert!(lookup(None).is_err());
//! ```

use thiserror::Error;

/// Represents all error types that can occur while handling a k-prime question.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum KprimeError {
    /// No weight was authored for the requested row/column pair.
    #[error("No weight for row {row} column {column}")]
    MissingWeight { row: u32, column: u32 },

    /// The configured scoring method tag has no strategy.
    #[error("Unknown scoring method: {0}")]
    UnknownScoringMethod(String),

    /// A persisted order does not describe a permutation of the question's rows.
    #[error("Invalid attempt order: {0}")]
    OrderIntegrity(String),

    /// The order was used before `start_attempt` or `apply_attempt_state`.
    #[error("Attempt order has not been initialised")]
    OrderNotInitialised,

    /// The order was already established for this instance.
    #[error("Attempt order is already initialised")]
    OrderAlreadyInitialised,

    /// An attempt step does not carry a required variable.
    #[error("Attempt step has no variable '{0}'")]
    MissingStepVariable(String),

    /// A row id was referenced that the question does not have.
    #[error("Unknown row id {0}")]
    UnknownRow(i64),

    /// The question definition failed validation.
    #[error("Invalid question definition: {0}")]
    InvalidDefinition(String),
}
