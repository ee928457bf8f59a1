//!
//! Traits Module
//!
//! This module contains the seams between the engine and its host.
//!
//! - [`attempt`]: Attempt steps and attempt history, where the row order and responses are stored.
//! - [`grading`]: The pluggable strategy that turns a response into a fraction.
//! - [`renderer`]: Conversion of stored rich text into plain text.
//!
//! Implement these traits to plug the engine into a host's storage, text handling or scoring rules.

pub mod attempt;
pub mod grading;
pub mod renderer;
