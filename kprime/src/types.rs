//! # Types Module
//!
//! Core data structures shared by the engine: the response map submitted by a student,
//! the graded state of a question and the kinds of parameters the host should expect.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// A submitted response: field name (`option0`, `option1`, ...) to the selected column number.
///
/// Values are kept as JSON values since hosts send them as strings or numbers.
pub type Response = BTreeMap<String, Value>;

/// Fractions within this distance of 0.0 or 1.0 are treated as exactly wrong or right.
const FRACTION_TOLERANCE: f64 = 0.000001;

/// Outcome classification of a graded response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionState {
    Right,
    Partial,
    Wrong,
}

impl QuestionState {
    /// Classifies a fraction: 1.0 and above is right, 0.0 and below is wrong, anything between is partial.
    pub fn graded_state_for_fraction(fraction: f64) -> Self {
        if fraction >= 1.0 - FRACTION_TOLERANCE {
            QuestionState::Right
        } else if fraction <= FRACTION_TOLERANCE {
            QuestionState::Wrong
        } else {
            QuestionState::Partial
        }
    }
}

/// Parameter kind of an expected response field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Int,
}
