//! # Response Validation
//!
//! Completeness and equivalence checks for submitted responses.
//!
//! Hosts deliver field values as strings or numbers depending on where the response came
//! from (a form post, a stored step, an import), so values are compared through a canonical
//! string form: numeric values are normalised (`"1"`, `1` and `1.0` are equal), booleans
//! become `"1"`/`""` and null becomes `""`.

use crate::KprimeQuestion;
use crate::error::KprimeError;
use crate::order::field;
use crate::types::{ParamType, Response};
use serde_json::Value;
use std::collections::BTreeMap;

/// Message shown when a response cannot be graded.
pub const VALIDATION_MESSAGE: &str = "Please select one answer per row.";

/// Canonical comparable form of a submitted value.
pub fn canonical(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => String::new(),
        Value::Number(n) => n.as_f64().map(normalise_number).unwrap_or_else(|| n.to_string()),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(f) if f.is_finite() => normalise_number(f),
            _ => s.clone(),
        },
        other => other.to_string(),
    }
}

fn normalise_number(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        (f as i64).to_string()
    } else {
        f.to_string()
    }
}

/// Whether a value counts as "no answer": null, false, empty, or zero.
///
/// Zero is matched after canonicalisation, so `"0.0"` and `0.0` are blank too. Column
/// numbers start at 1, so no real selection is ever treated as blank.
pub fn is_blank(value: &Value) -> bool {
    let canonical = canonical(value);
    canonical.is_empty() || canonical == "0"
}

/// Whether the row at `position` has a non-blank answer.
pub fn is_answered(response: &Response, position: usize) -> bool {
    response
        .get(&field(position))
        .is_some_and(|value| !is_blank(value))
}

/// Whether the field for `position` was submitted at all, even if blank.
pub fn is_row_selected(response: &Response, position: usize) -> bool {
    response.contains_key(&field(position))
}

/// Column number selected for the row at `position`, if the answer names one.
pub fn selected_column(response: &Response, position: usize) -> Option<u32> {
    let value = response.get(&field(position))?;
    if is_blank(value) {
        return None;
    }
    canonical(value).parse::<u32>().ok()
}

/// Whether two responses hold the same fields with loosely equal values.
pub fn is_same_response(prev: &Response, new: &Response) -> bool {
    if prev.len() != new.len() {
        return false;
    }
    prev.iter().all(|(name, previous)| {
        new.get(name)
            .is_some_and(|value| canonical(value) == canonical(previous))
    })
}

impl KprimeQuestion {
    /// A response is complete when every row of the attempt order is answered.
    pub fn is_complete_response(&self, response: &Response) -> Result<bool, KprimeError> {
        let rows = self.get_order()?.len();
        Ok((0..rows).all(|position| is_answered(response, position)))
    }

    /// A response can be graded exactly when it is complete.
    pub fn is_gradable_response(&self, response: &Response) -> Result<bool, KprimeError> {
        self.is_complete_response(response)
    }

    /// Empty when the response is gradable, otherwise [`VALIDATION_MESSAGE`].
    pub fn get_validation_error(&self, response: &Response) -> Result<String, KprimeError> {
        if self.is_gradable_response(response)? {
            Ok(String::new())
        } else {
            Ok(VALIDATION_MESSAGE.to_string())
        }
    }

    /// Field names the host should read from a submission, with their parameter kind.
    pub fn get_expected_data(&self) -> Result<BTreeMap<String, ParamType>, KprimeError> {
        Ok(self
            .get_order()?
            .positions()
            .map(|(position, _)| (field(position), ParamType::Int))
            .collect())
    }
}
