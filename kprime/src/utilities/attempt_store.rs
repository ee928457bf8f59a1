//!
//! In-memory Attempt Store
//!
//! [`InMemoryAttemptStep`] and [`InMemoryAttempt`] implement the attempt storage traits on plain
//! maps. They are enough for hosts that keep attempts in memory and for driving the engine in tests.

use crate::traits::attempt::{AttemptHistory, AttemptStep};
use crate::types::Response;
use serde_json::Value;
use std::collections::BTreeMap;

/// One attempt step holding its variables in a map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryAttemptStep {
    vars: BTreeMap<String, Value>,
}

impl InMemoryAttemptStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// A step that submits `response`.
    pub fn with_response(response: Response) -> Self {
        Self {
            vars: response.into_iter().collect(),
        }
    }
}

impl AttemptStep for InMemoryAttemptStep {
    fn get_qt_var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).and_then(Value::as_str)
    }

    fn set_qt_var(&mut self, name: &str, value: &str) {
        self.vars
            .insert(name.to_string(), Value::String(value.to_string()));
    }

    fn get_qt_data(&self) -> Response {
        self.vars
            .iter()
            .filter(|(name, _)| !name.starts_with('_'))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }
}

/// The steps of one attempt, oldest first.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAttempt {
    steps: Vec<InMemoryAttemptStep>,
}

impl InMemoryAttempt {
    /// An attempt whose first step is `first_step`.
    pub fn new(first_step: InMemoryAttemptStep) -> Self {
        Self {
            steps: vec![first_step],
        }
    }

    pub fn push_step(&mut self, step: InMemoryAttemptStep) {
        self.steps.push(step);
    }

    /// Record a submission as a new step.
    pub fn submit(&mut self, response: Response) {
        self.push_step(InMemoryAttemptStep::with_response(response));
    }
}

impl AttemptHistory for InMemoryAttempt {
    type Step = InMemoryAttemptStep;

    fn steps(&self) -> &[InMemoryAttemptStep] {
        &self.steps
    }
}
