//! Attempt Storage Traits
//!
//! The host persists every step of a question attempt. The engine only needs to read and write
//! named variables on a step and to read the response data a step carries.
//!
//! Variables whose name starts with `_` belong to the question type itself (such as the row
//! order); every other variable is response data submitted by the student.

use crate::types::Response;

/// A single recorded step of a question attempt.
pub trait AttemptStep {
    /// Read a question-type variable (e.g. `_order`).
    fn get_qt_var(&self, name: &str) -> Option<&str>;

    /// Store a question-type variable.
    fn set_qt_var(&mut self, name: &str, value: &str);

    /// The response data submitted in this step, without question-type variables.
    fn get_qt_data(&self) -> Response;
}

/// All steps of one question attempt, oldest first.
pub trait AttemptHistory {
    type Step: AttemptStep;

    fn steps(&self) -> &[Self::Step];

    /// The step that started the attempt. It carries the persisted row order.
    fn first_step(&self) -> Option<&Self::Step> {
        self.steps().first()
    }

    /// Response data of the most recent step that carries any.
    fn get_last_qt_data(&self) -> Response {
        self.steps()
            .iter()
            .rev()
            .map(|step| step.get_qt_data())
            .find(|data| !data.is_empty())
            .unwrap_or_default()
    }
}
