use crate::KprimeQuestion;
use crate::error::KprimeError;
use crate::types::Response;

/// GradingStrategy is a strategy trait for scoring a complete response.
/// Each implementation provides a specific rule for turning the per-row
/// correctness of a response into a single fraction.
pub trait GradingStrategy: Send + Sync {
    /// Short tag identifying the strategy in logs.
    fn name(&self) -> &'static str;

    /// Grade one response to `question`, producing a fraction, normally in 0.0–1.0.
    ///
    /// - `question`: the question with its attempt order established.
    /// - `response`: the submitted field values.
    fn grade_question(
        &self,
        question: &KprimeQuestion,
        response: &Response,
    ) -> Result<f64, KprimeError>;
}
