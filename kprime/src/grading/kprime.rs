//! The default k-prime scoring rule.
//!
//! `KprimeGrading` awards full marks when every row is answered correctly and half marks when
//! exactly one row is wrong. Anything worse scores nothing. A single-row question answered
//! wrongly is one row wrong, so it also earns half marks.

use crate::KprimeQuestion;
use crate::error::KprimeError;
use crate::traits::grading::GradingStrategy;
use crate::types::Response;

pub struct KprimeGrading;

impl GradingStrategy for KprimeGrading {
    fn name(&self) -> &'static str {
        "kprime"
    }

    fn grade_question(
        &self,
        question: &KprimeQuestion,
        response: &Response,
    ) -> Result<f64, KprimeError> {
        let rows = question.get_order()?.len();
        let correct = question.count_correct_rows(response)?;

        let fraction = if correct == rows {
            1.0
        } else if correct + 1 == rows {
            0.5
        } else {
            0.0
        };
        Ok(fraction)
    }
}
