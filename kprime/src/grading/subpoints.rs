//! Partial credit by row: `SubpointsGrading` awards each correctly answered row an equal share
//! of the marks.

use crate::KprimeQuestion;
use crate::error::KprimeError;
use crate::traits::grading::GradingStrategy;
use crate::types::Response;

pub struct SubpointsGrading;

impl GradingStrategy for SubpointsGrading {
    fn name(&self) -> &'static str {
        "subpoints"
    }

    fn grade_question(
        &self,
        question: &KprimeQuestion,
        response: &Response,
    ) -> Result<f64, KprimeError> {
        let rows = question.get_order()?.len();
        if rows == 0 {
            return Ok(0.0);
        }
        let correct = question.count_correct_rows(response)?;
        Ok(correct as f64 / rows as f64)
    }
}
