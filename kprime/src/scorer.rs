//! # Scorer Module
//!
//! Final grading of k-prime responses: delegating a response to the configured strategy,
//! deriving the graded state, producing a sample correct response and combining the tries of
//! an interactive attempt into one grade with a per-try penalty.

use crate::KprimeQuestion;
use crate::error::KprimeError;
use crate::order::field;
use crate::types::{QuestionState, Response};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;
use util::question_bank::question_bank::{Column, Row};

impl KprimeQuestion {
    /// Grade a response with the configured strategy.
    ///
    /// # Returns
    /// The fraction computed by the strategy and its [`QuestionState`].
    ///
    /// # Errors
    /// * [`KprimeError::UnknownScoringMethod`] if the scoring method cannot be resolved.
    /// * Any error the strategy reports, e.g. a missing weight.
    pub fn grade_response(&self, response: &Response) -> Result<(f64, QuestionState), KprimeError> {
        let grading = self.grading()?;
        let fraction = grading.grade_question(self, response)?;
        let state = QuestionState::graded_state_for_fraction(fraction);
        debug!(
            "Question {} graded with {}: fraction {} ({:?})",
            self.definition().id,
            grading.name(),
            fraction,
            state
        );
        Ok((fraction, state))
    }

    /// A response that would score full marks: for each row, the first column with a
    /// positive weight, keyed by field name.
    pub fn get_correct_response(&self) -> Result<Response, KprimeError> {
        let mut result = Response::new();
        for (position, row) in self.ordered_rows()? {
            if let Some(column) = self.first_correct_column(row)? {
                result.insert(field(position), Value::from(column.number));
            }
        }
        Ok(result)
    }

    /// The correct response keyed by row id, with column ids as values.
    pub fn correct_response_by_row_id(&self) -> Result<BTreeMap<i64, i64>, KprimeError> {
        let mut result = BTreeMap::new();
        for (_, row) in self.ordered_rows()? {
            if let Some(column) = self.first_correct_column(row)? {
                result.insert(row.id, column.id);
            }
        }
        Ok(result)
    }

    fn first_correct_column(&self, row: &Row) -> Result<Option<&Column>, KprimeError> {
        for column in self.columns() {
            if self.is_correct(row, column)? {
                return Ok(Some(column));
            }
        }
        Ok(None)
    }

    /// Combine the tries of an interactive attempt into one grade.
    ///
    /// For each row, the tries are scanned in order. A row earns
    /// `max(0, 1 - (last_wrong_try + 1) * penalty)` if its answer in the final try is
    /// correct, and nothing otherwise. The grade is the mean over all rows.
    ///
    /// # Arguments
    /// * `responses` - The submitted responses, one per try, oldest first.
    /// * `penalty` - Deduction per wrong try.
    pub fn compute_final_grade(&self, responses: &[Response], penalty: f64) -> Result<f64, KprimeError> {
        let rows = self.get_order()?.len();
        if rows == 0 {
            return Ok(0.0);
        }

        let mut total = 0.0;
        for position in 0..rows {
            let mut last_wrong: Option<usize> = None;
            let mut finally_right = false;

            for (i, response) in responses.iter().enumerate() {
                if self.is_row_correct(response, position)? {
                    finally_right = true;
                } else {
                    last_wrong = Some(i);
                    finally_right = false;
                }
            }

            if finally_right {
                let wrong_tries = last_wrong.map_or(0, |i| i + 1);
                total += (1.0 - wrong_tries as f64 * penalty).max(0.0);
            }
        }

        Ok(total / rows as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::Order;
    use crate::test_support::definition;
    use serde_json::json;

    fn question(correct: &[u32], order: Vec<i64>, method: &str) -> KprimeQuestion {
        KprimeQuestion::new(definition(correct, false, method), Some(Order::new(order))).unwrap()
    }

    fn answers(columns: &[u32]) -> Response {
        columns
            .iter()
            .enumerate()
            .map(|(i, c)| (format!("option{i}"), json!(c)))
            .collect()
    }

    #[test]
    fn test_grade_response_states() {
        let q = question(&[1, 2, 1, 2], vec![101, 102, 103, 104], "kprime");
        assert_eq!(
            q.grade_response(&answers(&[1, 2, 1, 2])).unwrap(),
            (1.0, QuestionState::Right)
        );
        assert_eq!(
            q.grade_response(&answers(&[1, 2, 1, 1])).unwrap(),
            (0.5, QuestionState::Partial)
        );
        assert_eq!(
            q.grade_response(&answers(&[2, 1, 1, 1])).unwrap(),
            (0.0, QuestionState::Wrong)
        );
    }

    #[test]
    fn test_grade_response_unknown_method() {
        let q = question(&[1, 2], vec![101, 102], "mystery");
        assert_eq!(
            q.grade_response(&answers(&[1, 2])).unwrap_err(),
            KprimeError::UnknownScoringMethod("mystery".to_string())
        );
    }

    #[test]
    fn test_correct_response_follows_order() {
        let q = question(&[1, 2, 2], vec![103, 101, 102], "kprime");
        assert_eq!(q.get_correct_response().unwrap(), answers(&[2, 1, 2]));
    }

    #[test]
    fn test_correct_response_picks_first_positive_column() {
        let mut def = definition(&[1, 2], false, "kprime");
        for w in def.weights.iter_mut() {
            if w.row_number == 1 {
                w.weight = 0.5;
            }
        }
        let q = KprimeQuestion::new(def, Some(Order::new(vec![101, 102]))).unwrap();
        assert_eq!(q.get_correct_response().unwrap(), answers(&[1, 2]));
    }

    #[test]
    fn test_correct_response_by_row_id() {
        let q = question(&[2, 1], vec![102, 101], "kprime");
        assert_eq!(
            q.correct_response_by_row_id().unwrap(),
            BTreeMap::from([(101, 2), (102, 1)])
        );
    }

    #[test]
    fn test_final_grade_penalises_earlier_wrong_tries() {
        let q = question(&[1], vec![101], "kprime");
        let tries = vec![answers(&[2]), answers(&[1])];
        let grade = q.compute_final_grade(&tries, 0.3).unwrap();
        assert!((grade - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_final_grade_averages_rows() {
        let q = question(&[1, 2], vec![101, 102], "kprime");
        // Row 0: right on both tries => 1.0. Row 1: wrong then right => 0.7.
        let tries = vec![answers(&[1, 1]), answers(&[1, 2])];
        let grade = q.compute_final_grade(&tries, 0.3).unwrap();
        assert!((grade - 0.85).abs() < 1e-9);
    }

    #[test]
    fn test_final_grade_row_finally_wrong_earns_nothing() {
        let q = question(&[1, 2], vec![101, 102], "kprime");
        let tries = vec![answers(&[1, 2]), answers(&[1, 1])];
        let grade = q.compute_final_grade(&tries, 0.3).unwrap();
        assert!((grade - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_final_grade_never_negative() {
        let q = question(&[1], vec![101], "kprime");
        let tries = vec![answers(&[2]), answers(&[2]), answers(&[2]), answers(&[1])];
        assert_eq!(q.compute_final_grade(&tries, 0.5).unwrap(), 0.0);
    }

    #[test]
    fn test_final_grade_without_tries() {
        let q = question(&[1, 2], vec![101, 102], "kprime");
        assert_eq!(q.compute_final_grade(&[], 0.3).unwrap(), 0.0);
    }
}
