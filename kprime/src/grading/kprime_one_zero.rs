//! All-or-nothing scoring: `KprimeOneZeroGrading` awards full marks only when every row is
//! answered correctly.

use crate::KprimeQuestion;
use crate::error::KprimeError;
use crate::traits::grading::GradingStrategy;
use crate::types::Response;

pub struct KprimeOneZeroGrading;

impl GradingStrategy for KprimeOneZeroGrading {
    fn name(&self) -> &'static str {
        "kprimeonezero"
    }

    fn grade_question(
        &self,
        question: &KprimeQuestion,
        response: &Response,
    ) -> Result<f64, KprimeError> {
        let rows = question.get_order()?.len();
        let correct = question.count_correct_rows(response)?;
        Ok(if correct == rows { 1.0 } else { 0.0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::Order;
    use crate::test_support::definition;
    use serde_json::json;

    fn question() -> KprimeQuestion {
        let order = Order::new(vec![103, 101, 104, 102]);
        KprimeQuestion::new(definition(&[1, 2, 1, 2], true, "kprimeonezero"), Some(order)).unwrap()
    }

    #[test]
    fn test_all_correct_in_shuffled_order() {
        // Rows 103, 101, 104, 102 expect columns 1, 1, 2, 2.
        let response = Response::from([
            ("option0".to_string(), json!(1)),
            ("option1".to_string(), json!(1)),
            ("option2".to_string(), json!(2)),
            ("option3".to_string(), json!(2)),
        ]);
        assert_eq!(KprimeOneZeroGrading.grade_question(&question(), &response).unwrap(), 1.0);
    }

    #[test]
    fn test_one_wrong_scores_nothing() {
        let response = Response::from([
            ("option0".to_string(), json!(1)),
            ("option1".to_string(), json!(1)),
            ("option2".to_string(), json!(2)),
            ("option3".to_string(), json!(1)),
        ]);
        assert_eq!(KprimeOneZeroGrading.grade_question(&question(), &response).unwrap(), 0.0);
    }
}
