//tests/attempt_lifecycle.rs
use kprime::KprimeQuestion;
use kprime::error::KprimeError;
use kprime::response::{VALIDATION_MESSAGE, is_same_response};
use kprime::traits::attempt::{AttemptHistory, AttemptStep};
use kprime::types::{QuestionState, Response};
use kprime::utilities::attempt_store::{InMemoryAttempt, InMemoryAttemptStep};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::Value;
use util::question_bank::question_bank::QuestionDefinition;

const DEFINITION: &str = r#"{
    "id": 42,
    "question_text": "<p>Which statements about Rust are true?</p>",
    "rows": [
        { "id": 501, "number": 1, "option_text": "<p>Ownership is checked at compile time</p>" },
        { "id": 502, "number": 2, "option_text": "<p>Every value has two owners</p>" },
        { "id": 503, "number": 3, "option_text": "<p>Traits can have default methods</p>" },
        { "id": 504, "number": 4, "option_text": "<p><code>unsafe</code> disables the borrow checker</p>" }
    ],
    "columns": [
        { "id": 7, "number": 1, "response_text": "True", "response_text_format": "plain" },
        { "id": 8, "number": 2, "response_text": "False", "response_text_format": "plain" }
    ],
    "weights": [
        { "row_number": 1, "column_number": 1, "weight": 1.0 },
        { "row_number": 1, "column_number": 2, "weight": 0.0 },
        { "row_number": 2, "column_number": 1, "weight": 0.0 },
        { "row_number": 2, "column_number": 2, "weight": 1.0 },
        { "row_number": 3, "column_number": 1, "weight": 1.0 },
        { "row_number": 3, "column_number": 2, "weight": 0.0 },
        { "row_number": 4, "column_number": 1, "weight": 0.0 },
        { "row_number": 4, "column_number": 2, "weight": 1.0 }
    ],
    "config": { "shuffle_options": true, "penalty": 0.3 }
}"#;

fn definition() -> QuestionDefinition {
    QuestionDefinition::from_json(DEFINITION).expect("definition should parse")
}

fn start(seed: u64) -> (KprimeQuestion, InMemoryAttempt) {
    let mut question = KprimeQuestion::new(definition(), None).expect("definition is valid");
    let mut first = InMemoryAttemptStep::new();
    question
        .start_attempt(&mut first, &mut StdRng::seed_from_u64(seed))
        .expect("fresh question has no order");
    (question, InMemoryAttempt::new(first))
}

/// The correct response with the answer at `position` switched to the other column.
fn with_wrong_row(correct: &Response, position: usize) -> Response {
    let mut response = correct.clone();
    let key = format!("option{position}");
    let flipped = match response[&key].as_u64() {
        Some(1) => 2,
        _ => 1,
    };
    response.insert(key, Value::from(flipped));
    response
}

#[test]
fn test_restored_question_sees_same_order() {
    let (question, attempt) = start(11);
    let restored = KprimeQuestion::from_history(definition(), &attempt).unwrap();

    assert_eq!(restored.get_order().unwrap(), question.get_order().unwrap());
    assert_eq!(
        attempt.first_step().unwrap().get_qt_var("_order"),
        Some(question.get_order().unwrap().encode().as_str())
    );
    assert_eq!(restored.get_correct_response().unwrap(), question.get_correct_response().unwrap());
}

#[test]
fn test_full_attempt_is_graded_right() {
    let (question, mut attempt) = start(5);
    let correct = question.get_correct_response().unwrap();
    assert_eq!(correct.len(), 4);

    attempt.submit(correct.clone());
    let current = question.current_response(&attempt);
    assert!(is_same_response(&current, &correct));
    assert_eq!(question.get_validation_error(&current).unwrap(), "");
    assert_eq!(
        question.grade_response(&current).unwrap(),
        (1.0, QuestionState::Right)
    );
}

#[test]
fn test_partial_and_incomplete_submissions() {
    let (question, _) = start(23);
    let correct = question.get_correct_response().unwrap();

    let one_wrong = with_wrong_row(&correct, 2);
    assert_eq!(
        question.grade_response(&one_wrong).unwrap(),
        (0.5, QuestionState::Partial)
    );

    let two_wrong = with_wrong_row(&one_wrong, 0);
    assert_eq!(
        question.grade_response(&two_wrong).unwrap(),
        (0.0, QuestionState::Wrong)
    );

    let mut incomplete = correct.clone();
    incomplete.remove("option3");
    assert!(!question.is_gradable_response(&incomplete).unwrap());
    assert_eq!(
        question.get_validation_error(&incomplete).unwrap(),
        VALIDATION_MESSAGE
    );
}

#[test]
fn test_summaries_follow_attempt_order() {
    let (question, _) = start(3);
    let correct = question.get_correct_response().unwrap();
    let by_row = question.correct_response_by_row_id().unwrap();

    let expected: Vec<String> = question
        .get_order()
        .unwrap()
        .row_ids()
        .iter()
        .map(|id| {
            let row = question.row(*id).unwrap();
            let text = question.html_to_text(&row.option_text, row.option_text_format);
            let column = if by_row[id] == 7 { "True" } else { "False" };
            format!("{text}: {column}")
        })
        .collect();

    assert_eq!(
        question.summarise_response(&correct).unwrap(),
        expected.join("; ")
    );
    assert!(
        question
            .question_summary()
            .unwrap()
            .starts_with("Which statements about Rust are true?: ")
    );
}

#[test]
fn test_final_grade_over_several_tries() {
    let (question, mut attempt) = start(8);
    let correct = question.get_correct_response().unwrap();
    let penalty = question.definition().config.penalty;

    attempt.submit(with_wrong_row(&correct, 1));
    attempt.submit(correct.clone());

    let tries: Vec<Response> = attempt
        .steps()
        .iter()
        .map(|step| step.get_qt_data())
        .filter(|data| !data.is_empty())
        .collect();
    assert_eq!(tries.len(), 2);

    let grade = question.compute_final_grade(&tries, penalty).unwrap();
    assert!((grade - (3.0 + 0.7) / 4.0).abs() < 1e-9, "grade was {grade}");
}

#[test]
fn test_one_zero_scoring_gives_no_partial_credit() {
    let mut def = definition();
    def.config.scoring_method = "kprimeonezero".to_string();
    let mut question = KprimeQuestion::new(def, None).unwrap();
    question
        .start_attempt(&mut InMemoryAttemptStep::new(), &mut StdRng::seed_from_u64(1))
        .unwrap();

    let correct = question.get_correct_response().unwrap();
    assert_eq!(question.grade_response(&correct).unwrap().0, 1.0);
    assert_eq!(
        question.grade_response(&with_wrong_row(&correct, 0)).unwrap(),
        (0.0, QuestionState::Wrong)
    );
}

#[test]
fn test_tampered_order_is_rejected() {
    let mut first = InMemoryAttemptStep::new();
    first.set_qt_var("_order", "501,502,503,503");
    let attempt = InMemoryAttempt::new(first);

    assert!(matches!(
        KprimeQuestion::from_history(definition(), &attempt),
        Err(KprimeError::OrderIntegrity(_))
    ));
}

#[test]
fn test_expected_data_names_every_row() {
    let (question, _) = start(2);
    let expected = question.get_expected_data().unwrap();
    assert_eq!(expected.len(), 4);
    assert!(expected.contains_key("option3"));
    assert_eq!(question.cells().unwrap()["option0"].len(), 2);
}
