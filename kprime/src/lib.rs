//! # K-prime Question Library
//!
//! This crate provides the grading core of a k-prime matrix question: the student marks one
//! column (e.g. True/False) for every row (statement), and the response is scored by a
//! pluggable strategy, all-or-nothing or with partial credit.
//!
//! ## Key Concepts
//! - **KprimeQuestion**: One question instance, used for exactly one attempt.
//! - **Order**: The per-attempt row order, established once and persisted in the first attempt step.
//! - **Weights**: The row × column matrix; a positive weight marks a correct choice.
//! - **Grading strategies**: Pluggable scoring rules (see [`grading`]).
//! - **Summaries**: Plain-text renderings of responses for reports (see [`summary`]).
//!
//! ## Lifecycle
//!
//! ```rust
//! use kprime::KprimeQuestion;
//! use kprime::utilities::attempt_store::InMemoryAttemptStep;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use serde_json::json;
//! use util::question_bank::question_bank::QuestionDefinition;
//!
//! let definition = QuestionDefinition::from_json(r#"{
//!     "id": 1,
//!     "rows": [
//!         { "id": 10, "number": 1, "option_text": "2 + 2 = 4" },
//!         { "id": 11, "number": 2, "option_text": "2 + 2 = 5" }
//!     ],
//!     "columns": [
//!         { "id": 1, "number": 1, "response_text": "True" },
//!         { "id": 2, "number": 2, "response_text": "False" }
//!     ],
//!     "weights": [
//!         { "row_number": 1, "column_number": 1, "weight": 1.0 },
//!         { "row_number": 1, "column_number": 2, "weight": 0.0 },
//!         { "row_number": 2, "column_number": 1, "weight": 0.0 },
//!         { "row_number": 2, "column_number": 2, "weight": 1.0 }
//!     ],
//!     "config": { "number_of_rows": 2, "shuffle_options": false }
//! }"#).unwrap();
//!
//! let mut question = KprimeQuestion::new(definition, None).unwrap();
//! let mut step = InMemoryAttemptStep::new();
//! question.start_attempt(&mut step, &mut StdRng::seed_from_u64(7)).unwrap();
//!
//! let response: kprime::types::Response = [("option0".to_string(), json!(1)), ("option1".to_string(), json!(2))].into();
//! let (fraction, _state) = question.grade_response(&response).unwrap();
//! assert_eq!(fraction, 1.0);
//! ```

pub mod error;
pub mod grading;
pub mod order;
pub mod response;
pub mod scorer;
pub mod summary;
pub mod traits;
pub mod types;
pub mod utilities;
pub mod weights;

use crate::error::KprimeError;
use crate::grading::ScoringMethod;
use crate::order::{ORDER_VAR, Order};
use crate::summary::PlainTextRenderer;
use crate::traits::attempt::{AttemptHistory, AttemptStep};
use crate::traits::grading::GradingStrategy;
use crate::traits::renderer::TextRenderer;
use crate::types::Response;
use crate::weights::WeightMatrix;

use rand::Rng;
use std::collections::HashMap;
use tracing::debug;
use util::question_bank::question_bank::{Column, QuestionDefinition, Row, TextFormat};

/// A k-prime question prepared for a single attempt.
///
/// Holds the authored definition (read-only), the weight matrix and, once established,
/// the attempt's row order. Concurrent attempts must each use their own instance.
///
/// # Fields
/// - `definition`: Rows, columns, weights and config as loaded from the question bank.
/// - `weights`: Weight lookup keyed by (row number, column number).
/// - `row_index`: Position of each row id in `definition.rows`.
/// - `order`: The attempt's row order, set at most once.
/// - `grading`: Strategy overriding the configured scoring method.
/// - `renderer`: Rich text to plain text conversion used by summaries.
pub struct KprimeQuestion {
    definition: QuestionDefinition,
    weights: WeightMatrix,
    row_index: HashMap<i64, usize>,
    order: Option<Order>,
    grading: Option<Box<dyn GradingStrategy>>,
    renderer: Box<dyn TextRenderer>,
}

impl KprimeQuestion {
    /// Create a question instance, optionally with an order that was established earlier.
    ///
    /// # Arguments
    /// * `definition` - The question as stored in the question bank.
    /// * `order` - An already established order, or `None` for a fresh attempt.
    ///
    /// # Errors
    /// * [`KprimeError::InvalidDefinition`] if the definition fails validation.
    /// * [`KprimeError::OrderIntegrity`] if `order` is not a permutation of the rows.
    pub fn new(definition: QuestionDefinition, order: Option<Order>) -> Result<Self, KprimeError> {
        definition
            .validate()
            .map_err(KprimeError::InvalidDefinition)?;

        if let Some(order) = &order {
            order.verify(&definition.rows)?;
        }

        let weights = WeightMatrix::from_entries(&definition.weights);
        let row_index = definition
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| (row.id, i))
            .collect();

        Ok(Self {
            definition,
            weights,
            row_index,
            order,
            grading: None,
            renderer: Box::new(PlainTextRenderer),
        })
    }

    /// Rebuild the instance of a running attempt from the step that started it.
    ///
    /// The order always comes from the first step of the attempt, never the current one.
    pub fn from_first_step<S: AttemptStep>(
        definition: QuestionDefinition,
        first_step: &S,
    ) -> Result<Self, KprimeError> {
        let mut question = Self::new(definition, None)?;
        question.apply_attempt_state(first_step)?;
        Ok(question)
    }

    /// Rebuild the instance of a running attempt from its recorded steps.
    pub fn from_history<H: AttemptHistory>(
        definition: QuestionDefinition,
        history: &H,
    ) -> Result<Self, KprimeError> {
        let first_step = history
            .first_step()
            .ok_or_else(|| KprimeError::MissingStepVariable(ORDER_VAR.to_string()))?;
        Self::from_first_step(definition, first_step)
    }

    /// Use `grading` instead of the strategy named by the configured scoring method.
    pub fn with_grading<G: GradingStrategy + 'static>(mut self, grading: G) -> Self {
        self.grading = Some(Box::new(grading));
        self
    }

    /// Set a custom rich text renderer for summaries.
    pub fn with_renderer<T: TextRenderer + 'static>(mut self, renderer: T) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn definition(&self) -> &QuestionDefinition {
        &self.definition
    }

    pub fn rows(&self) -> &[Row] {
        &self.definition.rows
    }

    pub fn columns(&self) -> &[Column] {
        &self.definition.columns
    }

    pub fn row(&self, row_id: i64) -> Result<&Row, KprimeError> {
        self.row_index
            .get(&row_id)
            .map(|&i| &self.definition.rows[i])
            .ok_or(KprimeError::UnknownRow(row_id))
    }

    /// Column with the given number, if the question has one.
    pub fn column_by_number(&self, number: u32) -> Option<&Column> {
        self.definition.columns.iter().find(|c| c.number == number)
    }

    /// Establish the row order of a fresh attempt and persist it in `step`.
    ///
    /// Rows keep their authored order unless the question shuffles options, in which case
    /// `rng` picks a uniformly random permutation.
    ///
    /// # Errors
    /// * [`KprimeError::OrderAlreadyInitialised`] if this instance already has an order.
    pub fn start_attempt<S, R>(&mut self, step: &mut S, rng: &mut R) -> Result<&Order, KprimeError>
    where
        S: AttemptStep,
        R: Rng + ?Sized,
    {
        if self.order.is_some() {
            return Err(KprimeError::OrderAlreadyInitialised);
        }

        let order = if self.definition.config.shuffle_options {
            Order::shuffled(&self.definition.rows, rng)
        } else {
            Order::identity(&self.definition.rows)
        };

        step.set_qt_var(ORDER_VAR, &order.encode());
        debug!(
            "Question {} started attempt with order {}",
            self.definition.id, order
        );

        Ok(&*self.order.insert(order))
    }

    /// Restore the row order persisted by [`KprimeQuestion::start_attempt`].
    ///
    /// # Errors
    /// * [`KprimeError::OrderAlreadyInitialised`] if this instance already has an order.
    /// * [`KprimeError::MissingStepVariable`] if `step` carries no order.
    /// * [`KprimeError::OrderIntegrity`] if the persisted order does not match the rows.
    pub fn apply_attempt_state<S: AttemptStep>(&mut self, step: &S) -> Result<&Order, KprimeError> {
        if self.order.is_some() {
            return Err(KprimeError::OrderAlreadyInitialised);
        }

        let persisted = step
            .get_qt_var(ORDER_VAR)
            .ok_or_else(|| KprimeError::MissingStepVariable(ORDER_VAR.to_string()))?;
        let order = Order::parse(persisted, &self.definition.rows)?;
        debug!(
            "Question {} restored attempt order {}",
            self.definition.id, order
        );

        Ok(&*self.order.insert(order))
    }

    /// The attempt's row order.
    pub fn get_order(&self) -> Result<&Order, KprimeError> {
        self.order.as_ref().ok_or(KprimeError::OrderNotInitialised)
    }

    /// `(position, row)` pairs in the attempt's display order.
    pub fn ordered_rows(&self) -> Result<Vec<(usize, &Row)>, KprimeError> {
        self.get_order()?
            .positions()
            .map(|(position, row_id)| Ok((position, self.row(row_id)?)))
            .collect()
    }

    /// Resolve the grading strategy for this question.
    ///
    /// # Errors
    /// * [`KprimeError::UnknownScoringMethod`] if the configured tag names no strategy.
    pub fn grading(&self) -> Result<&dyn GradingStrategy, KprimeError> {
        if let Some(grading) = &self.grading {
            return Ok(grading.as_ref());
        }
        let method: ScoringMethod = self.definition.config.scoring_method.parse()?;
        Ok(grading::resolve(method))
    }

    /// Response data of the attempt's latest submission.
    pub fn current_response<H: AttemptHistory>(&self, history: &H) -> Response {
        history.get_last_qt_data()
    }

    /// Flatten stored rich text to plain text with the configured renderer.
    pub fn html_to_text(&self, text: &str, format: TextFormat) -> String {
        self.renderer.to_plain_text(text, format)
    }
}
