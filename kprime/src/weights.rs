//! # Weights Module
//!
//! Lookup and interpretation of the row × column weight matrix. Weights are keyed by row
//! number and column number; a weight above zero marks the column as a correct choice for
//! the row. A pair without an authored weight is an error, never an implicit zero.

use crate::KprimeQuestion;
use crate::error::KprimeError;
use crate::order::field;
use crate::response::selected_column;
use crate::types::Response;
use std::collections::{BTreeMap, HashMap};
use util::question_bank::question_bank::{Column, Row, WeightEntry};

/// Anything that identifies a row or column by number: the record itself or the bare number.
pub trait Numbered {
    fn number(&self) -> u32;
}

impl Numbered for u32 {
    fn number(&self) -> u32 {
        *self
    }
}

impl Numbered for Row {
    fn number(&self) -> u32 {
        self.number
    }
}

impl Numbered for Column {
    fn number(&self) -> u32 {
        self.number
    }
}

impl<T: Numbered + ?Sized> Numbered for &T {
    fn number(&self) -> u32 {
        (**self).number()
    }
}

/// Weights indexed by (row number, column number).
#[derive(Debug, Clone, Default)]
pub struct WeightMatrix {
    weights: HashMap<(u32, u32), f64>,
}

impl WeightMatrix {
    pub fn from_entries(entries: &[WeightEntry]) -> Self {
        Self {
            weights: entries
                .iter()
                .map(|e| ((e.row_number, e.column_number), e.weight))
                .collect(),
        }
    }

    /// The weight of a row/column pair.
    ///
    /// # Errors
    /// Returns [`KprimeError::MissingWeight`] if no weight was authored for the pair.
    pub fn weight<R: Numbered, C: Numbered>(&self, row: R, column: C) -> Result<f64, KprimeError> {
        let (row, column) = (row.number(), column.number());
        self.weights
            .get(&(row, column))
            .copied()
            .ok_or(KprimeError::MissingWeight { row, column })
    }

    pub fn is_correct<R: Numbered, C: Numbered>(&self, row: R, column: C) -> Result<bool, KprimeError> {
        Ok(self.weight(row, column)? > 0.0)
    }
}

impl KprimeQuestion {
    /// Weight of the given row and column; see [`WeightMatrix::weight`].
    pub fn weight<R: Numbered, C: Numbered>(&self, row: R, column: C) -> Result<f64, KprimeError> {
        self.weights.weight(row, column)
    }

    /// Whether `column` is a correct choice for `row`.
    pub fn is_correct<R: Numbered, C: Numbered>(&self, row: R, column: C) -> Result<bool, KprimeError> {
        self.weights.is_correct(row, column)
    }

    /// The weight of every column for every row, keyed by the row's field name and then by
    /// column number, in attempt order.
    pub fn cells(&self) -> Result<BTreeMap<String, BTreeMap<u32, f64>>, KprimeError> {
        let mut result = BTreeMap::new();
        for (position, row) in self.ordered_rows()? {
            let mut row_weights = BTreeMap::new();
            for column in self.columns() {
                row_weights.insert(column.number, self.weight(row, column)?);
            }
            result.insert(field(position), row_weights);
        }
        Ok(result)
    }

    /// Whether the row shown at `position` is answered with a correct column.
    ///
    /// Unanswered rows and selections naming no existing column count as wrong.
    pub fn is_row_correct(&self, response: &Response, position: usize) -> Result<bool, KprimeError> {
        let row_id = self
            .get_order()?
            .row_ids()
            .get(position)
            .copied()
            .ok_or_else(|| KprimeError::OrderIntegrity(format!("no row at position {position}")))?;
        let row = self.row(row_id)?;

        match selected_column(response, position).and_then(|n| self.column_by_number(n)) {
            Some(column) => self.is_correct(row, column),
            None => Ok(false),
        }
    }

    /// Number of rows answered with a correct column.
    pub fn count_correct_rows(&self, response: &Response) -> Result<usize, KprimeError> {
        let mut correct = 0;
        for position in 0..self.get_order()?.len() {
            if self.is_row_correct(response, position)? {
                correct += 1;
            }
        }
        Ok(correct)
    }
}
