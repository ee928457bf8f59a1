//! # Attempt Order
//!
//! The order fixes which row is shown at which position during one attempt, and so which
//! form field (`option0`, `option1`, ...) belongs to which row. It is established once when
//! the attempt starts and persisted in the first attempt step as comma-joined row ids.
//!
//! Field names are derived from the *position*, never the row id. Historical responses are
//! stored under these names, so the `option` + position scheme must not change.

use crate::error::KprimeError;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::fmt;
use tracing::warn;
use util::question_bank::question_bank::Row;

/// Name of the attempt step variable holding the persisted order.
pub const ORDER_VAR: &str = "_order";

/// Prefix of every response field name.
pub const FIELD_PREFIX: &str = "option";

const ORDER_DELIMITER: char = ',';

/// Name of the response field for the row displayed at `position`.
pub fn field(position: usize) -> String {
    format!("{FIELD_PREFIX}{position}")
}

/// Row ids in display order for one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order(Vec<i64>);

impl Order {
    /// Wraps row ids as an order without checking them against a question.
    pub fn new(row_ids: Vec<i64>) -> Self {
        Self(row_ids)
    }

    /// Rows in their authored order.
    pub fn identity(rows: &[Row]) -> Self {
        Self(rows.iter().map(|row| row.id).collect())
    }

    /// A uniformly random permutation of the rows.
    pub fn shuffled<R: Rng + ?Sized>(rows: &[Row], rng: &mut R) -> Self {
        let mut ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        ids.shuffle(rng);
        Self(ids)
    }

    /// Decodes a persisted order and checks it is a permutation of `rows`.
    ///
    /// The string is split on single commas with no trimming, so `"1, 2"` is rejected.
    pub fn parse(persisted: &str, rows: &[Row]) -> Result<Self, KprimeError> {
        let row_ids = persisted
            .split(ORDER_DELIMITER)
            .map(|part| {
                part.parse::<i64>().map_err(|_| {
                    warn!("Unparseable row id '{}' in persisted order '{}'", part, persisted);
                    KprimeError::OrderIntegrity(format!("'{part}' is not a row id"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let order = Self(row_ids);
        order.verify(rows)?;
        Ok(order)
    }

    /// Checks that the order names every row exactly once.
    pub fn verify(&self, rows: &[Row]) -> Result<(), KprimeError> {
        if self.0.len() != rows.len() {
            warn!(
                "Attempt order has {} entries but the question has {} rows",
                self.0.len(),
                rows.len()
            );
            return Err(KprimeError::OrderIntegrity(format!(
                "expected {} rows, found {}",
                rows.len(),
                self.0.len()
            )));
        }

        let known: HashSet<i64> = rows.iter().map(|row| row.id).collect();
        let mut seen = HashSet::with_capacity(self.0.len());
        for id in &self.0 {
            if !known.contains(id) {
                warn!("Attempt order references unknown row {}", id);
                return Err(KprimeError::OrderIntegrity(format!("unknown row id {id}")));
            }
            if !seen.insert(*id) {
                warn!("Attempt order repeats row {}", id);
                return Err(KprimeError::OrderIntegrity(format!("duplicate row id {id}")));
            }
        }
        Ok(())
    }

    /// The persisted form: ids joined by commas.
    pub fn encode(&self) -> String {
        self.0
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn row_ids(&self) -> &[i64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `(position, row id)` pairs in display order.
    pub fn positions(&self) -> impl Iterator<Item = (usize, i64)> + '_ {
        self.0.iter().copied().enumerate()
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
