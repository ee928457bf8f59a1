//! Question bank records for k-prime matrix questions.
//!
//! A [`QuestionDefinition`] bundles everything the question bank stores for one question:
//! the rows (statements), the columns (answer choices), the weight of every row/column
//! pair and the [`QuestionConfig`]. Definitions are JSON documents stored under
//! [`crate::paths::question_dir`].

use crate::paths::{definition_path, ensure_dir};
use crate::question_config::question_config::QuestionConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::error;

/// Maximum size accepted for a definition document.
const MAX_DEFINITION_SIZE: u64 = 1024 * 1024; // 1MB

/// Storage format of a rich-text field.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TextFormat {
    #[default]
    Html,
    Moodle,
    Plain,
    Markdown,
}

/// A statement presented as one row of the matrix.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Row {
    pub id: i64,
    /// Display number, starting at 1. Weights are keyed by this number.
    pub number: u32,
    pub option_text: String,
    #[serde(default)]
    pub option_text_format: TextFormat,
}

/// An answer choice presented as one column of the matrix.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Column {
    pub id: i64,
    /// Column number, starting at 1. Submitted responses carry this number.
    pub number: u32,
    pub response_text: String,
    #[serde(default)]
    pub response_text_format: TextFormat,
}

/// Weight of one row/column pair. A positive weight marks the column as correct for the row.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct WeightEntry {
    pub row_number: u32,
    pub column_number: u32,
    pub weight: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct QuestionDefinition {
    pub id: i64,
    #[serde(default)]
    pub question_text: String,
    #[serde(default)]
    pub question_text_format: TextFormat,
    /// Rows in authoring order. This is the unshuffled attempt order.
    pub rows: Vec<Row>,
    pub columns: Vec<Column>,
    pub weights: Vec<WeightEntry>,
    #[serde(default)]
    pub config: QuestionConfig,
}

impl QuestionDefinition {
    /// Parse a definition from its JSON form.
    pub fn from_json(raw: &str) -> Result<Self, String> {
        serde_json::from_str(raw).map_err(|e| format!("Invalid question definition JSON: {e}"))
    }

    /// Load and validate a definition document from `path`.
    pub fn load(path: &Path) -> Result<Self, String> {
        let metadata = fs::metadata(path).map_err(|e| {
            error!("Question definition unreadable: {} - {}", path.display(), e);
            format!("Failed to read question definition at {path:?}")
        })?;

        if metadata.len() > MAX_DEFINITION_SIZE {
            error!(
                "Question definition too large: {} ({} bytes, max {} bytes)",
                path.display(),
                metadata.len(),
                MAX_DEFINITION_SIZE
            );
            return Err("Question definition too large".to_string());
        }

        let contents = fs::read_to_string(path)
            .map_err(|_| format!("Failed to read question definition at {path:?}"))?;

        let definition = Self::from_json(&contents)?;
        definition.validate()?;
        Ok(definition)
    }

    /// Load the definition of `question_id` from the storage root.
    pub fn load_for_question(question_id: i64) -> Result<Self, String> {
        Self::load(&definition_path(question_id))
    }

    /// Save the definition under the storage root, pretty-printed.
    pub fn save(&self) -> Result<(), String> {
        let path = definition_path(self.id);
        if let Some(parent) = path.parent() {
            ensure_dir(parent)
                .map_err(|e| format!("Failed to create question directory: {e:?}"))?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize question definition to JSON: {e}"))?;

        fs::write(&path, json)
            .map_err(|e| format!("Failed to write question definition to disk: {e:?}"))?;

        Ok(())
    }

    /// Checks that the matrix agrees with the config and that every cell has a weight.
    pub fn validate(&self) -> Result<(), String> {
        self.config.validate()?;

        if self.rows.len() != self.config.number_of_rows {
            return Err(format!(
                "Expected {} rows, found {}",
                self.config.number_of_rows,
                self.rows.len()
            ));
        }
        if self.columns.len() != self.config.number_of_columns {
            return Err(format!(
                "Expected {} columns, found {}",
                self.config.number_of_columns,
                self.columns.len()
            ));
        }

        let mut row_ids = HashSet::new();
        let mut row_numbers = HashSet::new();
        for row in &self.rows {
            if !row_ids.insert(row.id) {
                return Err(format!("Duplicate row id {}", row.id));
            }
            if !row_numbers.insert(row.number) {
                return Err(format!("Duplicate row number {}", row.number));
            }
        }

        let mut column_numbers = HashSet::new();
        for column in &self.columns {
            if !column_numbers.insert(column.number) {
                return Err(format!("Duplicate column number {}", column.number));
            }
        }

        let mut cells = HashSet::new();
        for w in &self.weights {
            if !cells.insert((w.row_number, w.column_number)) {
                return Err(format!(
                    "Duplicate weight for row {} column {}",
                    w.row_number, w.column_number
                ));
            }
        }

        for row in &self.rows {
            for column in &self.columns {
                if !cells.contains(&(row.number, column.number)) {
                    return Err(format!(
                        "Missing weight for row {} column {}",
                        row.number, column.number
                    ));
                }
            }
        }

        Ok(())
    }
}
