use serde::{Deserialize, Serialize};

/// Settings a k-prime question is authored with. Immutable once the question is loaded.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct QuestionConfig {
    /// Shuffle the rows at the start of every attempt.
    #[serde(default = "default_shuffle_options")]
    pub shuffle_options: bool,

    /// Deduction per wrong try in interactive (multi-try) grading, 0.0–1.0.
    #[serde(default = "default_penalty")]
    pub penalty: f64,

    /// Tag of the grading strategy, e.g. "kprime", "kprimeonezero", "subpoints".
    /// Kept as the raw stored tag; it is resolved when the question is graded.
    #[serde(default = "default_scoring_method")]
    pub scoring_method: String,

    #[serde(default = "default_number_of_rows")]
    pub number_of_rows: usize,

    #[serde(default = "default_number_of_columns")]
    pub number_of_columns: usize,
}

impl Default for QuestionConfig {
    fn default() -> Self {
        Self {
            shuffle_options: default_shuffle_options(),
            penalty: default_penalty(),
            scoring_method: default_scoring_method(),
            number_of_rows: default_number_of_rows(),
            number_of_columns: default_number_of_columns(),
        }
    }
}

impl QuestionConfig {
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Parse a config from its JSON form. Missing fields take their defaults.
    pub fn from_json(raw: &str) -> Result<Self, String> {
        serde_json::from_str(raw).map_err(|e| format!("Invalid question config JSON: {e}"))
    }

    /// Checks the values that cannot be expressed in the type.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.penalty) {
            return Err(format!("Penalty must be between 0 and 1, got {}", self.penalty));
        }
        if self.number_of_rows == 0 {
            return Err("A question needs at least one row".to_string());
        }
        if self.number_of_columns == 0 {
            return Err("A question needs at least one column".to_string());
        }
        if self.scoring_method.trim().is_empty() {
            return Err("Scoring method must not be empty".to_string());
        }
        Ok(())
    }
}

//Default Functions

fn default_shuffle_options() -> bool {
    true
}

fn default_penalty() -> f64 {
    0.3333333
}

fn default_scoring_method() -> String {
    "kprime".to_string()
}

fn default_number_of_rows() -> usize {
    4
}

fn default_number_of_columns() -> usize {
    2
}
