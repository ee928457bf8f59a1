//! # Grading Strategies
//!
//! This module provides the scoring strategies a k-prime question can be configured with.
//! Each strategy implements the [`GradingStrategy`] trait, which turns the per-row correctness
//! of a complete response into a single fraction. This allows the scoring rule to be chosen
//! per question without touching the rest of the engine.
//!
//! The available strategies are:
//! - [`kprime`]: Full marks for all rows correct, half marks with exactly one row wrong.
//! - [`kprime_one_zero`]: Full marks for all rows correct, nothing otherwise.
//! - [`subpoints`]: One share of the marks per correct row.

pub mod kprime;
pub mod kprime_one_zero;
pub mod subpoints;

use crate::error::KprimeError;
use crate::grading::kprime::KprimeGrading;
use crate::grading::kprime_one_zero::KprimeOneZeroGrading;
use crate::grading::subpoints::SubpointsGrading;
use crate::traits::grading::GradingStrategy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The tag naming a question's grading strategy, as stored in its config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMethod {
    Kprime,
    KprimeOneZero,
    Subpoints,
}

impl ScoringMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringMethod::Kprime => "kprime",
            ScoringMethod::KprimeOneZero => "kprimeonezero",
            ScoringMethod::Subpoints => "subpoints",
        }
    }
}

impl FromStr for ScoringMethod {
    type Err = KprimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kprime" => Ok(ScoringMethod::Kprime),
            "kprimeonezero" => Ok(ScoringMethod::KprimeOneZero),
            "subpoints" => Ok(ScoringMethod::Subpoints),
            other => Err(KprimeError::UnknownScoringMethod(other.to_string())),
        }
    }
}

impl fmt::Display for ScoringMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The strategy implementing `method`.
pub fn resolve(method: ScoringMethod) -> &'static dyn GradingStrategy {
    match method {
        ScoringMethod::Kprime => &KprimeGrading,
        ScoringMethod::KprimeOneZero => &KprimeOneZeroGrading,
        ScoringMethod::Subpoints => &SubpointsGrading,
    }
}
