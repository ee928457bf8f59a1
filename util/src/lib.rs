//! Shared data model and configuration for k-prime matrix questions.
//!
//! - [`question_config`]: per-question settings (shuffling, penalty, scoring method).
//! - [`question_bank`]: rows, columns and weights as stored by the question bank.
//! - [`paths`]: where question definitions live on disk.

pub mod paths;
pub mod question_bank;
pub mod question_config;
