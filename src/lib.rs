//! QnA Validator - check a question-answering knowledge base against a
//! labeled dataset
//!
//! The pipeline loads a dataset, infers its question/answer columns, queries
//! an [`service::AnswerService`] row by row, grades each answer by fuzzy
//! similarity and writes a styled report.

pub mod cli;
pub mod commands;
pub mod common;
pub mod console;
pub mod dataset;
pub mod grading;
pub mod pipeline;
pub mod report;
pub mod service;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use grading::{Grader, Verdict};
pub use service::{AnswerCandidate, AnswerService};
