//! Answer grading
//!
//! Compares the expected answer with the one the service returned and
//! assigns a verdict.

pub mod similarity;

use std::fmt;

use serde::Serialize;

use crate::common::{Error, Result};

pub use similarity::{normalize, ratio};

/// Per-row classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Pass,
    Fail,
    /// The service gave no answer, or the row was skipped
    #[default]
    Unset,
}

impl Verdict {
    /// Text written to the report's Pass/Fail column
    ///
    /// Unset rows leave the cell blank.
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Pass => "PASS",
            Verdict::Fail => "FAIL",
            Verdict::Unset => "",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass => write!(f, "PASS"),
            Verdict::Fail => write!(f, "FAIL"),
            Verdict::Unset => write!(f, "UNSET"),
        }
    }
}

/// Grades returned answers against a similarity threshold
#[derive(Debug, Clone, Copy)]
pub struct Grader {
    threshold: u8,
}

impl Grader {
    /// Create a grader; `threshold` is on the 0-100 similarity scale
    pub fn new(threshold: u8) -> Result<Self> {
        if threshold > 100 {
            return Err(Error::Config(format!(
                "Pass threshold must be between 0 and 100, got {}",
                threshold
            )));
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Decide the verdict for one row
    ///
    /// A zero confidence score never passes, even on identical text.
    pub fn grade(&self, expected: &str, returned: Option<&str>, score: Option<f64>) -> Verdict {
        let Some(returned) = returned else {
            return Verdict::Unset;
        };

        let confident = matches!(score, Some(s) if s != 0.0);
        if confident && self.similarity(expected, returned) >= self.threshold {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }

    /// Similarity of the normalized texts
    pub fn similarity(&self, expected: &str, returned: &str) -> u8 {
        ratio(&normalize(expected), &normalize(returned))
    }
}
