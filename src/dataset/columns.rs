//! Question/answer column inference

use crate::common::{Error, Result};
use crate::grading::ratio;

/// Minimum similarity between the first header and "question" for the
/// first column to be taken as the question column
const QUESTION_HEADER_MIN_RATIO: u8 = 80;

/// Positions of the question and answer columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub question: usize,
    pub answer: usize,
}

/// Choose which columns hold questions and expected answers
///
/// If the first header looks like "question" the layout is (0, 1),
/// otherwise the first column is assumed to be an identifier and the
/// layout is (1, 2). The header comparison is case-sensitive.
pub fn infer_layout(columns: &[String]) -> Result<ColumnLayout> {
    let first = columns.first().map(String::as_str).unwrap_or("");

    let layout = if ratio("question", first) >= QUESTION_HEADER_MIN_RATIO {
        ColumnLayout {
            question: 0,
            answer: 1,
        }
    } else {
        ColumnLayout {
            question: 1,
            answer: 2,
        }
    };

    let required = layout.answer + 1;
    if columns.len() < required {
        return Err(Error::InsufficientColumns {
            required,
            found: columns.len(),
        });
    }

    tracing::debug!(
        "Using '{}' as question column and '{}' as answer column",
        columns[layout.question],
        columns[layout.answer]
    );

    Ok(layout)
}
