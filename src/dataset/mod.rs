//! Labeled question/answer datasets
//!
//! A dataset keeps every column of the source file so the report can echo
//! them back; the question and answer columns are chosen afterwards by
//! [`columns::infer_layout`].

pub mod columns;
pub mod loader;

use std::fmt;

pub use columns::{infer_layout, ColumnLayout};
pub use loader::load;

/// A single cell value, as read from the source file
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    /// Build a cell from raw delimited text; blank text becomes `Empty`
    pub fn from_text(text: &str) -> Self {
        if text.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(text.to_string())
        }
    }

    /// The textual content when this is a text cell
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// True for empty cells and text cells holding only whitespace
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Header names plus data records, in source order
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: Vec<String>,
    records: Vec<Vec<Cell>>,
}

impl Dataset {
    /// Build a dataset; short records are padded with empty cells
    pub fn new(columns: Vec<String>, records: Vec<Vec<Cell>>) -> Self {
        let width = columns.len();
        let records = records
            .into_iter()
            .map(|mut record| {
                if record.len() < width {
                    record.resize(width, Cell::Empty);
                }
                record
            })
            .collect();
        Self { columns, records }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Vec<Cell>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Extract the question/answer pair of one record
    ///
    /// Returns `None` when either cell is blank; such rows are skipped.
    pub fn row(&self, index: usize, layout: ColumnLayout) -> Option<Row> {
        let record = self.records.get(index)?;
        let question = record.get(layout.question)?;
        let answer = record.get(layout.answer)?;

        if question.is_blank() || answer.is_blank() {
            return None;
        }

        Some(Row {
            index,
            question: question.to_string(),
            expected_answer: answer.to_string(),
        })
    }
}

/// One question with its expected answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Position of the record in the dataset
    pub index: usize,
    pub question: String,
    pub expected_answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    #[test]
    fn test_short_records_are_padded() {
        let ds = Dataset::new(
            vec!["Question".into(), "Answer".into(), "Source".into()],
            vec![vec![text("q")]],
        );
        assert_eq!(ds.records()[0].len(), 3);
        assert_eq!(ds.records()[0][2], Cell::Empty);
    }

    #[test]
    fn test_row_extraction_uses_layout() {
        let ds = Dataset::new(
            vec!["Id".into(), "Question".into(), "Answer".into()],
            vec![vec![Cell::Number(1.0), text("What is X?"), text("X is Y")]],
        );
        let row = ds.row(0, ColumnLayout { question: 1, answer: 2 }).unwrap();
        assert_eq!(row.index, 0);
        assert_eq!(row.question, "What is X?");
        assert_eq!(row.expected_answer, "X is Y");
    }

    #[test]
    fn test_blank_answer_row_is_skipped() {
        let ds = Dataset::new(
            vec!["Question".into(), "Answer".into()],
            vec![vec![text("What is X?"), text("   ")], vec![text("Q"), Cell::Empty]],
        );
        let layout = ColumnLayout { question: 0, answer: 1 };
        assert!(ds.row(0, layout).is_none());
        assert!(ds.row(1, layout).is_none());
    }

    #[test]
    fn test_numeric_answer_is_rendered_as_text() {
        let ds = Dataset::new(
            vec!["Question".into(), "Answer".into()],
            vec![vec![text("How many?"), Cell::Number(42.0)]],
        );
        let row = ds.row(0, ColumnLayout { question: 0, answer: 1 }).unwrap();
        assert_eq!(row.expected_answer, "42");
    }
}
