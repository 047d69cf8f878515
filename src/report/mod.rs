//! Validation report
//!
//! The report borrows the dataset and owns one [`QueryResult`] per record,
//! appended in dataset order. It is rendered once, after every row has been
//! processed.

pub mod output;
pub mod writer;

use serde::Serialize;

use crate::dataset::{Cell, Dataset};
use crate::grading::Verdict;

pub use output::{ensure_output_available, OutputStatus};
pub use writer::write_xlsx;

/// Columns appended after the dataset's own columns
pub const RESULT_COLUMNS: [&str; 3] = ["Returned_response", "Confidence_score", "Pass/Fail"];

/// Outcome of querying and grading one record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub row_index: usize,
    pub returned_answer: Option<String>,
    pub confidence_score: Option<f64>,
    pub verdict: Verdict,
}

impl QueryResult {
    /// Result for a record that got no answer or was skipped
    pub fn unanswered(row_index: usize) -> Self {
        Self {
            row_index,
            returned_answer: None,
            confidence_score: None,
            verdict: Verdict::Unset,
        }
    }
}

/// True when text spans several lines, either with a real newline or the
/// two-character `\n` escape some exports leave behind
pub fn is_multiline(text: &str) -> bool {
    text.contains('\n') || text.contains("\\n")
}

/// Dataset rows paired with their results
#[derive(Debug)]
pub struct Report<'a> {
    dataset: &'a Dataset,
    results: Vec<QueryResult>,
}

impl<'a> Report<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            results: Vec::with_capacity(dataset.len()),
        }
    }

    /// Append the result for the next record
    ///
    /// Results must arrive in dataset order.
    pub fn push(&mut self, result: QueryResult) {
        debug_assert_eq!(result.row_index, self.results.len());
        self.results.push(result);
    }

    pub fn results(&self) -> &[QueryResult] {
        &self.results
    }

    /// Header row: dataset columns followed by the result columns
    pub fn header(&self) -> Vec<String> {
        self.dataset
            .columns()
            .iter()
            .cloned()
            .chain(RESULT_COLUMNS.iter().map(|c| c.to_string()))
            .collect()
    }

    /// Output cells for every processed record, in order
    pub fn rows(&self) -> impl Iterator<Item = Vec<Cell>> + '_ {
        self.results.iter().map(move |result| {
            let mut cells = self
                .dataset
                .records()
                .get(result.row_index)
                .cloned()
                .unwrap_or_default();
            cells.resize(self.dataset.columns().len(), Cell::Empty);

            cells.push(
                result
                    .returned_answer
                    .as_deref()
                    .map(Cell::from_text)
                    .unwrap_or(Cell::Empty),
            );
            cells.push(result.confidence_score.map(Cell::Number).unwrap_or(Cell::Empty));
            cells.push(Cell::from_text(result.verdict.label()));
            cells
        })
    }

    /// Whether a cell gets the multi-line highlight
    pub fn is_highlighted(cell: &Cell) -> bool {
        cell.as_text().is_some_and(is_multiline)
    }

    pub fn summary(&self) -> Summary {
        let mut summary = Summary {
            total: self.results.len(),
            ..Summary::default()
        };
        for result in &self.results {
            match result.verdict {
                Verdict::Pass => summary.passed += 1,
                Verdict::Fail => summary.failed += 1,
                Verdict::Unset => summary.unset += 1,
            }
        }
        summary
    }
}

/// Verdict counts for a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub unset: usize,
}

impl Summary {
    /// Share of graded rows (PASS or FAIL) that passed, in percent
    pub fn pass_rate(&self) -> Option<f64> {
        let graded = self.passed + self.failed;
        if graded == 0 {
            None
        } else {
            Some(self.passed as f64 * 100.0 / graded as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::new(
            vec!["Question".into(), "Answer".into()],
            vec![
                vec![Cell::Text("What is X?".into()), Cell::Text("X is Y".into())],
                vec![Cell::Text("Lines?".into()), Cell::Text("Line1\nLine2".into())],
            ],
        )
    }

    #[test]
    fn test_header_appends_result_columns() {
        let ds = dataset();
        let report = Report::new(&ds);
        assert_eq!(
            report.header(),
            vec!["Question", "Answer", "Returned_response", "Confidence_score", "Pass/Fail"]
        );
    }

    #[test]
    fn test_rows_render_results() {
        let ds = dataset();
        let mut report = Report::new(&ds);
        report.push(QueryResult {
            row_index: 0,
            returned_answer: Some("X is Y".into()),
            confidence_score: Some(0.9),
            verdict: Verdict::Pass,
        });
        report.push(QueryResult::unanswered(1));

        let rows: Vec<Vec<Cell>> = report.rows().collect();
        assert_eq!(rows[0][2], Cell::Text("X is Y".into()));
        assert_eq!(rows[0][3], Cell::Number(0.9));
        assert_eq!(rows[0][4], Cell::Text("PASS".into()));
        assert_eq!(rows[1][2], Cell::Empty);
        assert_eq!(rows[1][3], Cell::Empty);
        assert_eq!(rows[1][4], Cell::Empty);
    }

    #[test]
    fn test_multiline_detection() {
        assert!(is_multiline("Line1\nLine2"));
        assert!(is_multiline("Line1\\nLine2"));
        assert!(!is_multiline("single line"));
        assert!(Report::is_highlighted(&Cell::Text("a\nb".into())));
        assert!(!Report::is_highlighted(&Cell::Number(1.0)));
        assert!(!Report::is_highlighted(&Cell::Empty));
    }

    #[test]
    fn test_summary_counts() {
        let ds = dataset();
        let mut report = Report::new(&ds);
        report.push(QueryResult {
            row_index: 0,
            returned_answer: Some("X".into()),
            confidence_score: Some(0.1),
            verdict: Verdict::Fail,
        });
        report.push(QueryResult::unanswered(1));
        let summary = report.summary();
        assert_eq!(
            summary,
            Summary {
                total: 2,
                passed: 0,
                failed: 1,
                unset: 1
            }
        );
        assert_eq!(summary.pass_rate(), Some(0.0));
    }

    #[test]
    fn test_pass_rate_without_graded_rows() {
        assert_eq!(Summary::default().pass_rate(), None);
    }
}
