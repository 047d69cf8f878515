//! Validation pipeline
//!
//! Load the dataset, pick the question/answer columns, query the service
//! one row at a time, grade every answer and write the report once at the
//! end. Any service error aborts the run before anything is written.

use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};

use crate::common::Result;
use crate::console::Console;
use crate::dataset::{self, Dataset};
use crate::grading::Grader;
use crate::report::{self, OutputStatus, QueryResult, Report, Summary};
use crate::service::{best_candidate, AnswerService};

/// Inputs of a validation run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Labeled dataset to validate against
    pub dataset: PathBuf,
    /// Where the report is written
    pub output: PathBuf,
    /// Show a progress bar while querying
    pub progress: bool,
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every row was processed and the report written
    Completed(Summary),
    /// A previous report exists and the user chose to keep it
    Declined,
}

/// Run a complete validation
pub async fn run(
    options: &RunOptions,
    service: &dyn AnswerService,
    grader: Grader,
    console: &mut dyn Console,
) -> Result<Outcome> {
    if report::ensure_output_available(&options.output, console)? == OutputStatus::Declined {
        return Ok(Outcome::Declined);
    }

    let dataset = dataset::load(&options.dataset)?;
    console.clear();

    let progress = if options.progress {
        progress_bar(dataset.len() as u64)
    } else {
        ProgressBar::hidden()
    };

    let report = validate(&dataset, service, grader, &progress).await?;
    progress.finish_and_clear();

    report::write_xlsx(&report, &options.output)?;

    Ok(Outcome::Completed(report.summary()))
}

/// Query and grade every record of `dataset`
///
/// Records with a blank question or expected answer are kept in the report
/// with an unset verdict and are not sent to the service.
pub async fn validate<'d>(
    dataset: &'d Dataset,
    service: &dyn AnswerService,
    grader: Grader,
    progress: &ProgressBar,
) -> Result<Report<'d>> {
    let layout = dataset::infer_layout(dataset.columns())?;
    let mut report = Report::new(dataset);

    tracing::info!(
        "Validating {} row(s) with pass threshold {}",
        dataset.len(),
        grader.threshold()
    );

    for index in 0..dataset.len() {
        let result = match dataset.row(index, layout) {
            Some(row) => {
                let candidates = service.ask(&row.question).await?;
                match best_candidate(&candidates) {
                    Some(best) => QueryResult {
                        row_index: index,
                        returned_answer: Some(best.answer.clone()),
                        confidence_score: Some(best.score),
                        verdict: grader.grade(
                            &row.expected_answer,
                            Some(best.answer.as_str()),
                            Some(best.score),
                        ),
                    },
                    None => {
                        tracing::debug!("Row {}: service returned no answers", index + 1);
                        QueryResult::unanswered(index)
                    }
                }
            }
            None => {
                tracing::warn!(
                    "Row {}: question or expected answer is empty, skipping",
                    index + 1
                );
                QueryResult::unanswered(index)
            }
        };

        tracing::debug!("Row {}: {}", index + 1, result.verdict);
        report.push(result);
        progress.inc(1);
    }

    Ok(report)
}

fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("Processing [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
    {
        pb.set_style(style.progress_chars("=> "));
    }
    pb
}
