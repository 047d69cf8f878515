//! Pre-existing report detection

use std::path::Path;

use crate::common::{Error, Result};
use crate::console::Console;

/// Whether a run may write its report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStatus {
    /// No report at the output path (or it was removed)
    Ready,
    /// A report exists and the user chose to keep it
    Declined,
}

/// Make sure the report will not overwrite an earlier one
///
/// An existing file is only removed after the console confirms it. Must be
/// called before any row is processed.
pub fn ensure_output_available(path: &Path, console: &mut dyn Console) -> Result<OutputStatus> {
    if !path.exists() {
        return Ok(OutputStatus::Ready);
    }

    let shown = path.display().to_string();
    if !console.confirm(&format!("Would you like to delete {}", shown))? {
        return Ok(OutputStatus::Declined);
    }

    std::fs::remove_file(path).map_err(|e| Error::OutputRemoval {
        path: shown.clone(),
        error: e.to_string(),
    })?;
    tracing::info!("Removed previous report {}", shown);

    Ok(OutputStatus::Ready)
}
