//! Error types for the validator
//!
//! Error messages are meant to be read by the person running a validation
//! batch, with hints on how to resolve common issues.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the validator
#[derive(Error, Debug)]
pub enum Error {
    // === Input Errors ===
    #[error("Dataset '{0}' not found")]
    FileNotFound(String),

    #[error("Permission denied reading '{0}'. Close the file in any other program and run again")]
    PermissionDenied(String),

    #[error("Could not parse '{path}' as a spreadsheet or comma-delimited text: {reason}")]
    UnsupportedFormat { path: String, reason: String },

    #[error("Dataset '{0}' has no header row")]
    MissingHeader(String),

    // === Structural Errors ===
    #[error("Dataset has {found} column(s) but the inferred layout needs {required}")]
    InsufficientColumns { required: usize, found: usize },

    // === Output Errors ===
    #[error("Couldn't delete '{path}': {error}. Delete it manually and run again")]
    OutputRemoval { path: String, error: String },

    #[error("Failed to write report '{path}': {reason}")]
    ReportWrite { path: String, reason: String },

    // === Answer Service Errors ===
    #[error("Request to answer service failed")]
    ServiceRequest(#[from] reqwest::Error),

    #[error("Answer service returned status {status}: {body}")]
    ServiceStatus { status: u16, body: String },

    #[error("Invalid answer service response: {0}")]
    ServiceResponse(String),

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Prompt Errors ===
    #[error("No input available for '{0}'. Pass it as a flag or set it in the config file")]
    PromptClosed(String),

    // === IO Errors ===
    #[error(transparent)]
    Io(#[from] io::Error),

    // === Serialization Errors ===
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an unsupported format error
    pub fn unsupported_format(path: &str, reason: impl ToString) -> Self {
        Self::UnsupportedFormat {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a report write error
    pub fn report_write(path: &str, reason: impl ToString) -> Self {
        Self::ReportWrite {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    /// The message followed by one `caused by:` line per source
    pub fn render_chain(&self) -> String {
        let mut out = format!("Error: {}", self);
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            out.push_str(&format!("\n  caused by: {}", cause));
            source = cause.source();
        }
        out
    }

    /// Process exit code for this error
    ///
    /// Every error is fatal for the batch, so they all map to 1.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
