//! CLI argument definitions
//!
//! Service parameters left out here are read from the config file, then
//! prompted for.

use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Spreadsheet or CSV file with questions and expected answers
    pub filepath: PathBuf,

    /// Base URL of the answer service (a trailing slash is ignored)
    #[arg(long)]
    pub hostname: Option<String>,

    /// Endpoint key for the knowledge base
    #[arg(long = "authkey")]
    pub auth_key: Option<String>,

    /// Knowledge base identifier
    #[arg(long = "knowledgebase")]
    pub knowledge_base: Option<String>,

    /// Minimum similarity (0-100) for an answer to pass
    #[arg(long = "confidencescore", alias = "threshold")]
    pub threshold: Option<u8>,

    /// Report file to write (default: result.xlsx in the working directory)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Delay after each request, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Configuration file to use instead of the default location
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Enable debug logging
    #[arg(long, short)]
    pub verbose: bool,
}
