//! QnA Validator - check a question-answering knowledge base against a
//! labeled dataset
//!
//! Sends every question in a spreadsheet or CSV file to the service, grades
//! the returned answers by text similarity and writes a PASS/FAIL report.

use clap::Parser;
use qna_validator::commands::RunArgs;
use qna_validator::common::logging;
use qna_validator::{cli, console::TerminalConsole};

#[derive(Parser)]
#[command(name = "qna-validator", about = "Validate a QnA knowledge base against expected answers")]
#[command(version, long_about = None)]
struct Cli {
    #[command(flatten)]
    run: RunArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    logging::init_cli(cli.run.verbose);

    let mut console = TerminalConsole;
    match cli::dispatch(cli.run, &mut console).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}", e.render_chain());
            std::process::exit(e.exit_code());
        }
    }
}
