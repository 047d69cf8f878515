//! CLI command handling
//!
//! Resolves run parameters, runs the validation pipeline and prints the
//! summary.

use std::path::PathBuf;
use std::time::Duration;

use colored::Colorize;

use crate::commands::RunArgs;
use crate::common::config::{Config, DEFAULT_THRESHOLD};
use crate::common::{Error, Result};
use crate::console::Console;
use crate::grading::Grader;
use crate::pipeline::{self, Outcome, RunOptions};
use crate::report::Summary;
use crate::service::{Endpoint, QnaClient};

/// Fully resolved parameters for one run
#[derive(Debug, Clone)]
pub struct Settings {
    pub endpoint: Endpoint,
    pub threshold: u8,
    pub output: PathBuf,
    pub delay: Duration,
    pub timeout: Duration,
}

/// Run a validation from command-line arguments
///
/// Returns the process exit code: 0 for a finished run or a declined
/// overwrite.
pub async fn dispatch(args: RunArgs, console: &mut dyn Console) -> Result<i32> {
    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let settings = resolve_settings(&args, &config, console)?;
    let grader = Grader::new(settings.threshold)?;
    let client = QnaClient::new(settings.endpoint.clone(), settings.timeout, settings.delay)?;

    let options = RunOptions {
        dataset: args.filepath.clone(),
        output: settings.output.clone(),
        progress: !args.no_progress && !args.json,
    };

    match pipeline::run(&options, &client, grader, console).await? {
        Outcome::Declined => {
            println!("Delete this file manually and run again");
            Ok(0)
        }
        Outcome::Completed(summary) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&summary, &settings);
            }
            Ok(0)
        }
    }
}

/// Merge flags, config file and prompts into run settings
///
/// Precedence is flag, then config file, then an interactive prompt.
pub fn resolve_settings(
    args: &RunArgs,
    config: &Config,
    console: &mut dyn Console,
) -> Result<Settings> {
    let hostname = required(
        console,
        args.hostname.as_ref().or(config.service.hostname.as_ref()),
        "Hostname",
    )?;
    let auth_key = required(
        console,
        args.auth_key.as_ref().or(config.service.auth_key.as_ref()),
        "Authorization Key",
    )?;
    let knowledge_base = required(
        console,
        args.knowledge_base.as_ref().or(config.service.knowledge_base.as_ref()),
        "Knowledge Base",
    )?;

    let threshold = match args.threshold.or(config.grading.threshold) {
        Some(threshold) => threshold,
        None => {
            let answer = console.prompt("Confidence Score", Some(&DEFAULT_THRESHOLD.to_string()))?;
            parse_threshold(&answer)?
        }
    };

    Ok(Settings {
        endpoint: Endpoint {
            hostname,
            auth_key,
            knowledge_base,
        },
        threshold,
        output: args
            .output
            .clone()
            .unwrap_or_else(|| config.report.output.clone()),
        delay: Duration::from_millis(args.delay_ms.unwrap_or(config.throttle.delay_ms)),
        timeout: Duration::from_secs(config.timeouts.request_secs),
    })
}

fn required(console: &mut dyn Console, given: Option<&String>, label: &str) -> Result<String> {
    let value = match given {
        Some(value) => value.trim().to_string(),
        None => console.prompt(label, None)?.trim().to_string(),
    };
    if value.is_empty() {
        return Err(Error::Config(format!("{} is required", label)));
    }
    Ok(value)
}

fn parse_threshold(text: &str) -> Result<u8> {
    let threshold: u8 = text.trim().parse().map_err(|_| {
        Error::Config(format!(
            "Confidence score must be a whole number between 0 and 100, got '{}'",
            text.trim()
        ))
    })?;
    if threshold > 100 {
        return Err(Error::Config(format!(
            "Confidence score must be between 0 and 100, got {}",
            threshold
        )));
    }
    Ok(threshold)
}

fn print_summary(summary: &Summary, settings: &Settings) {
    println!("\n{}", "Validation complete".green().bold());
    println!("  Rows:     {}", summary.total);
    println!("  Passed:   {}", summary.passed.to_string().green());
    println!("  Failed:   {}", summary.failed.to_string().red());
    println!("  No reply: {}", summary.unset.to_string().yellow());
    if let Some(rate) = summary.pass_rate() {
        println!(
            "  Pass rate: {:.1}% (threshold {})",
            rate, settings.threshold
        );
    }
    println!(
        "\nResults written to {}",
        settings.output.display().to_string().bold()
    );
}
