//! Interactive terminal access
//!
//! Prompts, confirmations and screen clearing go through [`Console`] so the
//! pipeline and the output-conflict check can run against a scripted
//! console in tests.

use std::io::{self, BufRead, IsTerminal, Write};

use crate::common::{Error, Result};

/// Answers accepted as "yes" by [`TerminalConsole::confirm`]
const YES_ANSWERS: &[&str] = &["y", "yes", "yeah", "yup"];

/// User interaction needed by a validation run
pub trait Console {
    /// Ask for a value; an empty answer selects `default` when given
    fn prompt(&mut self, message: &str, default: Option<&str>) -> Result<String>;

    /// Ask a yes/no question
    fn confirm(&mut self, message: &str) -> Result<bool>;

    /// Clear the screen before progress output starts
    fn clear(&mut self);
}

/// Whether `answer` counts as a yes
pub fn is_yes(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    YES_ANSWERS.contains(&answer.as_str())
}

/// Console backed by stdin/stdout
#[derive(Debug, Default)]
pub struct TerminalConsole;

impl TerminalConsole {
    fn read_line(&self, what: &str) -> Result<String> {
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(Error::PromptClosed(what.to_string()));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl Console for TerminalConsole {
    fn prompt(&mut self, message: &str, default: Option<&str>) -> Result<String> {
        let mut stdout = io::stdout();
        match default {
            Some(default) => write!(stdout, "{} [{}]: ", message, default)?,
            None => write!(stdout, "{}: ", message)?,
        }
        stdout.flush()?;

        let answer = self.read_line(message)?;
        match default {
            Some(default) if answer.trim().is_empty() => Ok(default.to_string()),
            _ => Ok(answer.trim().to_string()),
        }
    }

    fn confirm(&mut self, message: &str) -> Result<bool> {
        let mut stdout = io::stdout();
        write!(stdout, "{} (y/n): ", message)?;
        stdout.flush()?;

        Ok(is_yes(&self.read_line(message)?))
    }

    fn clear(&mut self) {
        let mut stdout = io::stdout();
        if stdout.is_terminal() {
            let _ = write!(stdout, "\x1B[2J\x1B[1;1H");
            let _ = stdout.flush();
        }
    }
}
