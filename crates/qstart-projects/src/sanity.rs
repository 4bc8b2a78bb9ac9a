//! Environment sanity check
//!
//! The Sming toolchain is located through environment variables. When any of them
//! is missing the user decides whether to continue anyway.

use console::Term;
use dialoguer::Input;
use std::env;
use std::io::{self, BufRead, IsTerminal, Write};

/// Question asked when a required variable is missing
pub const CONTINUE_PROMPT: &str =
    "One or more required variables not found in environment, continue anyway? [yY/nN]";

/// Source of a single line of user input
pub trait Prompt {
    /// Show `message` and read one line of input
    fn read_line(&mut self, message: &str) -> io::Result<String>;
}

/// How [`ConsolePrompt`] reads its answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMode {
    /// Line editor drawn on the terminal
    Interactive,
    /// Plain line read from stdin
    Line,
}

impl PromptMode {
    /// The line editor needs both a keyboard on stdin and a terminal on stderr to draw on
    pub fn select(stdin_is_term: bool, stderr_is_term: bool) -> Self {
        if stdin_is_term && stderr_is_term {
            Self::Interactive
        } else {
            Self::Line
        }
    }

    /// Mode for the current process streams
    pub fn detect() -> Self {
        Self::select(io::stdin().is_terminal(), Term::stderr().is_term())
    }
}

/// Prompt backed by the controlling terminal, or stdin when not attached to one
#[derive(Debug, Default)]
pub struct ConsolePrompt;

impl Prompt for ConsolePrompt {
    fn read_line(&mut self, message: &str) -> io::Result<String> {
        match PromptMode::detect() {
            PromptMode::Interactive => Input::<String>::new()
                .with_prompt(message)
                .allow_empty(true)
                .interact_text()
                .map_err(|e| io::Error::other(e.to_string())),
            PromptMode::Line => read_answer(&mut io::stdin().lock(), &mut io::stderr(), message),
        }
    }
}

/// Write `message` to `out` and read one line from `input`
///
/// End of input yields an empty answer.
pub fn read_answer<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    message: &str,
) -> io::Result<String> {
    write!(out, "{} ", message)?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line)
}

/// Names from `required` that are unset or empty in the process environment
pub fn missing_env_vars<S: AsRef<str>>(required: &[S]) -> Vec<String> {
    required
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| env::var_os(name).map_or(true, |val| val.is_empty()))
        .map(str::to_string)
        .collect()
}

/// Whether an answer to [`CONTINUE_PROMPT`] means "continue"
pub fn confirm_continue(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}
