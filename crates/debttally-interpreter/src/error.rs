//! Error types for debttally-interpreter

use thiserror::Error;

/// Hint surfaced alongside every interpreter failure
pub const FORMAT_HINT: &str =
    "didn't understand that, try 'john owes me 2 notes' or 'settle with john'";

/// Interpreter failures are values, never panics; callers may surface the
/// message verbatim and retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty input; {}", FORMAT_HINT)]
    EmptyInput,

    #[error("no template matched {input:?}; {}", FORMAT_HINT)]
    NoTemplateMatched { input: String },
}

impl ParseError {
    /// Display hint for retry prompts
    pub fn hint(&self) -> &'static str {
        FORMAT_HINT
    }
}
