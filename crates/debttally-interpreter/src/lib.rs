//! Natural-language loan sentence interpreter
//!
//! Turns one line of free text into a tagged [`ParsedAction`]: either a
//! draft transaction to append or a settle command for a counterparty.
//! Recognition is a fixed, ordered list of sentence templates plus a
//! template-independent modifier scan (due dates, interest rates, notes,
//! phone numbers); anything outside the templates fails with an explicit
//! error value. The interpreter is a pure function of the input text, the
//! abbreviation table, and the clock.

pub mod amounts;
pub mod error;
pub mod modifiers;
pub mod templates;
pub mod types;

pub use amounts::AbbreviationTable;
pub use error::ParseError;
pub use modifiers::Modifiers;
pub use types::{Direction, DraftRecord, ParsedAction};

use chrono::{DateTime, Utc};

/// Sentence interpreter over the fixed template list
pub struct SentenceInterpreter;

impl SentenceInterpreter {
    /// Interpret one line with the default abbreviation table
    pub fn interpret(text: &str) -> Result<ParsedAction, ParseError> {
        Self::interpret_at(text, &AbbreviationTable::default(), Utc::now())
    }

    /// Interpret one line with a caller-supplied abbreviation table
    pub fn interpret_with(
        text: &str,
        table: &AbbreviationTable,
    ) -> Result<ParsedAction, ParseError> {
        Self::interpret_at(text, table, Utc::now())
    }

    /// Interpret with an explicit clock, keeping the function pure.
    /// Relative due dates ("due in 3 days") are resolved against `now`.
    pub fn interpret_at(
        text: &str,
        table: &AbbreviationTable,
        now: DateTime<Utc>,
    ) -> Result<ParsedAction, ParseError> {
        let lowered = text.trim().to_lowercase();
        if lowered.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        let tokens: Vec<&str> = lowered.split_whitespace().collect();
        let action = templates::dispatch(&tokens, table).ok_or_else(|| {
            ParseError::NoTemplateMatched {
                input: text.trim().to_string(),
            }
        })?;
        Ok(apply_modifiers(action, &lowered, now))
    }
}

/// Overlay the line-wide modifiers onto the template match.
/// An explicit parenthesized note wins over the "Partial payment" default
/// the paid template installs.
fn apply_modifiers(action: ParsedAction, text: &str, now: DateTime<Utc>) -> ParsedAction {
    match action {
        ParsedAction::Add(mut draft) => {
            let mods = modifiers::extract(text, now);
            draft.due_date = mods.due_date;
            draft.interest_rate = mods.interest_rate;
            if mods.note.is_some() {
                draft.note = mods.note;
            }
            draft.phone = mods.phone;
            ParsedAction::Add(draft)
        }
        settle @ ParsedAction::Settle { .. } => settle,
    }
}

// ==================== Tests ====================
