//! Amount resolution: token(s) -> numeric quantity with abbreviation expansion

use rust_decimal::Decimal;
use std::collections::HashMap;

/// Word -> multiplier table used by the amount resolver.
///
/// A caller-supplied table fully replaces the defaults rather than merging
/// with them. Keys are stored lower-cased.
#[derive(Debug, Clone)]
pub struct AbbreviationTable {
    entries: HashMap<String, Decimal>,
}

impl Default for AbbreviationTable {
    fn default() -> Self {
        let entries = [
            ("note", 100),
            ("k", 1000),
            ("point", 1),
            ("half", 50),
            ("quarter", 25),
            ("dime", 10),
            ("nickel", 5),
            ("buck", 1),
        ]
        .iter()
        .map(|(word, value)| (word.to_string(), Decimal::from(*value)))
        .collect();
        Self { entries }
    }
}

impl AbbreviationTable {
    /// Build a table from caller-supplied entries
    pub fn new(entries: HashMap<String, Decimal>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(word, value)| (word.to_lowercase(), value))
                .collect(),
        }
    }

    /// Iterate the configured (word, multiplier) pairs
    pub fn entries(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.entries.iter().map(|(word, value)| (word.as_str(), *value))
    }

    fn get(&self, word: &str) -> Option<Decimal> {
        self.entries.get(word).copied()
    }

    /// Look up a unit word, accepting a trailing plural "s"
    fn get_unit(&self, word: &str) -> Option<Decimal> {
        self.get(word)
            .or_else(|| word.strip_suffix('s').and_then(|singular| self.get(singular)))
    }
}

/// Resolve a monetary amount from the leading tokens of a template remainder.
///
/// Tried in order: numeric token + unit token ("2 notes"), bare numeric
/// token ("$25", "30.50"), unit with an embedded multiplier prefix
/// ("2notes"), exact abbreviation word ("note"). Returns None so the
/// current template can fall through; never a hard failure.
pub(crate) fn resolve_amount(tokens: &[&str], table: &AbbreviationTable) -> Option<Decimal> {
    let first = *tokens.first()?;

    // numeric token followed by a unit word
    if tokens.len() >= 2 {
        if let (Some(n), Some(unit)) = (parse_numeric(first), table.get_unit(tokens[1])) {
            return Some(n * unit);
        }
    }

    // bare numeric token, tolerating currency symbols and commas
    if let Some(n) = parse_numeric(first) {
        return Some(n);
    }

    // embedded multiplier prefix, e.g. "2notes"
    if let Some(n) = resolve_suffix(first, table) {
        return Some(n);
    }

    // exact abbreviation word (multiplier 1)
    table.get_unit(first)
}

/// Parse a token as a decimal number after stripping non-digit punctuation.
/// Tokens containing letters never parse here; those belong to the
/// abbreviation paths.
fn parse_numeric(token: &str) -> Option<Decimal> {
    if token.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let cleaned: String = token
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    cleaned.parse().ok()
}

/// Match a token of the form "<number><unit>" against the abbreviation keys
fn resolve_suffix(token: &str, table: &AbbreviationTable) -> Option<Decimal> {
    let singular = token.strip_suffix('s').unwrap_or(token);
    for (word, value) in &table.entries {
        for candidate in [token, singular] {
            if let Some(prefix) = candidate.strip_suffix(word.as_str()) {
                if prefix.is_empty() {
                    continue;
                }
                if let Some(n) = parse_numeric(prefix) {
                    return Some(n * *value);
                }
            }
        }
    }
    None
}

// ==================== Tests ====================
