//! Modifier extraction: due dates, interest rates, parenthesized notes,
//! and phone numbers.
//!
//! Extraction scans the whole lower-cased line and is independent of which
//! sentence template matched.

use chrono::{DateTime, Duration, Utc};
use std::ops::Range;

/// Modifiers shared by every sentence template
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Modifiers {
    pub due_date: Option<DateTime<Utc>>,
    /// Weekly rate as a fraction (2% -> 0.02)
    pub interest_rate: Option<rust_decimal::Decimal>,
    pub note: Option<String>,
    pub phone: Option<String>,
}

/// Scan a line for every modifier pattern
pub(crate) fn extract(text: &str, now: DateTime<Utc>) -> Modifiers {
    let phone = extract_phone(text);
    let note = extract_note(text, phone.as_ref().map(|(span, _)| span));
    Modifiers {
        due_date: extract_due_date(text, now),
        interest_rate: extract_interest_rate(text),
        note,
        phone: phone.map(|(_, formatted)| formatted),
    }
}

/// Resolve "due (in )?N (hour|day|week|month)s?", "due tomorrow", and
/// "due next week" to an absolute instant
fn extract_due_date(text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    static DUE_PATTERN: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let due_regex = DUE_PATTERN
        .get_or_init(|| regex::Regex::new(r"due\s+(?:in\s+)?(\d+)\s+(hour|day|week|month)s?").unwrap());

    if let Some(caps) = due_regex.captures(text) {
        let n: i64 = caps[1].parse().ok()?;
        let due = match &caps[2] {
            "hour" => now + Duration::hours(n),
            "day" => now + Duration::days(n),
            "week" => now + Duration::days(7 * n),
            "month" => now + Duration::days(30 * n),
            _ => return None,
        };
        return Some(due);
    }
    if text.contains("due tomorrow") {
        return Some(now + Duration::days(1));
    }
    if text.contains("due next week") {
        return Some(now + Duration::days(7));
    }
    None
}

/// Resolve "N%" or "N.N%" to a weekly rate fraction
fn extract_interest_rate(text: &str) -> Option<rust_decimal::Decimal> {
    static RATE_PATTERN: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let rate_regex =
        RATE_PATTERN.get_or_init(|| regex::Regex::new(r"(\d+(?:\.\d+)?)\s*%").unwrap());

    let caps = rate_regex.captures(text)?;
    let percent: rust_decimal::Decimal = caps[1].parse().ok()?;
    Some(percent / rust_decimal::Decimal::from(100))
}

/// First parenthesized substring, verbatim, skipping the area-code
/// parentheses of a recognized phone number
fn extract_note(text: &str, phone_span: Option<&Range<usize>>) -> Option<String> {
    static NOTE_PATTERN: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let note_regex = NOTE_PATTERN.get_or_init(|| regex::Regex::new(r"\(([^)]*)\)").unwrap());

    for caps in note_regex.captures_iter(text) {
        let whole = caps.get(0)?;
        if let Some(span) = phone_span {
            if whole.start() >= span.start && whole.end() <= span.end {
                continue;
            }
        }
        return Some(caps.get(1)?.as_str().to_string());
    }
    None
}

/// First phone-shaped substring, canonicalized
/// (10 digits -> "(AAA) EEE-SSSS", 7 digits -> "EEE-SSSS")
fn extract_phone(text: &str) -> Option<(Range<usize>, String)> {
    static PHONE_PATTERN: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let phone_regex = PHONE_PATTERN.get_or_init(|| {
        regex::Regex::new(r"\(\d{3}\)\s*\d{3}-\d{4}|\d{3}-\d{3}-\d{4}|\b\d{10}\b|\b\d{3}-\d{4}\b")
            .unwrap()
    });

    let m = phone_regex.find(text)?;
    let digits: String = m.as_str().chars().filter(|c| c.is_ascii_digit()).collect();
    let formatted = match digits.len() {
        10 => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
        7 => format!("{}-{}", &digits[..3], &digits[3..]),
        _ => return None,
    };
    Some((m.range(), formatted))
}

// ==================== Tests ====================
