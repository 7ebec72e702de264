//! Utility functions shared across the debttally crates

use rust_decimal::Decimal;

/// Normalized grouping key for a counterparty name.
///
/// Every comparison site (interpreter output, store lookups, aggregator
/// grouping) must use this same form or the ledger silently fragments
/// into per-spelling balances.
pub fn normalize_party(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Title-case a counterparty name for display ("bob smith" -> "Bob Smith")
pub fn display_name(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format an amount with thousands separators for terminal display
pub fn format_amount(amount: &Decimal) -> String {
    let rendered = amount.round_dp(2).to_string();
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (rendered, None),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest.to_string()),
        None => ("", int_part),
    };

    let mut grouped = String::new();
    let mut count = 0;
    for c in digits.chars().rev() {
        if count == 3 {
            grouped.push(',');
            count = 0;
        }
        grouped.push(c);
        count += 1;
    }
    let grouped: String = grouped.chars().rev().collect();

    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

// ==================== Tests ====================
