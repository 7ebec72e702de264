//! Ordered sentence templates
//!
//! Template matching is a list of independent "try, else fall through"
//! functions, not a grammar. The order is part of the contract: the settle
//! rule runs first so "settle" is never read as a counterparty name, and
//! the paid rule runs last as the catch-all for payment sentences. An
//! amount that fails to resolve makes the current template fall through
//! rather than failing the whole parse.

use crate::amounts::{resolve_amount, AbbreviationTable};
use crate::types::{Direction, DraftRecord, ParsedAction};
use debttally_utils::display_name;

/// Try every template in order; first match wins
pub(crate) fn dispatch(tokens: &[&str], table: &AbbreviationTable) -> Option<ParsedAction> {
    try_settle(tokens)
        .or_else(|| try_owes(tokens, table))
        .or_else(|| try_i_owe(tokens, table))
        .or_else(|| try_transfer(tokens, table, "lent", "to", Direction::Lent))
        .or_else(|| try_transfer(tokens, table, "borrowed", "from", Direction::Borrowed))
        .or_else(|| try_paid(tokens, table))
}

/// "settle(d) ... with <name>"
fn try_settle(tokens: &[&str]) -> Option<ParsedAction> {
    if !tokens.iter().any(|t| *t == "settle" || *t == "settled") {
        return None;
    }
    let with_idx = tokens.iter().position(|t| *t == "with")?;
    let name = tokens.get(with_idx + 1)?;
    Some(ParsedAction::Settle {
        counterparty: display_name(name),
    })
}

/// "<name> owes (me) <amount>"
fn try_owes(tokens: &[&str], table: &AbbreviationTable) -> Option<ParsedAction> {
    let idx = tokens.iter().position(|t| *t == "owes" || *t == "owe")?;
    if idx == 0 {
        return None;
    }
    let name = tokens[idx - 1];
    // "i owe ..." belongs to the next template
    if name == "i" {
        return None;
    }
    let mut rest = &tokens[idx + 1..];
    if rest.first() == Some(&"me") {
        rest = &rest[1..];
    }
    let amount = resolve_amount(rest, table)?;
    Some(ParsedAction::Add(DraftRecord::money(
        display_name(name),
        amount,
        Direction::Lent,
    )))
}

/// "i owe <name> <amount>"
fn try_i_owe(tokens: &[&str], table: &AbbreviationTable) -> Option<ParsedAction> {
    if tokens.len() < 4 || tokens[0] != "i" || tokens[1] != "owe" {
        return None;
    }
    let amount = resolve_amount(&tokens[3..], table)?;
    Some(ParsedAction::Add(DraftRecord::money(
        display_name(tokens[2]),
        amount,
        Direction::Borrowed,
    )))
}

/// "lent <amount|item> ... to <name>" and the borrowed/from mirror.
/// Middle tokens that do not resolve as an amount name the item itself.
fn try_transfer(
    tokens: &[&str],
    table: &AbbreviationTable,
    verb: &str,
    preposition: &str,
    direction: Direction,
) -> Option<ParsedAction> {
    let verb_idx = tokens.iter().position(|t| *t == verb)?;
    let prep_idx = tokens
        .iter()
        .skip(verb_idx + 1)
        .position(|t| *t == preposition)
        .map(|offset| offset + verb_idx + 1)?;
    let middle = &tokens[verb_idx + 1..prep_idx];
    let name = display_name(tokens.get(prep_idx + 1)?);

    if let Some(amount) = resolve_amount(middle, table) {
        return Some(ParsedAction::Add(DraftRecord::money(name, amount, direction)));
    }
    if middle.is_empty() {
        return None;
    }
    Some(ParsedAction::Add(DraftRecord::item(
        name,
        middle.join(" "),
        direction,
    )))
}

/// "<name> paid (<amount>)" or "paid <name> (<amount>)".
/// With an amount this is a counter-transaction: a borrowed-direction
/// record that nets against the debt in the next aggregation, leaving the
/// original record untouched. Without one it settles the counterparty.
fn try_paid(tokens: &[&str], table: &AbbreviationTable) -> Option<ParsedAction> {
    let idx = tokens.iter().position(|t| *t == "paid")?;
    let (name_token, rest): (&str, &[&str]) = if idx > 0 {
        (tokens[idx - 1], &tokens[idx + 1..])
    } else {
        (tokens.get(1)?, tokens.get(2..).unwrap_or(&[]))
    };
    let name = display_name(name_token);

    match resolve_amount(rest, table) {
        Some(amount) => {
            let mut draft = DraftRecord::money(name, amount, Direction::Borrowed);
            draft.note = Some("Partial payment".to_string());
            Some(ParsedAction::Add(draft))
        }
        None => Some(ParsedAction::Settle { counterparty: name }),
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn dispatch_line(line: &str) -> Option<ParsedAction> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        dispatch(&tokens, &AbbreviationTable::default())
    }

    fn expect_add(line: &str) -> DraftRecord {
        match dispatch_line(line) {
            Some(ParsedAction::Add(draft)) => draft,
            other => panic!("expected add for {:?}, got {:?}", line, other),
        }
    }

    #[test]
    fn test_settle_template() {
        assert_eq!(
            dispatch_line("settle with bob"),
            Some(ParsedAction::Settle {
                counterparty: "Bob".to_string()
            })
        );
        assert_eq!(
            dispatch_line("settled up with sarah"),
            Some(ParsedAction::Settle {
                counterparty: "Sarah".to_string()
            })
        );
    }

    #[test]
    fn test_owes_template() {
        let draft = expect_add("john owes me 2 notes");
        assert_eq!(draft.counterparty, "John");
        assert_eq!(draft.amount, Some(Decimal::from(200)));
        assert_eq!(draft.direction, Direction::Lent);

        // "me" is optional
        let draft = expect_add("john owes 25");
        assert_eq!(draft.amount, Some(Decimal::from(25)));
    }

    #[test]
    fn test_i_owe_template() {
        let draft = expect_add("i owe sarah 30.50");
        assert_eq!(draft.counterparty, "Sarah");
        assert_eq!(draft.amount, Some("30.50".parse().unwrap()));
        assert_eq!(draft.direction, Direction::Borrowed);
    }

    #[test]
    fn test_lent_to_template() {
        let draft = expect_add("lent 50 to john");
        assert_eq!(draft.counterparty, "John");
        assert_eq!(draft.amount, Some(Decimal::from(50)));
        assert_eq!(draft.direction, Direction::Lent);
    }

    #[test]
    fn test_borrowed_from_template() {
        let draft = expect_add("borrowed 2 notes from alice");
        assert_eq!(draft.counterparty, "Alice");
        assert_eq!(draft.amount, Some(Decimal::from(200)));
        assert_eq!(draft.direction, Direction::Borrowed);
    }

    #[test]
    fn test_item_loans() {
        let draft = expect_add("lent my ladder to john");
        assert_eq!(draft.counterparty, "John");
        assert_eq!(draft.amount, None);
        assert_eq!(draft.item, Some("my ladder".to_string()));
        assert_eq!(draft.direction, Direction::Lent);

        let draft = expect_add("borrowed drill from bob");
        assert_eq!(draft.item, Some("drill".to_string()));
        assert_eq!(draft.direction, Direction::Borrowed);
    }

    #[test]
    fn test_paid_with_amount_is_counter_transaction() {
        // ordering: must never be absorbed by the owes rule
        let draft = expect_add("john paid 25");
        assert_eq!(draft.counterparty, "John");
        assert_eq!(draft.amount, Some(Decimal::from(25)));
        assert_eq!(draft.direction, Direction::Borrowed);
        assert_eq!(draft.note, Some("Partial payment".to_string()));
    }

    #[test]
    fn test_paid_without_amount_settles() {
        assert_eq!(
            dispatch_line("john paid"),
            Some(ParsedAction::Settle {
                counterparty: "John".to_string()
            })
        );
    }

    #[test]
    fn test_leading_paid_takes_next_token_as_name() {
        let draft = expect_add("paid sarah 40");
        assert_eq!(draft.counterparty, "Sarah");
        assert_eq!(draft.amount, Some(Decimal::from(40)));

        assert_eq!(
            dispatch_line("paid sarah"),
            Some(ParsedAction::Settle {
                counterparty: "Sarah".to_string()
            })
        );
    }

    #[test]
    fn test_no_template_matches_gibberish() {
        assert_eq!(dispatch_line("what is the weather"), None);
        assert_eq!(dispatch_line("paid"), None);
        // owes with an unresolvable amount falls through to nothing
        assert_eq!(dispatch_line("john owes me lunch"), None);
    }
}
