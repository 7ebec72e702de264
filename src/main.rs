//! debttally command-line driver
//!
//! Reads one sentence per line from stdin, applies it to an in-memory
//! ledger, and prints per-counterparty summaries on demand.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use log::{info, warn};

use debttally_config::Config;
use debttally_core::{summarize, DebtStore, DebtorSummary, MemoryDebtStore};
use debttally_interpreter::{AbbreviationTable, ParsedAction, SentenceInterpreter};
use debttally_utils::format_amount;

#[derive(Parser, Debug)]
#[command(name = "debttally", about = "Track peer-to-peer debts in plain sentences")]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Emit summaries as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            // logging is not up yet, so the fallback notice goes to stderr
            eprintln!("config: {} (using defaults)", e);
            Config::default()
        }
    };
    init_logging(&config.logging.level);
    info!(
        "starting with grace period of {} days",
        config.ledger.grace_period_days
    );

    let table = match &config.abbreviations {
        Some(entries) => AbbreviationTable::new(entries.clone()),
        None => AbbreviationTable::default(),
    };
    let store = MemoryDebtStore::new();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    print!("> ");
    stdout.flush()?;
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        let trimmed = line.trim();
        match trimmed {
            "quit" | "exit" => break,
            "show" | "summary" => {
                print_summaries(&store, config.ledger.grace_period_days, args.json)?
            }
            _ => apply_line(&store, &table, trimmed),
        }
        print!("> ");
        stdout.flush()?;
    }
    println!();
    print_summaries(&store, config.ledger.grace_period_days, args.json)?;
    Ok(())
}

fn init_logging(level: &str) {
    let filter = log::LevelFilter::from_str(level).unwrap_or(log::LevelFilter::Info);
    env_logger::Builder::from_default_env()
        .filter_level(filter)
        .init();
}

/// Interpret one sentence and apply the resulting action to the store.
/// Interpreter and store errors are reported to the user, never fatal.
fn apply_line(store: &MemoryDebtStore, table: &AbbreviationTable, line: &str) {
    match SentenceInterpreter::interpret_with(line, table) {
        Ok(ParsedAction::Add(draft)) => match store.add_draft(draft, Utc::now()) {
            Ok(record) => {
                let what = match (&record.amount, &record.item) {
                    (Some(amount), _) => format_amount(amount),
                    (None, Some(item)) => item.clone(),
                    (None, None) => "nothing".to_string(),
                };
                println!(
                    "logged: {} {} ({})",
                    record.direction, what, record.counterparty
                );
            }
            Err(e) => eprintln!("error: {}", e),
        },
        Ok(ParsedAction::Settle { counterparty }) => match store.settle_all(&counterparty) {
            Ok(0) => println!("nothing open with {}", counterparty),
            Ok(n) => println!("settled {} record(s) with {}", n, counterparty),
            Err(e) => eprintln!("error: {}", e),
        },
        Err(e) => {
            warn!("unrecognized input: {:?}", line);
            eprintln!("{}", e);
        }
    }
}

fn print_summaries(store: &MemoryDebtStore, grace_period_days: i64, json: bool) -> Result<()> {
    let records = store.fetch_all()?;
    let mut summaries = summarize(&records, Utc::now(), grace_period_days);
    // largest balances first
    summaries.sort_by(|a, b| b.total.cmp(&a.total));

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }
    if summaries.is_empty() {
        println!("no open debts");
        return Ok(());
    }
    for summary in &summaries {
        print_summary(summary);
    }
    Ok(())
}

fn print_summary(summary: &DebtorSummary) {
    let direction = if summary.owes_me {
        "owes you"
    } else {
        "you owe"
    };
    let mut line = format!(
        "{}: {} {}",
        summary.name,
        direction,
        format_amount(&summary.total.abs())
    );
    if !summary.accrued_interest.is_zero() {
        line.push_str(&format!(
            " (incl. {} interest)",
            format_amount(&summary.accrued_interest)
        ));
    }
    if summary.overdue {
        line.push_str(&format!(" OVERDUE {} days", summary.days_overdue));
    }
    println!("{}", line);
    for item in &summary.items {
        let mut item_line = format!("  {} {}", item.direction, item.name);
        if item.overdue {
            item_line.push_str(&format!(" OVERDUE {} days", item.days_overdue));
        } else if let Some(due) = item.due_date {
            item_line.push_str(&format!(" due {}", due.format("%Y-%m-%d")));
        }
        println!("{}", item_line);
    }
    if let Some(note) = &summary.note {
        println!("  note: {}", note);
    }
}
