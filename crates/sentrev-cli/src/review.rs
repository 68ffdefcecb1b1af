//! The interactive review loop: load, prompt, finalize, export.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;

use sentrev_core::AskUnit;
use sentrev_session::{AskInput, FinalizeOutcome, ReviewSession};
use sentrev_store::RecordTable;

use crate::display;

type Lines<'a> = io::Lines<io::StdinLock<'a>>;

/// Run `sentrev review`: walk the session to completion (or until the
/// reviewer quits) and export the annotated table.
pub fn run(input: &Path, output: Option<PathBuf>) -> anyhow::Result<()> {
    let mut table = RecordTable::from_csv_path(input)
        .with_context(|| format!("loading {}", input.display()))?;
    let mut session = ReviewSession::start(&table);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let Some(prompt) = session.prompt(&table) else {
            println!("All rows reviewed.");
            break;
        };
        display::print_review_card(&prompt);

        let Some(ask) = read_ask_input(&mut lines)? else {
            println!("Stopping early; exporting what was reviewed so far.");
            break;
        };
        match session.finalize(&mut table, ask)? {
            FinalizeOutcome::DefenseNext => {
                println!("Saved. Now reviewing the defense ask for this row.");
            }
            FinalizeOutcome::RowIncomplete => {
                println!("Saved. This row is not fully reviewed yet.");
            }
            FinalizeOutcome::AdvancedTo(next) => {
                println!("Row done. Moving to row {}.", next + 1);
            }
            FinalizeOutcome::Complete | FinalizeOutcome::AlreadyComplete => {}
        }
    }

    let out = output.unwrap_or_else(|| reviewed_path(input));
    table
        .write_csv(&out)
        .with_context(|| format!("writing {}", out.display()))?;
    println!("Wrote {}", out.display());
    Ok(())
}

/// Run `sentrev status`: counts only, no session.
pub fn status(input: &Path) -> anyhow::Result<()> {
    let table = RecordTable::from_csv_path(input)
        .with_context(|| format!("loading {}", input.display()))?;
    display::print_status(&table);
    Ok(())
}

const MENU: &str = "\
Ask type:
  0) leave unclassified
  1) No Ask
  2) Incarceration
  3) Probation
  4) Time Served
  5) Non-custodial
  6) Custom
  q) save and quit";

/// Read one ask judgment from the terminal. `None` means quit or EOF.
fn read_ask_input(lines: &mut Lines<'_>) -> anyhow::Result<Option<AskInput>> {
    loop {
        println!("{MENU}");
        let Some(choice) = prompt_line("Select:", lines)? else {
            return Ok(None);
        };
        match choice.as_str() {
            "q" | "Q" => return Ok(None),
            "0" => return Ok(Some(AskInput::Unclassified)),
            "1" => return Ok(Some(AskInput::NoAsk)),
            "2" => return read_incarceration(lines),
            "3" => return Ok(Some(AskInput::Probation)),
            "4" => return Ok(Some(AskInput::TimeServed)),
            "5" => {
                let Some(details) = prompt_line("Details:", lines)? else {
                    return Ok(None);
                };
                return Ok(Some(AskInput::NonCustodial { details }));
            }
            "6" => {
                let Some(details) = prompt_line("Custom ask text:", lines)? else {
                    return Ok(None);
                };
                return Ok(Some(AskInput::Custom { details }));
            }
            other => println!("Unrecognised choice {other:?}."),
        }
    }
}

fn read_incarceration(lines: &mut Lines<'_>) -> anyhow::Result<Option<AskInput>> {
    let unit = loop {
        let Some(text) = prompt_line("Unit (months/years) [months]:", lines)? else {
            return Ok(None);
        };
        match parse_unit(&text) {
            Some(unit) => break unit,
            None => println!("Enter months or years."),
        }
    };
    let Some(num_min) = read_count("Min:", lines)? else {
        return Ok(None);
    };
    let Some(num_max) = read_count("Max (blank for a single value):", lines)? else {
        return Ok(None);
    };
    Ok(Some(AskInput::Incarceration {
        unit,
        num_min,
        num_max,
    }))
}

fn read_count(question: &str, lines: &mut Lines<'_>) -> anyhow::Result<Option<u32>> {
    loop {
        let Some(text) = prompt_line(question, lines)? else {
            return Ok(None);
        };
        match parse_count(&text) {
            Some(n) => return Ok(Some(n)),
            None => println!("Enter a non-negative whole number."),
        }
    }
}

fn prompt_line(question: &str, lines: &mut Lines<'_>) -> anyhow::Result<Option<String>> {
    print!("{question} ");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?.trim().to_string())),
        None => Ok(None),
    }
}

/// Unit selection; blank defaults to months, matching the selector order
/// in the original review form.
fn parse_unit(text: &str) -> Option<AskUnit> {
    match text.trim().to_ascii_lowercase().as_str() {
        "" | "m" | "month" | "months" => Some(AskUnit::Months),
        "y" | "year" | "years" => Some(AskUnit::Years),
        _ => None,
    }
}

/// Non-negative count; blank means zero.
fn parse_count(text: &str) -> Option<u32> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0);
    }
    text.parse().ok()
}

/// Output naming convention: `cases.csv` becomes `cases_reviewed.csv`.
fn reviewed_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("annotated");
    let ext = input
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("csv");
    input.with_file_name(format!("{stem}_reviewed.{ext}"))
}
