//! Terminal rendering for the review loop and the status summary.

use sentrev_session::ReviewPrompt;
use sentrev_store::RecordTable;

/// Print the card for the current review step: position, case metadata,
/// the field under review, its raw text, and any existing judgment.
pub fn print_review_card(prompt: &ReviewPrompt) {
    println!();
    println!("=== Reviewing Row {} / {} ===", prompt.row + 1, prompt.total);
    println!("  {:<14} {}", "case number", prompt.case_number);
    println!("  {:<14} {}", "party", prompt.party);
    println!("  {:<14} {}", "reviewing", prompt.field);
    println!();
    println!("Raw text:");
    match &prompt.raw_text {
        Some(text) => println!("  {text}"),
        None => println!("  (empty)"),
    }
    if let Some(existing) = &prompt.existing {
        let details = existing.details();
        if details.is_empty() {
            println!("Current judgment: {}", existing.label());
        } else {
            println!("Current judgment: {} ({})", existing.label(), details);
        }
    }
    println!();
}

/// Print the table summary for `sentrev status`.
pub fn print_status(table: &RecordTable) {
    let eligible = table.eligible_count();
    let reviewed = table.reviewed_count();
    println!("  {:<16} {}", "rows", table.row_count());
    println!("  {:<16} {}", "eligible", eligible);
    println!("  {:<16} {}", "fully reviewed", reviewed);
    println!("  {:<16} {}", "remaining", eligible.saturating_sub(reviewed));
}
