//! The review-session controller.
//!
//! Holds the explicit cursor `(row, field)` and advances it on each
//! finalize: sentence first, then defense ask, then the next eligible row,
//! until the table is exhausted. The cursor never moves backwards and the
//! session never lands on an ineligible row.

use thiserror::Error;
use tracing::info;

use sentrev_core::{Annotation, ReviewField};
use sentrev_store::{RecordTable, StoreError};

use crate::editor::{self, AskInput};
use crate::navigator;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Copy)]
enum Cursor {
    At { row: usize, field: ReviewField },
    Complete,
}

/// One reviewer's pass over a loaded table.
pub struct ReviewSession {
    cursor: Cursor,
}

/// Everything the presentation layer needs to render the current step.
#[derive(Debug, Clone)]
pub struct ReviewPrompt {
    pub row: usize,
    pub total: usize,
    pub case_number: String,
    pub party: String,
    pub field: ReviewField,
    pub raw_text: Option<String>,
    pub existing: Option<Annotation>,
}

/// Where the cursor went after a finalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalizeOutcome {
    /// Sentence committed; same row, now reviewing the defense ask.
    DefenseNext,
    /// Defense committed but the row is not fully reviewed; stay put.
    /// Re-finalizing overwrites the stored judgment.
    RowIncomplete,
    /// Row fully reviewed; moved to the next eligible row.
    AdvancedTo(usize),
    /// Row fully reviewed and nothing reviewable remains.
    Complete,
    /// Finalize on an already-complete session; nothing was written.
    AlreadyComplete,
}

impl ReviewSession {
    /// Start a session at the first eligible row, sentence field; a table
    /// with nothing reviewable starts complete.
    pub fn start(table: &RecordTable) -> Self {
        let cursor = match navigator::next_eligible_row(table, 0) {
            Some(row) => Cursor::At {
                row,
                field: ReviewField::Sentence,
            },
            None => Cursor::Complete,
        };
        ReviewSession { cursor }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.cursor, Cursor::Complete)
    }

    /// Current `(row, field)` position, `None` once complete.
    pub fn cursor(&self) -> Option<(usize, ReviewField)> {
        match self.cursor {
            Cursor::At { row, field } => Some((row, field)),
            Cursor::Complete => None,
        }
    }

    /// Snapshot of the current step for the presentation layer.
    pub fn prompt(&self, table: &RecordTable) -> Option<ReviewPrompt> {
        let (row, field) = self.cursor()?;
        let view = table.row(row)?;
        Some(ReviewPrompt {
            row,
            total: table.row_count(),
            case_number: view.case_number.unwrap_or("-").to_string(),
            party: view.party.unwrap_or("-").to_string(),
            field,
            raw_text: view.raw_text(field).map(str::to_string),
            existing: view.annotation(field).cloned(),
        })
    }

    /// Commit the reviewer's input for the active field and advance.
    ///
    /// A no-op once the session is complete.
    pub fn finalize(
        &mut self,
        table: &mut RecordTable,
        input: AskInput,
    ) -> Result<FinalizeOutcome, SessionError> {
        let Cursor::At { row, field } = self.cursor else {
            return Ok(FinalizeOutcome::AlreadyComplete);
        };

        let annotation = editor::apply(table.annotation(row, field), input);
        table.set_annotation(row, field, annotation)?;
        info!(row, field = %field, "finalized annotation");

        match field {
            ReviewField::Sentence => {
                self.cursor = Cursor::At {
                    row,
                    field: ReviewField::Defense,
                };
                Ok(FinalizeOutcome::DefenseNext)
            }
            ReviewField::Defense => {
                let fully_reviewed = table.row(row).is_some_and(|r| r.is_fully_reviewed());
                if !fully_reviewed {
                    return Ok(FinalizeOutcome::RowIncomplete);
                }
                match navigator::next_eligible_row(table, row + 1) {
                    Some(next) => {
                        self.cursor = Cursor::At {
                            row: next,
                            field: ReviewField::Sentence,
                        };
                        Ok(FinalizeOutcome::AdvancedTo(next))
                    }
                    None => {
                        self.cursor = Cursor::Complete;
                        info!(reviewed = table.reviewed_count(), "review session complete");
                        Ok(FinalizeOutcome::Complete)
                    }
                }
            }
        }
    }
}
