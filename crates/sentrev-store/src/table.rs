//! CSV-backed record table for sentencing review.
//!
//! The table reads every column as nullable text so cell values round-trip
//! exactly, keeps the two `reviewed_*` annotation columns decoded in memory,
//! and re-emits the full table (original columns in input order, annotations
//! as JSON cells) on export. Raw columns are never mutated after load; only
//! the two annotation slots per row change during a session.

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, StringArray, StringBuilder};
use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::record_batch::RecordBatch;
use tracing::{info, warn};

use sentrev_core::{Annotation, ReviewField, codec, schema};

use crate::StoreError;

struct RowEntry {
    /// One slot per column, aligned with `RecordTable::columns`. The two
    /// annotation slots stay `None` here; their decoded values live below.
    cells: Vec<Option<String>>,
    sentence: Option<Annotation>,
    defense: Option<Annotation>,
}

/// In-memory case-record table plus per-row annotations.
pub struct RecordTable {
    /// Column names in export order: input columns first, then any
    /// `reviewed_*` column the input file lacked.
    columns: Vec<String>,
    case_idx: usize,
    party_idx: usize,
    sentence_idx: usize,
    defense_idx: usize,
    reviewed_sentence_idx: usize,
    reviewed_defense_idx: usize,
    rows: Vec<RowEntry>,
}

/// Borrowed view of one row, used by the navigator and the UI.
pub struct RowView<'a> {
    pub index: usize,
    pub case_number: Option<&'a str>,
    pub party: Option<&'a str>,
    pub sentence_info: Option<&'a str>,
    pub defense_ask: Option<&'a str>,
    pub reviewed_sentence: Option<&'a Annotation>,
    pub reviewed_defense_ask: Option<&'a Annotation>,
}

impl<'a> RowView<'a> {
    /// A row is reviewable only when both raw text fields are present.
    pub fn is_eligible(&self) -> bool {
        self.sentence_info.is_some() && self.defense_ask.is_some()
    }

    /// Both fields carry a decoded annotation.
    pub fn is_fully_reviewed(&self) -> bool {
        self.reviewed_sentence.is_some() && self.reviewed_defense_ask.is_some()
    }

    /// Raw text for the given review field.
    pub fn raw_text(&self, field: ReviewField) -> Option<&'a str> {
        match field {
            ReviewField::Sentence => self.sentence_info,
            ReviewField::Defense => self.defense_ask,
        }
    }

    /// Stored annotation for the given review field.
    pub fn annotation(&self, field: ReviewField) -> Option<&'a Annotation> {
        match field {
            ReviewField::Sentence => self.reviewed_sentence,
            ReviewField::Defense => self.reviewed_defense_ask,
        }
    }
}

impl RecordTable {
    /// Load a table from CSV bytes.
    ///
    /// Fails with [`StoreError::MissingColumns`] when any required column is
    /// absent. Ensures both `reviewed_*` columns exist (appended when the
    /// input lacks them) and decodes any existing annotation cells; a cell
    /// that fails strict decoding is logged and treated as un-reviewed.
    pub fn from_csv_bytes(bytes: &[u8]) -> Result<Self, StoreError> {
        let mut cursor = Cursor::new(bytes);
        let format = Format::default().with_header(true);
        let (inferred, _) = format.infer_schema(&mut cursor, None)?;
        let input_columns: Vec<String> = inferred
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect();

        let missing = schema::missing_required(&input_columns);
        if !missing.is_empty() {
            return Err(StoreError::MissingColumns(missing));
        }

        let mut columns = input_columns.clone();
        for reviewed in [schema::REVIEWED_SENTENCE, schema::REVIEWED_DEFENSE_ASK] {
            if !columns.iter().any(|c| c == reviewed) {
                columns.push(reviewed.to_string());
            }
        }

        // All six were just checked or appended.
        let col_idx = |name: &str| -> usize {
            columns.iter().position(|c| c == name).unwrap_or_default()
        };
        let case_idx = col_idx(schema::CASE_NUMBER);
        let party_idx = col_idx(schema::PARTY);
        let sentence_idx = col_idx(schema::SENTENCE_INFO);
        let defense_idx = col_idx(schema::DEFENSE_ASK);
        let reviewed_sentence_idx = col_idx(schema::REVIEWED_SENTENCE);
        let reviewed_defense_idx = col_idx(schema::REVIEWED_DEFENSE_ASK);

        let mut table = RecordTable {
            case_idx,
            party_idx,
            sentence_idx,
            defense_idx,
            reviewed_sentence_idx,
            reviewed_defense_idx,
            columns,
            rows: Vec::new(),
        };

        cursor.set_position(0);
        let read_schema = Arc::new(schema::text_schema(&input_columns));
        let reader = ReaderBuilder::new(read_schema)
            .with_header(true)
            .build(cursor)?;

        for batch in reader {
            let batch = batch?;
            table.append_batch(&batch, &input_columns)?;
        }

        info!(
            rows = table.rows.len(),
            eligible = table.eligible_count(),
            "loaded record table"
        );
        Ok(table)
    }

    /// Load a table from a CSV file on disk.
    pub fn from_csv_path(path: &Path) -> Result<Self, StoreError> {
        let bytes = std::fs::read(path)?;
        info!(path = %path.display(), bytes = bytes.len(), "reading input file");
        Self::from_csv_bytes(&bytes)
    }

    fn append_batch(
        &mut self,
        batch: &RecordBatch,
        input_columns: &[String],
    ) -> Result<(), StoreError> {
        let mut arrays = Vec::with_capacity(batch.num_columns());
        for c in 0..batch.num_columns() {
            let array = batch
                .column(c)
                .as_any()
                .downcast_ref::<StringArray>()
                .ok_or_else(|| StoreError::Other("csv column not utf8".into()))?;
            arrays.push(array);
        }

        for r in 0..batch.num_rows() {
            let index = self.rows.len();
            let mut cells = vec![None; self.columns.len()];
            let mut sentence = None;
            let mut defense = None;

            for (c, name) in input_columns.iter().enumerate() {
                let Some(text) = cell_text(arrays[c], r) else {
                    continue;
                };
                if name == schema::REVIEWED_SENTENCE {
                    sentence = decode_cell(index, name, &text);
                } else if name == schema::REVIEWED_DEFENSE_ASK {
                    defense = decode_cell(index, name, &text);
                } else {
                    cells[c] = Some(text);
                }
            }

            self.rows.push(RowEntry {
                cells,
                sentence,
                defense,
            });
        }
        Ok(())
    }

    // ── Row access ──

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, index: usize) -> Option<RowView<'_>> {
        let entry = self.rows.get(index)?;
        let cell = |c: usize| entry.cells[c].as_deref();
        Some(RowView {
            index,
            case_number: cell(self.case_idx),
            party: cell(self.party_idx),
            sentence_info: cell(self.sentence_idx),
            defense_ask: cell(self.defense_idx),
            reviewed_sentence: entry.sentence.as_ref(),
            reviewed_defense_ask: entry.defense.as_ref(),
        })
    }

    /// Whether the row at `index` has both raw text fields present.
    ///
    /// Pure over the loaded data: raw columns never change, so eligibility
    /// is stable for the whole session.
    pub fn is_eligible(&self, index: usize) -> bool {
        self.row(index).is_some_and(|row| row.is_eligible())
    }

    /// Stored annotation for one field of one row.
    pub fn annotation(&self, index: usize, field: ReviewField) -> Option<&Annotation> {
        self.row(index)?.annotation(field)
    }

    /// Commit an annotation for one field of one row, overwriting any
    /// previous judgment.
    pub fn set_annotation(
        &mut self,
        index: usize,
        field: ReviewField,
        annotation: Annotation,
    ) -> Result<(), StoreError> {
        let entry = self
            .rows
            .get_mut(index)
            .ok_or(StoreError::RowOutOfBounds(index))?;
        match field {
            ReviewField::Sentence => entry.sentence = Some(annotation),
            ReviewField::Defense => entry.defense = Some(annotation),
        }
        Ok(())
    }

    // ── Counts ──

    /// Rows with both raw text fields present.
    pub fn eligible_count(&self) -> usize {
        (0..self.rows.len()).filter(|&i| self.is_eligible(i)).count()
    }

    /// Rows with both annotation fields committed.
    pub fn reviewed_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.sentence.is_some() && r.defense.is_some())
            .count()
    }

    // ── Export ──

    /// Serialise the full table back to CSV bytes.
    ///
    /// Every column is written in input order with original cell text;
    /// annotation cells hold the JSON wire form, or stay empty when the
    /// field was never reviewed.
    pub fn to_csv_bytes(&self) -> Result<Vec<u8>, StoreError> {
        let export_schema = Arc::new(schema::text_schema(&self.columns));
        let mut arrays: Vec<ArrayRef> = Vec::with_capacity(self.columns.len());

        for c in 0..self.columns.len() {
            let mut builder = StringBuilder::new();
            for row in &self.rows {
                let value = if c == self.reviewed_sentence_idx {
                    row.sentence.as_ref().map(codec::encode)
                } else if c == self.reviewed_defense_idx {
                    row.defense.as_ref().map(codec::encode)
                } else {
                    row.cells[c].clone()
                };
                match value {
                    Some(text) => builder.append_value(text),
                    None => builder.append_null(),
                }
            }
            arrays.push(Arc::new(builder.finish()));
        }

        let batch = RecordBatch::try_new(export_schema, arrays)?;
        let mut buf = Vec::new();
        {
            let mut writer = arrow::csv::WriterBuilder::new()
                .with_header(true)
                .build(&mut buf);
            writer.write(&batch)?;
        }
        info!(
            rows = self.rows.len(),
            reviewed = self.reviewed_count(),
            "serialised annotated table"
        );
        Ok(buf)
    }

    /// Write the annotated table to a CSV file on disk.
    pub fn write_csv(&self, path: &Path) -> Result<(), StoreError> {
        let bytes = self.to_csv_bytes()?;
        std::fs::write(path, bytes)?;
        info!(path = %path.display(), "wrote annotated table");
        Ok(())
    }
}

/// Cell text, with empty and whitespace-only cells treated as absent
/// (what a spreadsheet NaN becomes in CSV).
fn cell_text(array: &StringArray, row: usize) -> Option<String> {
    if array.is_null(row) {
        return None;
    }
    let value = array.value(row);
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Strictly decode a persisted annotation cell, logging and discarding
/// unreadable cells so the session can still proceed.
fn decode_cell(row: usize, column: &str, text: &str) -> Option<Annotation> {
    match codec::decode(text) {
        Ok(annotation) => Some(annotation),
        Err(err) => {
            warn!(row, column, %err, cell = %text, "discarding unreadable annotation cell");
            None
        }
    }
}
