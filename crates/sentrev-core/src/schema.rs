//! Column names and Arrow schema helpers for case-record tables.

use arrow::datatypes::{DataType, Field, Schema};

pub const CASE_NUMBER: &str = "case_number";
pub const PARTY: &str = "party";
pub const SENTENCE_INFO: &str = "sentence_info";
pub const DEFENSE_ASK: &str = "defense_ask";
pub const REVIEWED_SENTENCE: &str = "reviewed_sentence";
pub const REVIEWED_DEFENSE_ASK: &str = "reviewed_defense_ask";

/// Columns the input file must carry for a session to start.
pub const REQUIRED_COLUMNS: [&str; 4] = [CASE_NUMBER, PARTY, SENTENCE_INFO, DEFENSE_ASK];

/// Required columns absent from the given header, in required order.
pub fn missing_required(headers: &[String]) -> Vec<String> {
    REQUIRED_COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|h| h == *required))
        .map(|required| required.to_string())
        .collect()
}

/// All-text schema over the given columns.
///
/// Every column is nullable `Utf8` so that cell text round-trips exactly,
/// whatever the source spreadsheet held. Used both to read the input CSV
/// and to write the annotated export.
pub fn text_schema(columns: &[String]) -> Schema {
    Schema::new(
        columns
            .iter()
            .map(|name| Field::new(name, DataType::Utf8, true))
            .collect::<Vec<_>>(),
    )
}
