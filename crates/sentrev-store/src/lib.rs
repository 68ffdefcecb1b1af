//! Storage layer: the in-memory record table behind a review session.

mod error;
pub use error::StoreError;

mod table;
pub use table::{RecordTable, RowView};
