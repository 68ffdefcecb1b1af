//! Forward scan for the next row worth reviewing.

use sentrev_store::RecordTable;

/// First eligible row at or after `from`, or `None` when the rest of the
/// table holds nothing reviewable.
///
/// Pure and side-effect free; eligibility depends only on the raw text
/// columns, which never change after load, so the scan can be re-run
/// whenever the cursor might be stale. Never skips an eligible row and
/// never returns an index below `from`.
pub fn next_eligible_row(table: &RecordTable, from: usize) -> Option<usize> {
    (from..table.row_count()).find(|&i| table.is_eligible(i))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Middle row has no sentence text, last row has no defense text.
    const CSV: &str = "\
case_number,party,sentence_info,defense_ask
CR-1,Smith,two years,probation please
CR-2,Jones,,time served
CR-3,Doe,five years,no position
CR-4,Roe,one year,
";

    fn table() -> RecordTable {
        RecordTable::from_csv_bytes(CSV.as_bytes()).unwrap()
    }

    #[test]
    fn scan_from_zero_finds_first_row() {
        assert_eq!(next_eligible_row(&table(), 0), Some(0));
    }

    #[test]
    fn scan_is_inclusive_of_start() {
        assert_eq!(next_eligible_row(&table(), 2), Some(2));
    }

    #[test]
    fn ineligible_rows_are_skipped() {
        assert_eq!(next_eligible_row(&table(), 1), Some(2));
    }

    #[test]
    fn exhausted_table_returns_none() {
        assert_eq!(next_eligible_row(&table(), 3), None);
        assert_eq!(next_eligible_row(&table(), 100), None);
    }

    #[test]
    fn result_is_monotonic_and_skips_nothing_eligible() {
        let t = table();
        for from in 0..t.row_count() + 1 {
            if let Some(found) = next_eligible_row(&t, from) {
                assert!(found >= from);
                for between in from..found {
                    assert!(!t.is_eligible(between));
                }
            }
        }
    }

    #[test]
    fn table_with_no_eligible_rows() {
        let csv = "case_number,party,sentence_info,defense_ask\nCR-1,Smith,,\n";
        let t = RecordTable::from_csv_bytes(csv.as_bytes()).unwrap();
        assert_eq!(next_eligible_row(&t, 0), None);
    }
}
