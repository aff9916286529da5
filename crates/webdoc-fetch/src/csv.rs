//! CSV-to-tabular conversion for sheet exports.
//!
//! The sheet export produces simple comma-separated text; this module keeps
//! the same naive comma split the export has always been read with (no
//! quoted-field handling), trimming cells and stripping stray `\r`.

use std::collections::BTreeMap;

/// One data row keyed by the header row's column names.
pub type Record = BTreeMap<String, String>;

/// Split CSV text into trimmed rows of trimmed cells.
#[must_use]
pub fn parse_rows(csv: &str) -> Vec<Vec<String>> {
    csv.split('\n')
        .map(|row| {
            row.trim()
                .split(',')
                .map(|cell| cell.trim().replace('\r', ""))
                .collect()
        })
        .collect()
}

/// Convert rows into records keyed by the first (header) row.
///
/// Fewer than two rows yields no records. Rows shorter than the header fill
/// missing cells with empty strings; rows with no content at all (trailing
/// newline artifacts) are skipped.
#[must_use]
pub fn rows_to_records(rows: Vec<Vec<String>>) -> Vec<Record> {
    let mut rows = rows.into_iter();
    let Some(headers) = rows.next() else {
        return Vec::new();
    };

    rows.filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .map(|row| {
            headers
                .iter()
                .enumerate()
                .map(|(i, header)| (header.clone(), row.get(i).cloned().unwrap_or_default()))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_rows_trims_cells() {
        let rows = parse_rows("name , age\n Ada , 36 ");
        assert_eq!(
            rows,
            vec![
                vec!["name".to_owned(), "age".to_owned()],
                vec!["Ada".to_owned(), "36".to_owned()],
            ]
        );
    }

    #[test]
    fn test_parse_rows_strips_carriage_returns() {
        let rows = parse_rows("a,b\r\nc,d\r");
        assert_eq!(
            rows,
            vec![
                vec!["a".to_owned(), "b".to_owned()],
                vec!["c".to_owned(), "d".to_owned()],
            ]
        );
    }

    #[test]
    fn test_rows_to_records() {
        let rows = parse_rows("name,age\nAda,36\nGrace,45");
        let records = rows_to_records(rows);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["name"], "Ada");
        assert_eq!(records[0]["age"], "36");
        assert_eq!(records[1]["name"], "Grace");
    }

    #[test]
    fn test_rows_to_records_header_only() {
        assert_eq!(rows_to_records(parse_rows("name,age")), Vec::<Record>::new());
    }

    #[test]
    fn test_rows_to_records_empty_input() {
        assert_eq!(rows_to_records(Vec::new()), Vec::<Record>::new());
    }

    #[test]
    fn test_rows_to_records_skips_blank_trailing_row() {
        let records = rows_to_records(parse_rows("name,age\nAda,36\n"));
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_rows_to_records_short_row_filled() {
        let records = rows_to_records(parse_rows("name,age\nAda"));
        assert_eq!(records[0]["name"], "Ada");
        assert_eq!(records[0]["age"], "");
    }
}
