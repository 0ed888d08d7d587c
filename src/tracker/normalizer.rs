use super::config::ColumnMap;
use super::error::TrackerError;
use super::models::StrikeRecord;
use rust_decimal::Decimal;
use tracing::{debug, warn};

// ── Cell parsers ──────────────────────────────────────────────────────────────

/// Drop thousands separators and surrounding whitespace.
/// " 1,23,456.75 " → "123456.75"
fn clean_number(s: &str) -> String {
    s.trim().replace(',', "")
}

/// "1,234.50" → 1234.50 | "-" → None
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    let cleaned = clean_number(s);
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

/// Whole-number cells such as open interest. "-12,300" → -12300
pub fn parse_integer(s: &str) -> Option<i64> {
    let cleaned = clean_number(s);
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

/// Integer part before any decimal point. "17,500.00" → 17500
pub fn parse_integer_part(s: &str) -> Option<i64> {
    let whole = s.trim().split('.').next().unwrap_or_default();
    parse_integer(whole)
}

// ── Row normalization ─────────────────────────────────────────────────────────

fn cell<'a>(
    row_index: usize,
    row: &'a [String],
    column: &'static str,
    index: usize,
) -> Result<&'a str, TrackerError> {
    row.get(index)
        .map(String::as_str)
        .ok_or(TrackerError::MissingColumn { row: row_index, column, index })
}

fn parse_cell<T>(
    row_index: usize,
    row: &[String],
    column: &'static str,
    index: usize,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, TrackerError> {
    let text = cell(row_index, row, column, index)?;
    parse(text).ok_or_else(|| TrackerError::MalformedRow {
        row: row_index,
        column,
        value: text.to_string(),
    })
}

/// Build one strike record from a raw table row, reading only the mapped columns
pub fn normalize_row(
    row_index: usize,
    row: &[String],
    columns: &ColumnMap,
) -> Result<StrikeRecord, TrackerError> {
    Ok(StrikeRecord {
        strike: parse_cell(row_index, row, "strike", columns.strike, parse_integer_part)?,
        call_premium: parse_cell(row_index, row, "call premium", columns.call_premium, parse_decimal)?,
        call_open_interest: parse_cell(
            row_index,
            row,
            "call open interest",
            columns.call_open_interest,
            parse_integer,
        )?,
        put_premium: parse_cell(row_index, row, "put premium", columns.put_premium, parse_decimal)?,
        put_open_interest: parse_cell(
            row_index,
            row,
            "put open interest",
            columns.put_open_interest,
            parse_integer,
        )?,
    })
}

/// Normalize every row, skipping (and logging) the ones that fail to parse.
/// Output keeps the input row order.
pub fn normalize_rows(rows: &[Vec<String>], columns: &ColumnMap) -> Vec<StrikeRecord> {
    let records: Vec<StrikeRecord> = rows
        .iter()
        .enumerate()
        .filter_map(|(idx, row)| match normalize_row(idx, row, columns) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(error = %e, "Dropping options-chain row");
                None
            }
        })
        .collect();

    debug!(rows = rows.len(), records = records.len(), "Normalized options-chain rows");
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(usize, &str)]) -> Vec<String> {
        let mut row = vec!["-".to_string(); 21];
        for (idx, text) in cells {
            row[*idx] = text.to_string();
        }
        row
    }

    #[test]
    fn test_parse_integer_part() {
        assert_eq!(parse_integer_part("17,500.00"), Some(17500));
        assert_eq!(parse_integer_part(" 9800 "), Some(9800));
        assert_eq!(parse_integer_part("-"), None);
        assert_eq!(parse_integer_part(""), None);
    }

    #[test]
    fn test_parse_decimal_strips_separators() {
        assert_eq!(parse_decimal("1,234.50"), Some(Decimal::new(123450, 2)));
        assert_eq!(parse_decimal("abc"), None);
    }

    #[test]
    fn test_parse_integer_keeps_sign() {
        assert_eq!(parse_integer("-12,300"), Some(-12300));
        assert_eq!(parse_integer("1.5"), None);
    }

    #[test]
    fn test_normalize_row_reads_mapped_columns() {
        let raw = row(&[
            (1, "1,12,500"),
            (4, "102.35"),
            (10, "17,500.00"),
            (12, "98.10"),
            (19, "2,04,975"),
        ]);

        let record = normalize_row(0, &raw, &ColumnMap::default()).unwrap();
        assert_eq!(record.strike, 17500);
        assert_eq!(record.call_open_interest, 112500);
        assert_eq!(record.call_premium, Decimal::new(10235, 2));
        assert_eq!(record.put_premium, Decimal::new(9810, 2));
        assert_eq!(record.put_open_interest, 204975);
    }

    #[test]
    fn test_normalize_row_reports_bad_cell() {
        let raw = row(&[(1, "100"), (4, "-"), (10, "17500.00"), (12, "5"), (19, "10")]);

        let err = normalize_row(3, &raw, &ColumnMap::default()).unwrap_err();
        assert_eq!(
            err,
            TrackerError::MalformedRow { row: 3, column: "call premium", value: "-".to_string() }
        );
    }

    #[test]
    fn test_normalize_row_reports_short_row() {
        let raw: Vec<String> = vec!["1".to_string(); 11];
        let err = normalize_row(0, &raw, &ColumnMap::default()).unwrap_err();
        assert!(matches!(err, TrackerError::MissingColumn { index: 12, .. }));
    }

    #[test]
    fn test_normalize_rows_skips_malformed() {
        let rows = vec![
            row(&[(1, "100"), (4, "10"), (10, "17400.00"), (12, "20"), (19, "200")]),
            row(&[(1, "100"), (4, "10"), (10, "-"), (12, "20"), (19, "200")]),
            row(&[(1, "300"), (4, "30"), (10, "17500.00"), (12, "40"), (19, "400")]),
        ];

        let records = normalize_rows(&rows, &ColumnMap::default());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].strike, 17400);
        assert_eq!(records[1].strike, 17500);
    }
}
