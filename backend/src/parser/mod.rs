//! CSV ingestion: raw bytes to a [`Matrix`] of textual cells.
//!
//! Parsing is deliberately lenient about shape. Rows of differing width are
//! kept as-is so the validator can report which row is off, instead of the
//! reader bailing out with a generic "unequal lengths" error.
//!
//! Quote syntax is strict. The `csv` crate accepts stray quotes silently, so
//! the input is scanned first and rejected with the offending line number.
//!
//! Cell bytes are not required to be UTF-8. Invalid sequences are replaced
//! and left for the validator, which reports the cell's row and column.
//! Records end at `\n` only; a `\r` directly before it is dropped, a lone
//! `\r` stays part of the cell.

use std::path::Path;

use csv::{ByteRecord, ReaderBuilder, Terminator};

use crate::error::{CsvError, CsvResult};
use crate::models::Matrix;

const BARE_QUOTE: &str = "bare \" in non-quoted-field";
const BAD_QUOTE: &str = "extraneous or missing \" in quoted-field";

/// Parse CSV bytes into a matrix.
///
/// No header row is assumed, fields per record are not enforced and blank
/// lines are skipped. Zero records is an error.
///
/// # Example
/// ```
/// use matrixload::parse_csv_bytes;
///
/// let matrix = parse_csv_bytes(b"1,2\n3,4\n").unwrap();
/// assert_eq!(matrix.row_count(), 2);
/// assert_eq!(matrix.rows()[1], vec!["3", "4"]);
/// ```
pub fn parse_csv_bytes(bytes: &[u8]) -> CsvResult<Matrix> {
    check_quotes(bytes)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .terminator(Terminator::Any(b'\n'))
        .from_reader(bytes);

    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record.map_err(|e| CsvError::Parse(e.to_string()))?;
        if is_blank_crlf_line(&record) {
            continue;
        }
        rows.push(record_cells(&record));
    }

    if rows.is_empty() {
        return Err(CsvError::Empty);
    }

    Ok(Matrix::new(rows))
}

/// Read a CSV file from disk and parse it.
pub fn parse_csv_file<P: AsRef<Path>>(path: P) -> CsvResult<Matrix> {
    let bytes = std::fs::read(path.as_ref())
        .map_err(|e| CsvError::Read(format!("{}: {}", path.as_ref().display(), e)))?;

    parse_csv_bytes(&bytes)
}

/// A line holding only `\r` before its `\n`.
fn is_blank_crlf_line(record: &ByteRecord) -> bool {
    record.len() == 1 && record.get(0) == Some(b"\r".as_slice())
}

fn record_cells(record: &ByteRecord) -> Vec<String> {
    let last = record.len().saturating_sub(1);
    record
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let field = match field {
                [rest @ .., b'\r'] if i == last => rest,
                _ => field,
            };
            String::from_utf8_lossy(field).into_owned()
        })
        .collect()
}

#[derive(Clone, Copy)]
enum QuoteState {
    FieldStart,
    Unquoted,
    Quoted,
    /// A `"` was seen inside a quoted field: either an escape or the close.
    QuoteInQuoted,
    /// `\r` right after a closing quote; only valid as part of `\r\n`.
    ClosedThenCr,
}

/// Reject quote misuse the `csv` reader would otherwise let through.
fn check_quotes(bytes: &[u8]) -> CsvResult<()> {
    let mut state = QuoteState::FieldStart;
    let mut line = 1usize;
    let mut opened_at = 1usize;

    for &b in bytes {
        state = match (state, b) {
            (QuoteState::FieldStart, b'"') => {
                opened_at = line;
                QuoteState::Quoted
            }
            (QuoteState::FieldStart | QuoteState::Unquoted | QuoteState::QuoteInQuoted, b',') => {
                QuoteState::FieldStart
            }
            (
                QuoteState::FieldStart
                | QuoteState::Unquoted
                | QuoteState::QuoteInQuoted
                | QuoteState::ClosedThenCr,
                b'\n',
            ) => {
                line += 1;
                QuoteState::FieldStart
            }
            (QuoteState::QuoteInQuoted, b'\r') => QuoteState::ClosedThenCr,
            (QuoteState::ClosedThenCr, _) => return Err(parse_error(line, BAD_QUOTE)),
            (QuoteState::Unquoted, b'"') => return Err(parse_error(line, BARE_QUOTE)),
            (QuoteState::FieldStart | QuoteState::Unquoted, _) => QuoteState::Unquoted,
            (QuoteState::Quoted, b'"') => QuoteState::QuoteInQuoted,
            (QuoteState::Quoted, b'\n') => {
                line += 1;
                QuoteState::Quoted
            }
            (QuoteState::Quoted, _) => QuoteState::Quoted,
            (QuoteState::QuoteInQuoted, b'"') => QuoteState::Quoted,
            (QuoteState::QuoteInQuoted, _) => return Err(parse_error(line, BAD_QUOTE)),
        };
    }

    if let QuoteState::Quoted = state {
        return Err(parse_error(opened_at, BAD_QUOTE));
    }

    Ok(())
}

fn parse_error(line: usize, reason: &str) -> CsvError {
    CsvError::Parse(format!("parse error on line {}: {}", line, reason))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::validation::validate_square_matrix;
    use std::io::Write;

    #[test]
    fn test_simple_csv() {
        let matrix = parse_csv_bytes(b"1,2,3\n4,5,6\n7,8,9").unwrap();

        assert_eq!(matrix.row_count(), 3);
        assert_eq!(matrix.rows()[0], vec!["1", "2", "3"]);
        assert_eq!(matrix.rows()[2], vec!["7", "8", "9"]);
    }

    #[test]
    fn test_ragged_rows_are_kept() {
        let matrix = parse_csv_bytes(b"1,2,3\n4,5\n7,8,9\n").unwrap();

        assert_eq!(matrix.rows()[1].len(), 2);
        assert_eq!(matrix.rows()[2].len(), 3);
    }

    #[test]
    fn test_header_row_is_data() {
        let matrix = parse_csv_bytes(b"a,b\n1,2\n").unwrap();
        assert_eq!(matrix.rows()[0], vec!["a", "b"]);
    }

    #[test]
    fn test_crlf_terminators() {
        let matrix = parse_csv_bytes(b"1,2\r\n3,4\r\n").unwrap();
        assert_eq!(matrix, Matrix::from_rows([["1", "2"], ["3", "4"]]));
    }

    #[test]
    fn test_quoted_values() {
        let matrix = parse_csv_bytes(b"\"1\",2\n3,\"4\"\n").unwrap();
        assert_eq!(matrix, Matrix::from_rows([["1", "2"], ["3", "4"]]));
    }

    #[test]
    fn test_escaped_quote_inside_quoted_field() {
        let matrix = parse_csv_bytes(b"\"a\"\"b\",1\n").unwrap();
        assert_eq!(matrix.rows()[0][0], "a\"b");
    }

    #[test]
    fn test_empty_cells_preserved() {
        let matrix = parse_csv_bytes(b"1,,3\n").unwrap();
        assert_eq!(matrix.rows()[0], vec!["1", "", "3"]);
    }

    #[test]
    fn test_empty_file_error() {
        let err = parse_csv_bytes(b"").unwrap_err();
        assert_eq!(err, CsvError::Empty);
        assert_eq!(err.to_string(), "failed to parse csv: file is empty");
    }

    #[test]
    fn test_unterminated_quote_error() {
        let err = parse_csv_bytes(b"\"1,2,3\n4,5,6").unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("failed to parse csv: "));
        assert!(msg.contains("line 1"));
        assert!(msg.contains("quoted-field"));
    }

    #[test]
    fn test_bare_quote_error() {
        let err = parse_csv_bytes(b"1,2\n3,4\"\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to parse csv: parse error on line 2: bare \" in non-quoted-field"
        );
    }

    #[test]
    fn test_extraneous_after_closing_quote() {
        let err = parse_csv_bytes(b"\"1\"x,2\n").unwrap_err();
        assert!(matches!(err, CsvError::Parse(_)));
    }

    #[test]
    fn test_invalid_utf8_is_kept_as_cell_text() {
        let matrix = parse_csv_bytes(b"1,2\n3,\xff\n").unwrap();
        assert_eq!(matrix.rows()[1], vec!["3", "\u{fffd}"]);

        let err = validate_square_matrix(&matrix).unwrap_err();
        assert!(err
            .to_string()
            .starts_with("matrix value at row 2, column 2 is not an integer: "));
    }

    #[test]
    fn test_invalid_utf8_in_first_row_is_header_error() {
        let matrix = parse_csv_bytes(b"\xff,2\n3,4\n").unwrap();
        let err = validate_square_matrix(&matrix).unwrap_err();
        assert!(err
            .to_string()
            .starts_with("matrix has a header row or non-integer value at row 1, column 1: "));
    }

    #[test]
    fn test_lone_carriage_return_stays_in_cell() {
        let matrix = parse_csv_bytes(b"1,2\r3,4").unwrap();
        assert_eq!(matrix.row_count(), 1);
        assert_eq!(matrix.rows()[0], vec!["1", "2\r3", "4"]);

        let err = validate_square_matrix(&matrix).unwrap_err();
        assert!(matches!(err, ValidationError::HeaderOrNonInteger { column: 2, .. }));
    }

    #[test]
    fn test_blank_crlf_lines_skipped() {
        let matrix = parse_csv_bytes(b"1,2\r\n\r\n3,4\r\n").unwrap();
        assert_eq!(matrix, Matrix::from_rows([["1", "2"], ["3", "4"]]));
    }

    #[test]
    fn test_quoted_field_then_crlf() {
        let matrix = parse_csv_bytes(b"\"1\",\"2\"\r\n3,4\r\n").unwrap();
        assert_eq!(matrix, Matrix::from_rows([["1", "2"], ["3", "4"]]));
    }

    #[test]
    fn test_carriage_return_after_closing_quote() {
        let err = parse_csv_bytes(b"\"1\"\r,2\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to parse csv: parse error on line 1: extraneous or missing \" in quoted-field"
        );
    }

    #[test]
    fn test_parse_csv_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"1,2\n3,4\n").unwrap();

        let matrix = parse_csv_file(file.path()).unwrap();
        assert_eq!(matrix.row_count(), 2);
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse_csv_file("/definitely/not/here.csv").unwrap_err();
        assert!(err.to_string().starts_with("failed to read file: "));
    }
}
