//! Square integer matrix validation.
//!
//! Every operation runs the same checks, so the same malformed upload gets
//! the same error on every endpoint. Checks are fail-fast and run in this
//! order:
//!
//! 1. the matrix has at least one row
//! 2. every cell of row 1 is an integer (header detection)
//! 3. row by row: width equals row 1's width, then each cell is non-empty
//!    and an integer
//! 4. row count equals column count
//!
//! Row 1 is scanned twice on purpose. Step 2 yields the "header row" message,
//! step 3 never fires for row 1 cells but keeps the loop uniform.
//!
//! # Example
//!
//! ```
//! use matrixload::{validate_square_matrix, Matrix};
//!
//! let ok = Matrix::from_rows([["1", "2"], ["3", "4"]]);
//! assert!(validate_square_matrix(&ok).is_ok());
//!
//! let header = Matrix::from_rows([["a", "b"], ["1", "2"]]);
//! let err = validate_square_matrix(&header).unwrap_err();
//! assert!(err.to_string().contains("header row"));
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::models::Matrix;

/// Check that `matrix` is a non-empty N×N grid of base-10 signed integers
/// without a header row.
pub fn validate_square_matrix(matrix: &Matrix) -> ValidationResult<()> {
    let rows = matrix.rows();
    let first = rows.first().ok_or(ValidationError::EmptyMatrix)?;
    let n = first.len();

    for (j, cell) in first.iter().enumerate() {
        if let Err(e) = cell.parse::<i64>() {
            return Err(ValidationError::HeaderOrNonInteger {
                column: j + 1,
                cause: e.to_string(),
            });
        }
    }

    for (i, row) in rows.iter().enumerate() {
        if row.len() != n {
            return Err(ValidationError::RowWidth {
                row: i + 1,
                found: row.len(),
                expected: n,
            });
        }

        for (j, cell) in row.iter().enumerate() {
            if cell.is_empty() {
                return Err(ValidationError::EmptyValue { row: i + 1, column: j + 1 });
            }
            if let Err(e) = cell.parse::<i64>() {
                return Err(ValidationError::NotInteger {
                    row: i + 1,
                    column: j + 1,
                    cause: e.to_string(),
                });
            }
        }
    }

    if rows.len() != n {
        return Err(ValidationError::NotSquare {
            rows: rows.len(),
            columns: n,
        });
    }

    Ok(())
}

/// Quick check: returns just true/false.
pub fn is_square_matrix(matrix: &Matrix) -> bool {
    validate_square_matrix(matrix).is_ok()
}
