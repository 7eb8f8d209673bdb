//! Domain models for the Matrixload pipeline.
//!
//! - [`Matrix`] - grid of textual CSV cells, row order preserved
//!
//! A `Matrix` is built fresh from each upload and dropped once the response
//! is written. Operations never mutate it; [`Matrix::transpose`] and
//! [`Matrix::flatten`] produce derived copies.

use std::num::ParseIntError;

// =============================================================================
// Matrix
// =============================================================================

/// Ordered rows of textual cells as read from a CSV file.
///
/// No shape is enforced on construction. Run
/// [`crate::validation::validate_square_matrix`] before relying on the
/// square/integer invariants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matrix {
    rows: Vec<Vec<String>>,
}

impl Matrix {
    /// Wrap raw rows.
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Build from string slices. Handy in tests and examples.
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width of the first row, or 0 for an empty matrix.
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Swap rows and columns: `out[j][i] == self[i][j]`.
    ///
    /// Ragged input is tolerated: missing cells are skipped rather than
    /// padded, so only validated square matrices round-trip exactly.
    pub fn transpose(&self) -> Matrix {
        let width = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut out: Vec<Vec<String>> = vec![Vec::with_capacity(self.rows.len()); width];

        for row in &self.rows {
            for (j, cell) in row.iter().enumerate() {
                out[j].push(cell.clone());
            }
        }

        Matrix::new(out)
    }

    /// All cells in row-major order.
    pub fn flatten(&self) -> Vec<&str> {
        self.rows
            .iter()
            .flat_map(|row| row.iter().map(String::as_str))
            .collect()
    }

    /// Integer view of every cell in row-major order.
    ///
    /// Fails on the first cell that is not an `i64`.
    pub fn values(&self) -> Result<Vec<i64>, ParseIntError> {
        self.rows
            .iter()
            .flatten()
            .map(|cell| cell.parse::<i64>())
            .collect()
    }

    /// Render as CSV text: cells joined by `,`, every row ending in `\n`.
    pub fn to_csv_lines(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            out.push_str(&row.join(","));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Matrix {
        Matrix::from_rows([["1", "2", "3"], ["4", "5", "6"], ["7", "8", "9"]])
    }

    #[test]
    fn test_dimensions() {
        let m = sample();
        assert_eq!(m.row_count(), 3);
        assert_eq!(m.column_count(), 3);
        assert!(!m.is_empty());
        assert_eq!(Matrix::default().column_count(), 0);
    }

    #[test]
    fn test_transpose() {
        let t = sample().transpose();
        assert_eq!(
            t,
            Matrix::from_rows([["1", "4", "7"], ["2", "5", "8"], ["3", "6", "9"]])
        );
    }

    #[test]
    fn test_transpose_twice_is_identity() {
        let m = Matrix::from_rows([
            ["1", "2", "3", "4"],
            ["2", "2", "-1", "-10"],
            ["3", "3", "5", "-2"],
            ["4", "3", "2", "1"],
        ]);
        assert_eq!(m.transpose().transpose(), m);
    }

    #[test]
    fn test_flatten_row_major() {
        assert_eq!(sample().flatten(), vec!["1", "2", "3", "4", "5", "6", "7", "8", "9"]);
    }

    #[test]
    fn test_values() {
        let m = Matrix::from_rows([["-1", "+2"], ["0", "40"]]);
        assert_eq!(m.values().unwrap(), vec![-1, 2, 0, 40]);
    }

    #[test]
    fn test_values_fails_on_non_integer() {
        let bad = Matrix::from_rows([["1", "x"], ["3", "4"]]);
        let err = bad.values().unwrap_err();
        assert_eq!(err.to_string(), "invalid digit found in string");
    }

    #[test]
    fn test_to_csv_lines() {
        let m = Matrix::from_rows([["1", "2"], ["3", "4"]]);
        assert_eq!(m.to_csv_lines(), "1,2\n3,4\n");
        assert_eq!(Matrix::default().to_csv_lines(), "");
    }
}
