//! Shared ingest → validate → transform driver.
//!
//! Every HTTP endpoint and CLI command funnels through here, parameterized
//! only by the [`Operation`] to apply. A matrix either validates fully or the
//! request fails before any transform runs.
//!
//! # Example
//!
//! ```
//! use matrixload::{run_bytes, Operation};
//!
//! let body = run_bytes(Operation::Sum, b"1,2\n3,4").unwrap();
//! assert_eq!(body, "10\n");
//!
//! let err = run_bytes(Operation::Sum, b"").unwrap_err();
//! assert_eq!(err.to_string(), "failed to parse csv: file is empty");
//! ```

use std::path::Path;

use tracing::debug;

use super::operations::Operation;
use crate::error::PipelineResult;
use crate::models::Matrix;
use crate::parser::{parse_csv_bytes, parse_csv_file};
use crate::validation::validate_square_matrix;

/// Parse and validate CSV bytes without transforming them.
pub fn check_bytes(bytes: &[u8]) -> PipelineResult<Matrix> {
    let matrix = parse_csv_bytes(bytes)?;
    validate_square_matrix(&matrix)?;
    Ok(matrix)
}

/// Parse and validate a CSV file without transforming it.
pub fn check_file<P: AsRef<Path>>(path: P) -> PipelineResult<Matrix> {
    let matrix = parse_csv_file(path)?;
    validate_square_matrix(&matrix)?;
    Ok(matrix)
}

/// Validate an already-parsed matrix and apply `op`.
///
/// The matrix is dropped once the body is rendered.
pub fn run_matrix(op: Operation, matrix: Matrix) -> PipelineResult<String> {
    validate_square_matrix(&matrix)?;
    debug!(operation = %op, size = matrix.row_count(), "applying operation");
    Ok(op.apply(&matrix)?)
}

/// Full pipeline on uploaded CSV bytes.
pub fn run_bytes(op: Operation, bytes: &[u8]) -> PipelineResult<String> {
    run_matrix(op, parse_csv_bytes(bytes)?)
}

/// Full pipeline on a CSV file on disk.
pub fn run_file<P: AsRef<Path>>(op: Operation, path: P) -> PipelineResult<String> {
    run_matrix(op, parse_csv_file(path)?)
}
