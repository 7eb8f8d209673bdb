//! Error types for the Matrixload request pipeline.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`CsvError`] - reading the upload and parsing it as CSV
//! - [`ValidationError`] - square integer matrix checks
//! - [`PipelineError`] - top-level ingest → validate → transform errors
//! - [`ServerError`] - binding and serving HTTP
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries. The `Display` text of
//! every variant is the exact message returned to HTTP clients, so
//! wording changes here are breaking changes.

use std::num::ParseIntError;

use thiserror::Error;

// =============================================================================
// CSV Ingestion Errors
// =============================================================================

/// Errors while reading an uploaded file and parsing it as CSV.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CsvError {
    /// The `file` field is missing or could not be read.
    #[error("failed to read file: {0}")]
    Read(String),

    /// The bytes are not valid CSV.
    #[error("failed to parse csv: {0}")]
    Parse(String),

    /// The CSV contains no records.
    #[error("failed to parse csv: file is empty")]
    Empty,
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors produced by [`crate::validation::validate_square_matrix`].
///
/// Rows and columns are reported 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The matrix has no rows.
    #[error("empty matrix")]
    EmptyMatrix,

    /// A cell of the first row is not an integer, usually a textual header.
    #[error("matrix has a header row or non-integer value at row 1, column {column}: {cause}")]
    HeaderOrNonInteger { column: usize, cause: String },

    /// A row's width differs from the first row's width.
    #[error("matrix is not square: row {row} has {found} columns, expected {expected}")]
    RowWidth {
        row: usize,
        found: usize,
        expected: usize,
    },

    /// A cell is the empty string.
    #[error("matrix has empty value at row {row}, column {column}")]
    EmptyValue { row: usize, column: usize },

    /// A cell does not parse as a base-10 signed integer.
    #[error("matrix value at row {row}, column {column} is not an integer: {cause}")]
    NotInteger {
        row: usize,
        column: usize,
        cause: String,
    },

    /// Every row has the same width but the row count differs from it.
    #[error("matrix is not square: {rows} rows and {columns} columns")]
    NotSquare { rows: usize, columns: usize },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline errors.
///
/// This is the error type returned by [`crate::transform::pipeline::run_bytes`].
/// It forwards the message of the wrapped error untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// Ingestion error.
    #[error(transparent)]
    Csv(#[from] CsvError),

    /// Validation error.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A numeric operation met a cell that is not an `i64`.
    ///
    /// Only reachable when an operation is applied to an unvalidated matrix.
    #[error("matrix value is not an integer: {0}")]
    Value(#[from] ParseIntError),
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Could not bind the listening socket.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        source: std::io::Error,
    },

    /// The server stopped with an I/O error.
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
