//! # Matrixload - square integer matrix operations over CSV
//!
//! Matrixload accepts a CSV file holding a square matrix of integers and
//! echoes, transposes, flattens, sums or multiplies it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CSV upload │────▶│   Parser    │────▶│  Validator  │────▶│  Operation  │
//! │ (multipart) │     │  (lenient)  │     │ (N×N ints)  │     │ (plain text)│
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use matrixload::{run_bytes, Operation};
//!
//! let body = run_bytes(Operation::Invert, b"1,2\n3,4").unwrap();
//! assert_eq!(body, "1,3\n2,4\n");
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - The [`Matrix`] model
//! - [`parser`] - CSV ingestion
//! - [`validation`] - Square integer matrix checks
//! - [`transform`] - Operations and the shared pipeline
//! - [`config`] - Server configuration
//! - [`api`] - HTTP API server

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Validation
pub mod validation;

// Transformation
pub mod transform;

// Configuration
pub mod config;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{
    CsvError, CsvResult, PipelineError, PipelineResult, ServerError, ServerResult,
    ValidationError, ValidationResult,
};

pub use models::Matrix;

pub use parser::{parse_csv_bytes, parse_csv_file};

pub use validation::{is_square_matrix, validate_square_matrix};

pub use transform::{
    check_bytes, check_file, operations_description, run_bytes, run_file, run_matrix,
    Operation, UnknownOperation,
};

pub use config::ServerConfig;

pub use api::types::{ApiError, EndpointInfo, HealthResponse};

// Server
pub mod server {
    pub use crate::api::server::{router, start_server};
}
