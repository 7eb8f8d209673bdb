//! Transformation module.
//!
//! - Operations: the five matrix transforms and their output formats
//! - Pipeline: the shared ingest → validate → transform driver

pub mod operations;
pub mod pipeline;

pub use operations::{operations_description, Operation, UnknownOperation};
pub use pipeline::*;
