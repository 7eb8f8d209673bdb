//! Matrix operations exposed over HTTP and the CLI.
//!
//! Each operation turns a validated square matrix into a plain-text body.
//! Rendering lives here so that every entry point formats identically.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Matrix;

/// All available matrix operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Return the matrix unchanged
    Echo,

    /// Transpose rows and columns
    Invert,

    /// All cells on one comma-separated line
    Flatten,

    /// Sum of all cells, fixed-width `i64`
    Sum,

    /// Product of all cells, arbitrary precision
    Multiply,
}

/// Name did not match any [`Operation`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown operation '{0}', expected one of: echo, invert, flatten, sum, multiply")]
pub struct UnknownOperation(pub String);

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Echo,
        Operation::Invert,
        Operation::Flatten,
        Operation::Sum,
        Operation::Multiply,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Echo => "echo",
            Operation::Invert => "invert",
            Operation::Flatten => "flatten",
            Operation::Sum => "sum",
            Operation::Multiply => "multiply",
        }
    }

    /// HTTP route for this operation.
    pub fn path(self) -> &'static str {
        match self {
            Operation::Echo => "/echo",
            Operation::Invert => "/invert",
            Operation::Flatten => "/flatten",
            Operation::Sum => "/sum",
            Operation::Multiply => "/multiply",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            Operation::Echo => "Return the matrix as-is",
            Operation::Invert => "Return the matrix with rows and columns swapped",
            Operation::Flatten => "Return all values on one comma-separated line",
            Operation::Sum => "Return the sum of all values",
            Operation::Multiply => "Return the product of all values (arbitrary precision)",
        }
    }

    /// Apply this operation to a validated matrix.
    ///
    /// The result always ends with a newline. `Sum` and `Multiply` fail on
    /// a cell that is not an `i64`.
    pub fn apply(self, matrix: &Matrix) -> Result<String, ParseIntError> {
        let body = match self {
            Operation::Echo => matrix.to_csv_lines(),
            Operation::Invert => matrix.transpose().to_csv_lines(),
            Operation::Flatten => format!("{}\n", matrix.flatten().join(",")),
            Operation::Sum => format!("{}\n", sum(&matrix.values()?)),
            Operation::Multiply => format!("{}\n", product(&matrix.values()?)),
        };
        Ok(body)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().trim_start_matches('/');
        Operation::ALL
            .into_iter()
            .find(|op| op.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}

/// Wrapping `i64` sum; overflow is not guarded.
fn sum(values: &[i64]) -> i64 {
    values.iter().fold(0i64, |acc, &value| acc.wrapping_add(value))
}

fn product(values: &[i64]) -> BigInt {
    values.iter().fold(BigInt::from(1), |acc, &value| acc * value)
}

/// Get a human-readable description of all operations
pub fn operations_description() -> String {
    let mut out =
        String::from("Available operations (POST multipart/form-data, field `file`):\n\n");
    for op in Operation::ALL {
        out.push_str(&format!("  {:<10} {:<10} {}\n", op.name(), op.path(), op.summary()));
    }
    out
}
