//! HTTP API module.
//!
//! This module provides the HTTP server and response types.

pub mod server;
pub mod types;

pub use server::{router, start_server};
pub use types::*;
