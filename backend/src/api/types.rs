//! HTTP response types.
//!
//! Operation results and errors are plain text. Only the health check
//! answers with JSON.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::transform::Operation;

/// Error returned by an operation endpoint.
///
/// Always rendered as `400 Bad Request` with the message as a
/// newline-terminated plain-text body.
#[derive(Debug)]
pub struct ApiError(pub PipelineError);

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, format!("{}\n", self.0)).into_response()
    }
}

/// Health check payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    /// Operation name → `POST <path>`
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointInfo {
    pub operation: String,
    pub route: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            service: "matrixload".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            endpoints: Operation::ALL
                .into_iter()
                .map(|op| EndpointInfo {
                    operation: op.name().to_string(),
                    route: format!("POST {}", op.path()),
                })
                .collect(),
        }
    }
}
