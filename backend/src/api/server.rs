//! HTTP Server for the matrixload API.
//!
//! Every operation endpoint takes a `multipart/form-data` upload with a CSV
//! document in the field `file` and answers with plain text.
//!
//! # API Endpoints
//!
//! | Method | Path        | Description                                  |
//! |--------|-------------|----------------------------------------------|
//! | GET    | `/health`   | Health check                                 |
//! | POST   | `/echo`     | Matrix as uploaded                           |
//! | POST   | `/invert`   | Transposed matrix                            |
//! | POST   | `/flatten`  | All values on one line                       |
//! | POST   | `/sum`      | Sum of all values                            |
//! | POST   | `/multiply` | Product of all values, arbitrary precision   |
//!
//! Status is 200 on success and 400 with the error message otherwise.

use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart},
    http::{header, Method},
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use super::types::{ApiError, HealthResponse};
use crate::config::ServerConfig;
use crate::error::{CsvError, CsvResult, PipelineError, ServerError, ServerResult};
use crate::transform::{run_bytes, Operation};

/// Multipart field carrying the CSV document.
pub const FILE_FIELD: &str = "file";

/// Build the application router.
pub fn router(config: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    let mut app = Router::new()
        .route("/", get(health))
        .route("/health", get(health));

    for op in Operation::ALL {
        app = app.route(
            op.path(),
            post(move |multipart: Result<Multipart, MultipartRejection>| {
                handle_operation(op, multipart)
            }),
        );
    }

    app.layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Start the HTTP server and run until Ctrl-C.
pub async fn start_server(config: ServerConfig) -> ServerResult<()> {
    let addr = config.socket_addr();
    let app = router(&config);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    info!(%addr, "matrixload server listening");
    for op in Operation::ALL {
        info!("   POST {:<10} {}", op.path(), op.summary());
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

/// Health check endpoint
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Shared handler for all operation endpoints
async fn handle_operation(
    op: Operation,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<String, ApiError> {
    let result = match extract_csv_upload(multipart).await {
        Ok(bytes) => {
            info!(operation = %op, bytes = bytes.len(), "upload received");
            run_bytes(op, &bytes)
        }
        Err(e) => Err(PipelineError::from(e)),
    };

    result.map_err(|e| {
        warn!(operation = %op, error = %e, "request rejected");
        ApiError(e)
    })
}

/// Pull the `file` field out of a multipart request.
///
/// The multipart stream is dropped when this returns, on every path.
async fn extract_csv_upload(
    multipart: Result<Multipart, MultipartRejection>,
) -> CsvResult<Bytes> {
    let mut multipart = multipart.map_err(|e| CsvError::Read(e.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| CsvError::Read(e.body_text()))?
    {
        if field.name() == Some(FILE_FIELD) {
            return field.bytes().await.map_err(|e| CsvError::Read(e.body_text()));
        }
    }

    Err(CsvError::Read(format!("missing multipart field `{}`", FILE_FIELD)))
}
