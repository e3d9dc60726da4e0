//! Route handlers for the asset HTTP boundary.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tokio_util::io::ReaderStream;
use tracing::{error, info, warn};

use crate::archive::CanonicalRole;
use crate::error::ServeError;
use crate::fetch::HttpClient;
use crate::service::AssetService;
use crate::status::StatusReport;

/// Shared state handed to every handler.
pub type SharedService<C> = Arc<AssetService<C>>;

/// Build the router for the three boundary operations.
pub fn router<C: HttpClient + 'static>(service: SharedService<C>) -> Router {
    Router::new()
        .route("/doom/status", get(status_handler::<C>))
        .route("/doom/download", post(download_handler::<C>))
        .route("/doom/files/:filename", get(file_handler::<C>))
        .with_state(service)
}

/// JSON body of `GET /doom/status`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusBody {
    has_exe: bool,
    has_wad: bool,
    has_setup: bool,
    doom_dir: String,
    files: BTreeMap<&'static str, bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<StatusReport> for StatusBody {
    fn from(report: StatusReport) -> Self {
        Self {
            has_exe: report.has(CanonicalRole::PrimaryExecutable),
            has_wad: report.has(CanonicalRole::PrimaryData),
            has_setup: report.has(CanonicalRole::AuxiliarySetup),
            doom_dir: report.directory.display().to_string(),
            files: report.files(),
            error: report.error,
        }
    }
}

/// GET /doom/status
async fn status_handler<C: HttpClient + 'static>(
    State(service): State<SharedService<C>>,
) -> Json<StatusBody> {
    Json(StatusBody::from(service.status()))
}

/// POST /doom/download
async fn download_handler<C: HttpClient + 'static>(
    State(service): State<SharedService<C>>,
) -> Response {
    let result = service.download().await;
    let status = if result.success {
        info!(files = ?result.files, "Download request succeeded");
        StatusCode::OK
    } else {
        warn!(error = ?result.error, "Download request failed");
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(result)).into_response()
}

/// GET /doom/files/:filename
async fn file_handler<C: HttpClient + 'static>(
    State(service): State<SharedService<C>>,
    Path(filename): Path<String>,
) -> Response {
    match service.open_file(&filename).await {
        Ok(served) => {
            info!(file = %served.name, bytes = served.len, "Serving file");
            let body = Body::from_stream(ReaderStream::new(served.file));
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "application/octet-stream".to_string()),
                    (header::CONTENT_LENGTH, served.len.to_string()),
                ],
                body,
            )
                .into_response()
        }
        Err(e) => serve_error_response(&filename, e),
    }
}

fn serve_error_response(filename: &str, e: ServeError) -> Response {
    let status = match e {
        ServeError::Forbidden => StatusCode::FORBIDDEN,
        ServeError::NotFound => StatusCode::NOT_FOUND,
        ServeError::Io(ref io) => {
            error!(file = filename, error = %io, "Failed to open file");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, e.to_string()).into_response()
}
