//! Label sheet PDF generation API.

use axum::Json;
use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use serde::Deserialize;
use serde_json::{Value, json};

use super::err_json;
use crate::app::SharedState;
use crate::services::labels::{self, SheetError};

type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

#[derive(Debug, Deserialize)]
pub struct SheetQuery {
    /// Requested label count; clamped to the configured per-sheet maximum.
    pub count: Option<usize>,
}

/// GET /api/labels/sheet
///
/// Responds with the finished PDF. The body is fully materialized before the
/// response is built, so Content-Length is always exact.
pub async fn generate_sheet(
    State(state): State<SharedState>,
    Query(query): Query<SheetQuery>,
) -> Result<axum::response::Response, (StatusCode, Json<Value>)> {
    let (base_url, cap) = {
        let config = state.config().await;
        (config.public_base_url.clone(), config.max_labels_per_sheet)
    };
    let max_labels = query.count.unwrap_or(cap).min(cap);
    if max_labels == 0 {
        return Err(err_json(400, "count must be at least 1"));
    }

    let outcome = match labels::generate_sheet(state.db(), &base_url, max_labels) {
        Ok(outcome) => outcome,
        Err(SheetError::NoLabels) => return Err(err_json(404, "no labels to print")),
        Err(e) => {
            tracing::error!("Label sheet generation failed: {e}");
            return Err(err_json(500, "could not generate labels"));
        }
    };

    let resp = axum::response::Response::builder()
        .header(header::CONTENT_TYPE, sheet_pdf::PDF_MIME)
        .header(header::CONTENT_LENGTH, outcome.pdf.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", outcome.filename),
        )
        .body(Body::from(outcome.pdf))
        .map_err(|e| err_json(500, &e.to_string()))?;
    Ok(resp)
}

/// GET /api/labels/jobs
pub async fn list_jobs(State(state): State<SharedState>) -> ApiResult {
    let jobs = state
        .db()
        .print_jobs()
        .map_err(|e| err_json(500, &e.to_string()))?;
    let count = jobs.len();
    Ok(Json(json!({ "jobs": jobs, "count": count })))
}
