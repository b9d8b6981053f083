use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::services::PdfConverter;

/// Request body for PDF generation
#[derive(Debug, Deserialize, ToSchema)]
pub struct ConvertRequest {
    /// Complete HTML document to render. Relative URLs are not resolved.
    pub html: String,
}

/// Error body returned by every failing request
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable failure description
    pub error: String,
}

/// Render HTML to PDF
///
/// Renders the submitted markup in headless Chrome on A4 paper with 20mm
/// margins and returns the document as an attachment named
/// `project_review_<YYYYMMDD_HHMMSS>.pdf`.
#[utoipa::path(
    post,
    path = "/generate-pdf",
    request_body = ConvertRequest,
    responses(
        (status = 200, description = "Rendered PDF attachment", content_type = "application/pdf", body = Vec<u8>),
        (status = 400, description = "Missing or invalid `html` field", body = ErrorResponse),
        (status = 500, description = "Rendering or storage failure", body = ErrorResponse),
        (status = 504, description = "Rendering timed out", body = ErrorResponse),
    ),
    tag = "Conversion"
)]
pub async fn handle_generate_pdf(
    State(converter): State<Arc<PdfConverter>>,
    payload: Result<Json<ConvertRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;

    let pdf = converter.convert(request.html).await?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", pdf.download_name),
        ),
        (header::CACHE_CONTROL, "no-store".to_string()),
    ];

    Ok((headers, pdf.bytes).into_response())
}
