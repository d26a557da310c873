//! Axum route handlers for the analysis API.

use axum::{
    extract::{rejection::JsonRejection, Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::analysis::models::{AnalysisResult, AnalyzeTextRequest};
use crate::analysis::pipeline::{analyze_document, analyze_text};
use crate::errors::AppError;
use crate::extraction::ResumeDocument;
use crate::state::AppState;

const FILE_FIELD: &str = "file";
const JD_FIELD: &str = "jd";

/// POST /analyze-pdf
///
/// Multipart form with a `file` part (the resume PDF) and a `jd` text part.
/// An empty `jd` is accepted and yields no required skills; a missing one is not.
pub async fn handle_analyze_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let mut document: Option<ResumeDocument> = None;
    let mut jd: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            FILE_FIELD => {
                let content_type = field.content_type().map(str::to_string);
                let file_name = field.file_name().map(str::to_string);
                let bytes = field.bytes().await?;
                document = Some(ResumeDocument {
                    bytes,
                    content_type,
                    file_name,
                });
            }
            JD_FIELD => jd = Some(field.text().await?),
            _ => {}
        }
    }

    let document = document.filter(|d| !d.bytes.is_empty()).ok_or_else(|| {
        AppError::Validation("A resume PDF is required in the 'file' field".to_string())
    })?;
    let jd = jd.ok_or_else(|| {
        AppError::Validation("A job description is required in the 'jd' field".to_string())
    })?;

    info!(
        file_name = document.file_name.as_deref().unwrap_or("unnamed"),
        bytes = document.bytes.len(),
        jd_chars = jd.chars().count(),
        "Received resume upload"
    );

    let result = analyze_document(
        state.analysis.clone(),
        document,
        jd,
        state.config.analysis_timeout,
    )
    .await?;

    Ok(Json(result))
}

/// POST /analyze
///
/// JSON `{ "resume": "...", "jd": "..." }` for callers that already have text.
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeTextRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, AppError> {
    let Json(request) = payload.map_err(json_rejection)?;

    let resume = request
        .resume
        .ok_or_else(|| AppError::Validation("resume cannot be missing".to_string()))?;
    let jd = request
        .jd
        .ok_or_else(|| AppError::Validation("jd cannot be missing".to_string()))?;

    let result = analyze_text(
        state.analysis.clone(),
        resume,
        jd,
        state.config.analysis_timeout,
    )
    .await?;

    Ok(Json(result))
}

/// Keeps the rejection's status class: body-limit and content-type failures are
/// not validation errors.
fn json_rejection(rejection: JsonRejection) -> AppError {
    match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge,
        StatusCode::UNSUPPORTED_MEDIA_TYPE => AppError::UnsupportedMedia(rejection.body_text()),
        _ => AppError::Validation(rejection.body_text()),
    }
}
