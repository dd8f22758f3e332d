//! Résumé upload endpoint: stores the upload in a temp file for the duration
//! of the request and runs the analysis pipeline over it.

use std::io::Write;

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::ApiError;
use crate::models::AnalysisOutcome;
use crate::pipeline::analyze_resume;
use crate::scoring::ScoringWeights;
use crate::state::AppState;

/// Largest accepted résumé upload.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

const WORD_CONTENT_TYPES: &[&str] = &[
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub message: String,
    pub analysis_result: AnalysisOutcome,
}

struct Upload {
    file_name: Option<String>,
    content_type: Option<String>,
    data: Bytes,
}

/// POST /api/v1/resumes/analyze
///
/// Multipart fields: `resume` (file), `jobDescription` (text), optional
/// `weights` (JSON). Pipeline failures still return 200 with the error
/// payload as `analysisResult`; only request problems are HTTP errors.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let request_id = Uuid::new_v4();

    let mut upload: Option<Upload> = None;
    let mut job_description: Option<String> = None;
    let mut weights = ScoringWeights::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        match field.name() {
            Some("resume") => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(multipart_error)?;
                upload = Some(Upload {
                    file_name,
                    content_type,
                    data,
                });
            }
            Some("jobDescription") => {
                job_description = Some(field.text().await.map_err(multipart_error)?);
            }
            Some("weights") => {
                let raw = field.text().await.map_err(multipart_error)?;
                if !raw.trim().is_empty() {
                    weights = ScoringWeights::from_json(&raw)
                        .map_err(|e| ApiError::Validation(e.to_string()))?;
                }
            }
            _ => {}
        }
    }

    let job_description = job_description
        .filter(|jd| !jd.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("Job description is required.".to_string()))?;
    let upload =
        upload.ok_or_else(|| ApiError::Validation("Resume file is required.".to_string()))?;

    if upload.data.len() > MAX_UPLOAD_BYTES {
        return Err(ApiError::PayloadTooLarge);
    }
    let suffix = upload_suffix(upload.content_type.as_deref(), upload.file_name.as_deref())?;

    let mut file = tempfile::Builder::new()
        .prefix("resume-")
        .suffix(suffix)
        .tempfile()
        .map_err(|e| ApiError::Internal(e.into()))?;
    file.write_all(&upload.data)
        .map_err(|e| ApiError::Internal(e.into()))?;

    info!(
        %request_id,
        bytes = upload.data.len(),
        file_name = upload.file_name.as_deref().unwrap_or("<unnamed>"),
        "analyzing uploaded resume"
    );
    let outcome = analyze_resume(&state.toolkit, file.path(), &job_description, &weights).await;

    let message = if outcome.is_error() {
        warn!(%request_id, "analysis returned an error payload");
        "Resume uploaded but analysis failed."
    } else {
        "Resume uploaded and analyzed successfully!"
    };

    Ok(Json(AnalyzeResponse {
        message: message.to_string(),
        analysis_result: outcome,
    }))
}

/// Temp-file suffix for an upload, chosen from the declared content type and
/// falling back to the file extension for generic types.
fn upload_suffix(
    content_type: Option<&str>,
    file_name: Option<&str>,
) -> Result<&'static str, ApiError> {
    let content_type = content_type.map(|ct| {
        ct.split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
    });

    if let Some(ct) = content_type.as_deref() {
        if WORD_CONTENT_TYPES.contains(&ct) {
            return Err(ApiError::UnsupportedMediaType(
                "Word documents are not supported; upload a PDF or plain-text resume.".to_string(),
            ));
        }
        match ct {
            "application/pdf" => return Ok(".pdf"),
            "text/plain" => return Ok(".txt"),
            "text/markdown" => return Ok(".md"),
            "application/octet-stream" => {}
            _ => return Err(invalid_file_type()),
        }
    }

    let extension = file_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("pdf") => Ok(".pdf"),
        Some("txt") | Some("text") => Ok(".txt"),
        Some("md") => Ok(".md"),
        _ => Err(invalid_file_type()),
    }
}

fn invalid_file_type() -> ApiError {
    ApiError::UnsupportedMediaType(
        "Invalid file type. Only PDF and plain-text documents are allowed.".to_string(),
    )
}

fn multipart_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge
    } else {
        ApiError::Upload(e.body_text())
    }
}
