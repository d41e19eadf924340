//! Axum route handlers for the CV analysis API.

use axum::{
    extract::{Multipart, Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::analysis::render::render_markdown;
use crate::analysis::{analyze, current_year, AnalysisResult, MIN_TEXT_CHARS};
use crate::errors::AppError;
use crate::export::{build_docx, export_filename, DOCX_CONTENT_TYPE};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Parsed multipart upload: the document plus an optional session to overwrite.
#[derive(Debug)]
pub struct Upload {
    pub file: Bytes,
    pub session_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub text: String,
    pub char_count: usize,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub session_id: Uuid,
    pub analysis: AnalysisResult,
    pub markdown: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/cv/extract
///
/// Returns the extracted text so the client can preview it before analysing.
pub async fn handle_extract(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ExtractResponse>, AppError> {
    let upload = read_upload(multipart).await?;
    let text = extract_blocking(&state, upload.file).await?;
    let char_count = text.chars().count();
    debug!("Extracted {char_count} characters");

    Ok(Json(ExtractResponse { text, char_count }))
}

/// POST /api/v1/cv/analyze
///
/// Extract → length check → classify → synthesize. The result replaces
/// whatever the session held before.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let upload = read_upload(multipart).await?;
    let text = extract_blocking(&state, upload.file).await?;

    let chars = text.chars().count();
    if chars < MIN_TEXT_CHARS {
        return Err(AppError::InputTooShort { chars });
    }

    let analysis = analyze(&text, &state.config.profile, current_year());
    let session_id = upload.session_id.unwrap_or_else(Uuid::new_v4);
    let markdown = render_markdown(&analysis);

    let replaced = state.sessions.put(session_id, analysis.clone(), text);
    info!(
        %session_id,
        replaced,
        categories = analysis.tech.len(),
        experience_years = analysis.experience_years_est,
        "Analysis stored ({} active sessions)",
        state.sessions.len()
    );

    Ok(Json(AnalyzeResponse {
        session_id,
        analysis,
        markdown,
    }))
}

/// GET /api/v1/cv/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<AnalysisResult>, AppError> {
    let entry = state
        .sessions
        .get(session_id)
        .ok_or_else(|| no_analysis(session_id))?;
    Ok(Json(entry.analysis))
}

/// GET /api/v1/cv/sessions/:id/export
///
/// Streams the .docx review as an attachment named after the configured display name.
pub async fn handle_export(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let entry = state
        .sessions
        .get(session_id)
        .ok_or_else(|| no_analysis(session_id))?;

    let profile = state.config.profile.clone();
    let filename = export_filename(&profile.display_name).replace('"', "");
    let analyzed_at = entry.analyzed_at;

    // DOCX packing is CPU-bound; keep it off the async workers.
    let docx = tokio::task::spawn_blocking(move || {
        build_docx(&entry.analysis, &entry.raw_text, &profile)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in export: {e}")))??;

    let disposition =
        HeaderValue::from_bytes(format!("attachment; filename=\"{filename}\"").as_bytes())
            .map_err(|e| AppError::Internal(anyhow::anyhow!("invalid export filename: {e}")))?;

    info!(
        %session_id,
        analyzed_at = %analyzed_at,
        bytes = docx.len(),
        "Exported review document"
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(DOCX_CONTENT_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        docx,
    )
        .into_response())
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Runs the configured extractor on a blocking thread; PDF parsing is CPU-bound.
async fn extract_blocking(state: &AppState, file: Bytes) -> Result<String, AppError> {
    let extractor = state.extractor.clone();
    let text = tokio::task::spawn_blocking(move || extractor.extract_text(&file))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("spawn_blocking failed in extraction: {e}"))
        })??;
    Ok(text)
}

fn no_analysis(session_id: Uuid) -> AppError {
    AppError::NotFound(format!(
        "No analysis for session {session_id}; run an analysis first"
    ))
}

/// Reads the `file` field (required) and `session_id` field (optional).
/// Unknown fields are ignored.
async fn read_upload(mut multipart: Multipart) -> Result<Upload, AppError> {
    let mut file = None;
    let mut session_id = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
                file = Some(bytes);
            }
            "session_id" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read session_id: {e}")))?;
                let raw = raw.trim();
                if !raw.is_empty() {
                    let id = Uuid::parse_str(raw).map_err(|_| {
                        AppError::Validation(format!("session_id '{raw}' is not a valid UUID"))
                    })?;
                    session_id = Some(id);
                }
            }
            _ => {}
        }
    }

    // An empty file is left to the extractor, which reports it as unreadable.
    let file = file.ok_or_else(|| AppError::Validation("missing 'file' upload field".to_string()))?;

    Ok(Upload { file, session_id })
}
