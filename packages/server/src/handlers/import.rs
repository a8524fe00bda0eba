use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::{instrument, warn};

use crate::error::{AppError, ErrorBody};
use crate::models::import::{ImportResponse, ImportSummary};
use crate::services::cleanup::CleanupService;
use crate::services::import::ImportService;
use crate::state::AppState;

/// The three question documents shipped with the data directory.
const IMPORT_SOURCES: [&str; 3] = ["lotin", "rus", "crill"];

async fn import_source(state: &AppState, source: &str) -> Result<ImportSummary, AppError> {
    let path = state.config.import.data_dir.join(format!("{source}.json"));
    ImportService::new(&state.db).import_file(&path).await
}

fn import_response(source: &str, summary: ImportSummary) -> Json<ImportResponse> {
    Json(ImportResponse {
        message: format!("{source} questions imported"),
        summary,
    })
}

#[utoipa::path(
    post,
    path = "/import/lotin",
    tag = "Import",
    operation_id = "importLotin",
    summary = "Import questions from lotin.json",
    responses(
        (status = 201, description = "Import finished", body = ImportResponse),
        (status = 400, description = "Malformed document (VALIDATION_ERROR)", body = ErrorBody),
        (status = 500, description = "Document unreadable (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn import_lotin(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let summary = import_source(&state, "lotin").await?;
    Ok((StatusCode::CREATED, import_response("lotin", summary)))
}

#[utoipa::path(
    post,
    path = "/import/rus",
    tag = "Import",
    operation_id = "importRus",
    summary = "Import questions from rus.json",
    responses(
        (status = 201, description = "Import finished", body = ImportResponse),
        (status = 400, description = "Malformed document (VALIDATION_ERROR)", body = ErrorBody),
        (status = 500, description = "Document unreadable (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn import_rus(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let summary = import_source(&state, "rus").await?;
    Ok((StatusCode::CREATED, import_response("rus", summary)))
}

#[utoipa::path(
    post,
    path = "/import/crill",
    tag = "Import",
    operation_id = "importCrill",
    summary = "Import questions from crill.json",
    responses(
        (status = 201, description = "Import finished", body = ImportResponse),
        (status = 400, description = "Malformed document (VALIDATION_ERROR)", body = ErrorBody),
        (status = 500, description = "Document unreadable (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn import_crill(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let summary = import_source(&state, "crill").await?;
    Ok((StatusCode::CREATED, import_response("crill", summary)))
}

#[utoipa::path(
    post,
    path = "/import/all",
    tag = "Import",
    operation_id = "importAll",
    summary = "Import every question document",
    description = "Runs the three imports best-effort; a file that fails to load is logged \
        and skipped, the others still run. Counts are aggregated.",
    responses(
        (status = 201, description = "Imports finished", body = ImportResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn import_all(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let mut combined = ImportSummary::default();
    for source in IMPORT_SOURCES {
        match import_source(&state, source).await {
            Ok(summary) => combined.absorb(&summary),
            Err(e) => warn!(source, error = ?e, "import source failed"),
        }
    }

    Ok((StatusCode::CREATED, import_response("all", combined)))
}

#[utoipa::path(
    delete,
    path = "/cleanup",
    tag = "Import",
    operation_id = "cleanupQuestionBank",
    summary = "Purge the whole question bank",
    description = "Truncates every question-bank table in dependency order and resets \
        identity sequences. Safe to call on an empty store.",
    responses(
        (status = 204, description = "Question bank purged"),
        (status = 500, description = "Internal error (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn cleanup(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    CleanupService::new(&state.db).purge_all().await?;
    Ok(StatusCode::NO_CONTENT)
}
