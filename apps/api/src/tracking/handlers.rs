//! Axum route handlers for the application-tracking API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::state::AppState;
use crate::tracking::models::{
    ApplicationRecord, ApplicationStatus, ExportDocument, ImportMode, ImportSummary,
    NewApplication, EXPORT_FORMAT_VERSION,
};

#[derive(Debug, Deserialize)]
pub struct UpdateApplicationRequest {
    pub status: Option<ApplicationStatus>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ImportQuery {
    pub mode: ImportMode,
}

/// GET /api/v1/applications
pub async fn handle_list(
    State(state): State<AppState>,
) -> Result<Json<Vec<ApplicationRecord>>, AppError> {
    Ok(Json(state.store.list().await))
}

/// POST /api/v1/applications
pub async fn handle_create(
    State(state): State<AppState>,
    Json(request): Json<NewApplication>,
) -> Result<(StatusCode, Json<ApplicationRecord>), AppError> {
    if request.company.trim().is_empty() || request.role.trim().is_empty() {
        return Err(AppError::Validation(
            "company and role cannot be empty".to_string(),
        ));
    }
    let record = state.store.insert(request).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// PATCH /api/v1/applications/:id
pub async fn handle_update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(request): Json<UpdateApplicationRequest>,
) -> Result<Json<ApplicationRecord>, AppError> {
    let updated = state
        .store
        .update(id, request.status, request.notes)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;
    Ok(Json(updated))
}

/// DELETE /api/v1/applications/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    if !state.store.remove(id).await? {
        return Err(AppError::NotFound(format!("Application {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/applications/export
pub async fn handle_export(
    State(state): State<AppState>,
) -> Result<Json<ExportDocument>, AppError> {
    Ok(Json(state.store.export().await))
}

/// POST /api/v1/applications/import?mode=merge|overwrite
pub async fn handle_import(
    State(state): State<AppState>,
    Query(query): Query<ImportQuery>,
    Json(doc): Json<ExportDocument>,
) -> Result<Json<ImportSummary>, AppError> {
    if doc.format_version != EXPORT_FORMAT_VERSION {
        return Err(AppError::Validation(format!(
            "unsupported export format version {} (expected {EXPORT_FORMAT_VERSION})",
            doc.format_version
        )));
    }
    let summary = state.store.import(doc, query.mode).await?;
    Ok(Json(summary))
}
