// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Document routes: multipart upload, metadata edits and download.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{DocumentInput, DocumentType, JobDocument};
use crate::services::storage::sanitize_file_name;
use crate::services::{DocumentQuery, Upload};
use crate::AppState;
use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;
use std::sync::Arc;

/// Document routes; uploads are capped at `max_upload_bytes`.
pub fn routes(max_upload_bytes: usize) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/jobs/documents/",
            get(list_documents)
                .post(create_document)
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route(
            "/api/jobs/documents/{id}/",
            get(get_document)
                .put(put_document)
                .patch(patch_document)
                .delete(delete_document),
        )
        .route("/api/jobs/documents/{id}/download/", get(download_document))
}

async fn list_documents(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Query(query), _): WithRejection<Query<DocumentQuery>, AppError>,
) -> Result<Json<Vec<JobDocument>>> {
    Ok(Json(state.documents.list(&user, &query).await?))
}

/// Upload a document. Fields: `file`, `job` (application ID), `doc_types`.
async fn create_document(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(multipart, _): WithRejection<Multipart, AppError>,
) -> Result<(StatusCode, Json<JobDocument>)> {
    let upload = read_upload(multipart).await?;
    let document = state.documents.create(&user, upload).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload> {
    let mut job = None;
    let mut doc_types = None;
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read file: {}", e)))?;
                file = Some((file_name, bytes.to_vec()));
            }
            "job" => {
                let text = field_text(field).await?;
                job = Some(text.trim().parse::<u64>().map_err(|_| {
                    AppError::Validation(format!("Invalid application ID: {}", text))
                })?);
            }
            "doc_types" => {
                let text = field_text(field).await?;
                doc_types = Some(text.parse::<DocumentType>().map_err(AppError::Validation)?);
            }
            other => tracing::debug!(field = other, "Ignoring unknown multipart field"),
        }
    }

    let (file_name, bytes) =
        file.ok_or_else(|| AppError::Validation("No file was submitted".to_string()))?;

    Ok(Upload {
        job: job.ok_or_else(|| AppError::Validation("job is required".to_string()))?,
        doc_types: doc_types
            .ok_or_else(|| AppError::Validation("doc_types is required".to_string()))?,
        file_name,
        bytes,
    })
}

async fn field_text(field: axum::extract::multipart::Field<'_>) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart field: {}", e)))
}

async fn get_document(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Path(id), _): WithRejection<Path<u64>, AppError>,
) -> Result<Json<JobDocument>> {
    Ok(Json(state.documents.get(&user, id).await?))
}

async fn put_document(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Path(id), _): WithRejection<Path<u64>, AppError>,
    WithRejection(Json(input), _): WithRejection<Json<DocumentInput>, AppError>,
) -> Result<Json<JobDocument>> {
    Ok(Json(state.documents.update(&user, id, input).await?))
}

async fn patch_document(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Path(id), _): WithRejection<Path<u64>, AppError>,
    WithRejection(Json(patch), _): WithRejection<Json<serde_json::Value>, AppError>,
) -> Result<Json<JobDocument>> {
    Ok(Json(state.documents.patch(&user, id, patch).await?))
}

async fn delete_document(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Path(id), _): WithRejection<Path<u64>, AppError>,
) -> Result<StatusCode> {
    state.documents.delete(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn download_document(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Path(id), _): WithRejection<Path<u64>, AppError>,
) -> Result<Response> {
    let (document, bytes) = state.documents.download(&user, id).await?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        sanitize_file_name(&document.file_name)
    );
    Ok((
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
