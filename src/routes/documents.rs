use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::dto::document::{DocumentResponse, SearchQuery, UploadForm, UploadResponse};
use crate::errors::AppError;
use crate::services::upload::upload_document;
use crate::state::AppState;

#[cfg_attr(feature = "openapi", utoipa::path(post, path = "/api/documents", tag = "Documents", request_body(content_type = "multipart/form-data", description = "Fields: file (required), title (required), description, category"), responses((status = 201, body = UploadResponse), (status = 400, body = crate::errors::ErrorResponse))))]
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    let form = UploadForm::from_multipart(&mut multipart).await?;
    let doc = upload_document(&state, form).await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            success: true,
            document: doc.into(),
        }),
    ))
}

#[cfg_attr(feature = "openapi", utoipa::path(get, path = "/api/documents", tag = "Documents", params(SearchQuery), responses((status = 200, body = Vec<DocumentResponse>))))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<DocumentResponse>>, AppError> {
    let docs = state.document_repo.list(query.q.as_deref()).await?;
    Ok(Json(docs.into_iter().map(|d| d.into()).collect()))
}

#[cfg_attr(feature = "openapi", utoipa::path(get, path = "/api/documents/{id}", tag = "Documents", params(("id" = String, Path, description = "Document ID")), responses((status = 200, body = DocumentResponse), (status = 404, body = crate::errors::ErrorResponse))))]
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DocumentResponse>, AppError> {
    let doc = state
        .document_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;

    Ok(Json(doc.into()))
}
