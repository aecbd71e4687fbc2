use anyhow::Context;

use crate::db::models::document::{Document, NewDocument};
use crate::dto::document::UploadForm;
use crate::errors::AppError;
use crate::state::AppState;

/// Stores the file, records its metadata and drops the cached listing.
///
/// Validation happens before anything touches disk. A database failure after
/// the file write leaves the file in place with no catalog row.
pub async fn upload_document(state: &AppState, form: UploadForm) -> Result<Document, AppError> {
    let file = form
        .file
        .ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;

    let title = form
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Validation("Title is required".to_string()))?;

    let stored = state.storage.store(&file.file_name, &file.data).await?;

    let doc = state
        .document_repo
        .create(&NewDocument {
            title,
            description: non_empty(form.description),
            file_url: stored.url,
            file_name: file.file_name,
            file_type: file.content_type,
            category: non_empty(form.category),
            size_bytes: stored.size_bytes as i64,
        })
        .await
        .with_context(|| format!("Stored file {} has no catalog row", stored.stored_name))?;

    state.listing_cache.invalidate().await;

    tracing::info!(
        document_id = %doc.id,
        stored_name = %stored.stored_name,
        size = doc.size_bytes,
        "Document uploaded"
    );

    Ok(doc)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
