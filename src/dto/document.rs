use axum::body::Bytes;
use axum::extract::Multipart;
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use crate::db::models::document::Document;
use crate::errors::AppError;

#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct DocumentResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub file_url: String,
    pub file_name: String,
    pub file_type: String,
    pub category: Option<String>,
    pub size_bytes: i64,
    pub uploaded_at: String,
}

impl From<Document> for DocumentResponse {
    fn from(doc: Document) -> Self {
        Self {
            id: doc.id,
            title: doc.title,
            description: doc.description,
            file_url: doc.file_url,
            file_name: doc.file_name,
            file_type: doc.file_type,
            category: doc.category,
            size_bytes: doc.size_bytes,
            uploaded_at: doc.uploaded_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UploadResponse {
    pub success: bool,
    pub document: DocumentResponse,
}

#[derive(Debug, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct SearchQuery {
    /// Substring matched against title, description and category.
    pub q: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

/// The fields of an upload submission, as sent by the client.
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub file: Option<UploadedFile>,
}

impl UploadForm {
    pub async fn from_multipart(multipart: &mut Multipart) -> Result<Self, AppError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid multipart data: {e}")))?
        {
            match field.name() {
                Some("file") => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let content_type = field
                        .content_type()
                        .filter(|ct| !ct.is_empty())
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;

                    // Browsers send an empty, unnamed part when no file was picked.
                    if !file_name.is_empty() {
                        form.file = Some(UploadedFile {
                            file_name,
                            content_type,
                            data,
                        });
                    }
                }
                Some(name @ ("title" | "description" | "category")) => {
                    let name = name.to_string();
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(format!("Failed to read {name}: {e}")))?;
                    let slot = match name.as_str() {
                        "title" => &mut form.title,
                        "description" => &mut form.description,
                        _ => &mut form.category,
                    };
                    *slot = Some(text);
                }
                _ => {} // Ignore unknown fields.
            }
        }

        Ok(form)
    }
}
