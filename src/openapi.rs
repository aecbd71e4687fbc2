use utoipa::OpenApi;

use crate::dto::document::{DocumentResponse, UploadResponse};
use crate::errors::ErrorResponse;
use crate::routes::health::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Document Catalog API",
        version = "0.1.0",
        description = "Upload documents with metadata and search the catalog."
    ),
    paths(
        crate::routes::health::health_check,
        crate::routes::documents::upload,
        crate::routes::documents::list,
        crate::routes::documents::get_document,
    ),
    components(
        schemas(
            DocumentResponse, UploadResponse, HealthResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check"),
        (name = "Documents", description = "Document upload and search"),
    )
)]
pub struct ApiDoc;
