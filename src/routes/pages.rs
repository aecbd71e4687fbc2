use std::sync::Arc;

use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    response::Html,
};

use crate::dto::document::{SearchQuery, UploadForm};
use crate::errors::AppError;
use crate::services::listing_cache::Lookup;
use crate::services::upload::upload_document;
use crate::state::AppState;
use crate::views::admin::{render_upload_form, FormValues, UploadStatus};
use crate::views::catalog::render_listing;

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Html<String>, AppError> {
    let site_title = &state.config.site.title;

    if let Some(q) = query.q.as_deref().filter(|q| !q.is_empty()) {
        let docs = state.document_repo.list(Some(q)).await?;
        return Ok(Html(render_listing(site_title, Some(q), &docs)));
    }

    let generation = match state.listing_cache.get().await {
        Lookup::Hit(page) => return Ok(Html(page.to_string())),
        Lookup::Miss { generation } => generation,
    };

    let docs = state.document_repo.list(None).await?;
    let page: Arc<str> = render_listing(site_title, None, &docs).into();
    state.listing_cache.store(generation, page.clone()).await;

    Ok(Html(page.to_string()))
}

pub async fn admin_form(State(state): State<AppState>) -> Html<String> {
    Html(render_upload_form(
        &state.config.site.title,
        &FormValues::default(),
        None,
    ))
}

/// Form submission from the admin page. The outcome is reported only as
/// "successful" or "failed"; the cause goes to the log.
pub async fn admin_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> (StatusCode, Html<String>) {
    let site_title = &state.config.site.title;

    let form = match UploadForm::from_multipart(&mut multipart).await {
        Ok(form) => form,
        Err(e) => {
            tracing::warn!("Admin upload rejected: {e}");
            let html = render_upload_form(site_title, &FormValues::default(), Some(UploadStatus::Failure));
            return (e.status(), Html(html));
        }
    };

    let values = FormValues {
        title: form.title.clone().unwrap_or_default(),
        description: form.description.clone().unwrap_or_default(),
        category: form.category.clone().unwrap_or_default(),
    };

    match upload_document(&state, form).await {
        Ok(_) => {
            let html = render_upload_form(site_title, &FormValues::default(), Some(UploadStatus::Success));
            (StatusCode::OK, Html(html))
        }
        Err(e) => {
            let status = e.status();
            match &e {
                AppError::Internal(err) => tracing::error!("Admin upload failed: {err:#}"),
                other => tracing::warn!("Admin upload rejected: {other}"),
            }
            let html = render_upload_form(site_title, &values, Some(UploadStatus::Failure));
            (status, Html(html))
        }
    }
}
