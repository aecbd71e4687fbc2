pub mod documents;
pub mod health;
pub mod pages;

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let pages = Router::new()
        .route("/", get(pages::index))
        .route("/admin", get(pages::admin_form).post(pages::admin_upload));

    let api = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/documents", get(documents::list).post(documents::upload))
        .route("/api/documents/{id}", get(documents::get_document));

    let files = ServeDir::new(state.storage.upload_dir());

    let app = Router::new()
        .merge(pages)
        .merge(api)
        .nest_service(state.storage.public_path(), files);

    #[cfg(feature = "openapi")]
    let app = {
        use utoipa::OpenApi;
        use utoipa_redoc::{Redoc, Servable};
        app.merge(Redoc::with_url("/api/docs", crate::openapi::ApiDoc::openapi()))
    };

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .layer(DefaultBodyLimit::disable()),
    )
    .with_state(state)
}
