#![allow(dead_code)]

use std::path::PathBuf;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use serde_json::Value;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;

use doc_catalog::config::{AppConfig, DatabaseConfig, ServerConfig, SiteConfig, StorageConfig};
use doc_catalog::db::{connection, migrations};
use doc_catalog::routes;
use doc_catalog::services::storage::StorageService;
use doc_catalog::state::AppState;

const BOUNDARY: &str = "doc-catalog-test-boundary";

/// A router backed by a throwaway SQLite file and upload directory.
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub upload_dir: PathBuf,
    _dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let upload_dir = dir.path().join("uploads");

        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url: format!("sqlite://{}", dir.path().join("catalog.db").display()),
                max_connections: 4,
            },
            storage: StorageConfig {
                upload_dir: upload_dir.display().to_string(),
                public_path: "/uploads".to_string(),
            },
            site: SiteConfig {
                title: "Test Store".to_string(),
            },
        };

        let pool = connection::create_pool(&config.database)
            .await
            .expect("Failed to create pool");
        migrations::run_all(&pool).await.expect("Failed to migrate");
        let storage = StorageService::new(&config.storage)
            .await
            .expect("Failed to prepare storage");

        Self {
            router: routes::router(AppState::new(config, pool.clone(), storage)),
            pool,
            upload_dir,
            _dir: dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible")
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn post_multipart(&self, uri: &str, parts: &[Part]) -> Response<Body> {
        let request = Request::post(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();
        self.send(request).await
    }

    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let response = self.get(uri).await;
        let status = response.status();
        (status, json_body(response).await)
    }

    pub async fn list(&self, query: Option<&str>) -> Vec<Value> {
        let uri = match query {
            Some(q) => format!("/api/documents?q={q}"),
            None => "/api/documents".to_string(),
        };
        let (status, body) = self.get_json(&uri).await;
        assert_eq!(status, StatusCode::OK);
        body.as_array().expect("list returns an array").clone()
    }

    /// Uploads through the JSON API and returns the created document.
    pub async fn upload(&self, title: &str, category: &str, file_name: &str, data: &[u8]) -> Value {
        let response = self
            .post_multipart(
                "/api/documents",
                &[
                    Part::text("title", title),
                    Part::text("category", category),
                    Part::file("file", file_name, "application/pdf", data),
                ],
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["success"], true);
        body["document"].clone()
    }

    pub fn stored_file_count(&self) -> usize {
        std::fs::read_dir(&self.upload_dir)
            .expect("upload dir exists")
            .count()
    }
}

pub struct Part {
    name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    data: Vec<u8>,
}

impl Part {
    pub fn text(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            file_name: None,
            content_type: None,
            data: value.as_bytes().to_vec(),
        }
    }

    pub fn file(name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        Self {
            name: name.to_string(),
            file_name: Some(file_name.to_string()),
            content_type: Some(content_type.to_string()),
            data: data.to_vec(),
        }
    }
}

fn multipart_body(parts: &[Part]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match &part.file_name {
            Some(file_name) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{file_name}\"\r\n",
                    part.name
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n", part.name).as_bytes(),
            ),
        }
        if let Some(content_type) = &part.content_type {
            body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(&part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body")
        .to_vec()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).expect("Body is UTF-8")
}

pub async fn json_body(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).expect("Body is JSON")
}
