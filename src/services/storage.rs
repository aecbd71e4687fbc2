use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use rand::Rng;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::config::StorageConfig;

/// A file written by [`StorageService::store`].
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Name of the file inside the upload directory.
    pub stored_name: String,
    /// Browser-facing path, e.g. `/uploads/1718000000000-42-report.pdf`.
    pub url: String,
    pub size_bytes: u64,
}

#[derive(Clone)]
pub struct StorageService {
    upload_dir: PathBuf,
    public_path: String,
}

impl StorageService {
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        let public_path = config.public_path.trim_end_matches('/');
        if !public_path.starts_with('/') {
            bail!(
                "storage.public_path must start with '/' and name a directory, got {:?}",
                config.public_path
            );
        }

        let upload_dir = PathBuf::from(&config.upload_dir);
        tokio::fs::create_dir_all(&upload_dir)
            .await
            .with_context(|| format!("Failed to create upload directory {upload_dir:?}"))?;

        Ok(Self {
            upload_dir,
            public_path: public_path.to_string(),
        })
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn public_path(&self) -> &str {
        &self.public_path
    }

    /// Writes `data` under a fresh name derived from `original_name`.
    ///
    /// Existing files are never replaced: the file is opened with create-new
    /// semantics, so a name collision surfaces as an error.
    pub async fn store(&self, original_name: &str, data: &[u8]) -> Result<StoredFile> {
        let stored_name = Self::generate_name(original_name);
        let path = self.upload_dir.join(&stored_name);

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .with_context(|| format!("Failed to create {path:?}"))?;
        file.write_all(data)
            .await
            .with_context(|| format!("Failed to write {path:?}"))?;
        file.flush().await.context("Failed to flush upload")?;

        tracing::debug!(stored_name = %stored_name, size = data.len(), "Stored upload");

        Ok(StoredFile {
            url: format!("{}/{stored_name}", self.public_path),
            stored_name,
            size_bytes: data.len() as u64,
        })
    }

    /// `{unix millis}-{random}-{sanitized original name}`.
    pub fn generate_name(original_name: &str) -> String {
        let millis = chrono::Utc::now().timestamp_millis();
        let nonce: u32 = rand::rng().random_range(0..=1_000_000_000);
        format!("{millis}-{nonce}-{}", sanitize_filename(original_name))
    }
}

/// Replaces every character outside `[A-Za-z0-9.-]` with `_`.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
