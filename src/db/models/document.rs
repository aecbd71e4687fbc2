use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub file_url: String,
    pub file_name: String,
    pub file_type: String,
    pub category: Option<String>,
    pub size_bytes: i64,
    pub uploaded_at: DateTime<Utc>,
}

/// Metadata for a file that has already been written to storage.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub title: String,
    pub description: Option<String>,
    pub file_url: String,
    pub file_name: String,
    pub file_type: String,
    pub category: Option<String>,
    pub size_bytes: i64,
}

const SELECT_COLUMNS: &str = "SELECT id, title, description, file_url, file_name, file_type,
        category, size_bytes, uploaded_at
 FROM documents";

#[derive(Clone)]
pub struct DocumentRepository {
    pool: SqlitePool,
}

impl DocumentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: &NewDocument) -> Result<Document> {
        let id = Uuid::new_v4().to_string();
        // Stored with microsecond precision; return exactly what was saved.
        let now = Utc::now().trunc_subsecs(6);

        sqlx::query(
            "INSERT INTO documents
                 (id, title, description, file_url, file_name, file_type, category, size_bytes, uploaded_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .bind(&id)
        .bind(&new.title)
        .bind(&new.description)
        .bind(&new.file_url)
        .bind(&new.file_name)
        .bind(&new.file_type)
        .bind(&new.category)
        .bind(new.size_bytes)
        .bind(format_timestamp(&now))
        .execute(&self.pool)
        .await
        .context("Failed to insert document")?;

        Ok(Document {
            id,
            title: new.title.clone(),
            description: new.description.clone(),
            file_url: new.file_url.clone(),
            file_name: new.file_name.clone(),
            file_type: new.file_type.clone(),
            category: new.category.clone(),
            size_bytes: new.size_bytes,
            uploaded_at: now,
        })
    }

    /// All documents, newest first. A non-empty `query` keeps only rows whose
    /// title, description or category contains it (ASCII case-insensitive).
    pub async fn list(&self, query: Option<&str>) -> Result<Vec<Document>> {
        let rows = match query.filter(|q| !q.is_empty()) {
            Some(q) => {
                let sql = format!(
                    "{SELECT_COLUMNS}
                     WHERE title LIKE ?1 ESCAPE '\\'
                        OR description LIKE ?1 ESCAPE '\\'
                        OR category LIKE ?1 ESCAPE '\\'
                     ORDER BY uploaded_at DESC, rowid DESC"
                );
                sqlx::query(&sql)
                    .bind(contains_pattern(q))
                    .fetch_all(&self.pool)
                    .await
                    .context("Failed to search documents")?
            }
            None => {
                let sql = format!("{SELECT_COLUMNS} ORDER BY uploaded_at DESC, rowid DESC");
                sqlx::query(&sql)
                    .fetch_all(&self.pool)
                    .await
                    .context("Failed to list documents")?
            }
        };

        rows.iter().map(Self::map_row).collect()
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Document>> {
        let sql = format!("{SELECT_COLUMNS} WHERE id = ?1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to query document")?;

        row.map(|r| Self::map_row(&r)).transpose()
    }

    fn map_row(row: &SqliteRow) -> Result<Document> {
        let uploaded_at: String = row.try_get("uploaded_at").context("Failed to get uploaded_at")?;
        let uploaded_at = DateTime::parse_from_rfc3339(&uploaded_at)
            .with_context(|| format!("Invalid uploaded_at timestamp: {uploaded_at}"))?
            .with_timezone(&Utc);

        Ok(Document {
            id: row.try_get("id").context("Failed to get id")?,
            title: row.try_get("title").context("Failed to get title")?,
            description: row.try_get("description").context("Failed to get description")?,
            file_url: row.try_get("file_url").context("Failed to get file_url")?,
            file_name: row.try_get("file_name").context("Failed to get file_name")?,
            file_type: row.try_get("file_type").context("Failed to get file_type")?,
            category: row.try_get("category").context("Failed to get category")?,
            size_bytes: row.try_get("size_bytes").context("Failed to get size_bytes")?,
            uploaded_at,
        })
    }
}

// Fixed width so that string order in SQLite matches chronological order.
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// `LIKE` pattern matching `query` as a literal substring.
fn contains_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
