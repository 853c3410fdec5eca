// SQLite persistence for the comment dataset. Replace-all: every save drops the
// table and writes the new rows inside one transaction.

use std::path::{Path, PathBuf};

use opinionwatch_common::{Comment, Dataset, Sentiment};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{info, warn};

use crate::error::{Result, StoreError};

/// Name of the persisted table. Column names are part of the on-disk contract
/// shared with dashboards; `sentimen` keeps its historical spelling.
pub const TABLE_NAME: &str = "comments";

const CREATE_TABLE: &str = r#"
    CREATE TABLE comments (
        author       TEXT,
        text         TEXT,
        published_at TEXT,
        like_count   INTEGER NOT NULL DEFAULT 0,
        sentimen     TEXT
    )
"#;

pub struct SqliteStore {
    pool: SqlitePool,
    path: PathBuf,
}

/// A row from the comments table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct StoredComment {
    author: Option<String>,
    text: Option<String>,
    published_at: Option<String>,
    like_count: Option<i64>,
    sentimen: Option<String>,
}

impl StoredComment {
    fn into_comment(self) -> Comment {
        let sentiment = self.sentimen.as_deref().and_then(|s| match s.parse::<Sentiment>() {
            Ok(sentiment) => Some(sentiment),
            Err(e) => {
                warn!(error = %e, "Ignoring unrecognised stored sentiment");
                None
            }
        });

        Comment {
            author: self.author,
            text: self.text,
            published_at: self.published_at,
            like_count: self.like_count.unwrap_or(0),
            sentiment,
        }
    }
}

impl SqliteStore {
    /// Open (creating if missing) the database file at `path`.
    pub async fn open(path: &Path) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        // Single writer; the pipeline never issues concurrent queries.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        Ok(Self {
            pool,
            path: path.to_path_buf(),
        })
    }

    /// Replace the persisted dataset with `dataset`. Returns the number of rows written.
    /// On error the previous dataset is left untouched.
    pub async fn save(&self, dataset: &Dataset) -> Result<usize> {
        if let Some((row, c)) = dataset.iter().enumerate().find(|(_, c)| c.like_count < 0) {
            return Err(StoreError::InvalidLikeCount {
                row,
                value: c.like_count,
            });
        }

        info!(
            rows = dataset.len(),
            path = %self.path.display(),
            "Replacing comments table"
        );

        let mut tx = self.pool.begin().await?;

        sqlx::query("DROP TABLE IF EXISTS comments")
            .execute(&mut *tx)
            .await?;
        sqlx::query(CREATE_TABLE).execute(&mut *tx).await?;

        for comment in dataset {
            sqlx::query(
                r#"
                INSERT INTO comments (author, text, published_at, like_count, sentimen)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(&comment.author)
            .bind(&comment.text)
            .bind(&comment.published_at)
            .bind(comment.like_count)
            .bind(comment.sentiment.map(|s| s.as_str()))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(rows = dataset.len(), path = %self.path.display(), "Dataset saved");
        Ok(dataset.len())
    }

    /// The persisted dataset, or `None` if nothing has ever been saved.
    pub async fn load(&self) -> Result<Option<Dataset>> {
        let exists: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = $1",
        )
        .bind(TABLE_NAME)
        .fetch_one(&self.pool)
        .await?;

        if exists == 0 {
            return Ok(None);
        }

        let rows = sqlx::query_as::<_, StoredComment>(
            r#"
            SELECT author, text, published_at, like_count, sentimen
            FROM comments
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(Dataset::new(
            rows.into_iter().map(StoredComment::into_comment).collect(),
        )))
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}
