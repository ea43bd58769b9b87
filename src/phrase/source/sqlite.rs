// src/phrase/source/sqlite.rs
// SQLite-backed corpus. Rows are addressed by `id - 1`.

use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;

use super::{CorpusError, CorpusSource};
use crate::phrase::record::PhraseRecord;

#[derive(Debug, Clone)]
pub struct SqliteCorpus {
    pool: SqlitePool,
}

impl SqliteCorpus {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CorpusSource for SqliteCorpus {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    async fn count(&self) -> Result<usize, CorpusError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM phrases")
            .fetch_one(&self.pool)
            .await?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    async fn fetch(&self, position: usize) -> Result<Option<PhraseRecord>, CorpusError> {
        let Some(id) = i64::try_from(position).ok().and_then(|p| p.checked_add(1)) else {
            return Ok(None);
        };

        let row: Option<(String, String)> =
            sqlx::query_as("SELECT phrase, author FROM phrases WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.and_then(|(phrase, author)| PhraseRecord::from_row(phrase, author)))
    }
}
