// src/migrate.rs
// Offline import of a flat phrase file into SQLite

use std::path::{Path, PathBuf};

use serde::Serialize;
use sqlx::sqlite::SqlitePool;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::phrase::parser::parse_line_bytes;
use crate::server::db::ensure_schema;

/// Lines between commits
const BATCH_SIZE: usize = 50_000;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("phrase file not found: {}", .0.display())]
    SourceMissing(PathBuf),
    #[error("failed to read phrase file: {0}")]
    Io(#[from] std::io::Error),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    pub lines_processed: usize,
    pub inserted: usize,
    pub skipped: usize,
    pub total_rows: usize,
}

/// Replace the contents of `phrases` with every parseable line of `input`.
///
/// Row ids restart at 1 so that `id - 1` matches file order.
pub async fn migrate_file(input: &Path, pool: &SqlitePool) -> Result<MigrationReport, MigrationError> {
    if !input.exists() {
        return Err(MigrationError::SourceMissing(input.to_path_buf()));
    }

    info!(path = %input.display(), "Starting phrase migration");
    ensure_schema(pool).await?;

    let mut report = MigrationReport::default();
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM phrases").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM sqlite_sequence WHERE name = 'phrases'")
        .execute(&mut *tx)
        .await?;

    let file = tokio::fs::File::open(input).await?;
    // Raw segments: a line that is not UTF-8 is skipped, not fatal
    let mut lines = BufReader::new(file).split(b'\n');

    while let Some(line) = lines.next_segment().await? {
        report.lines_processed += 1;

        match parse_line_bytes(&line) {
            Some(record) => {
                sqlx::query("INSERT INTO phrases (phrase, author) VALUES (?, ?)")
                    .bind(&record.text)
                    .bind(&record.author)
                    .execute(&mut *tx)
                    .await?;
                report.inserted += 1;
            }
            None => {
                debug!(line = report.lines_processed, "Skipping unparseable line");
                report.skipped += 1;
            }
        }

        if report.lines_processed % BATCH_SIZE == 0 {
            tx.commit().await?;
            info!("Processed {} lines...", report.lines_processed);
            tx = pool.begin().await?;
        }
    }
    tx.commit().await?;

    let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM phrases")
        .fetch_one(pool)
        .await?;
    report.total_rows = usize::try_from(total).unwrap_or(0);

    info!(
        lines_processed = report.lines_processed,
        inserted = report.inserted,
        skipped = report.skipped,
        total_rows = report.total_rows,
        "Migration completed"
    );
    Ok(report)
}
