// src/phrase/source/mod.rs
// Backing stores for the phrase corpus

mod builtin;
mod file;
mod sqlite;

pub use builtin::BuiltinCorpus;
pub use file::FileCorpus;
pub use sqlite::SqliteCorpus;

use async_trait::async_trait;
use thiserror::Error;

use super::record::PhraseRecord;

/// Failures raised by a corpus store. None of these escape `CorpusProvider`.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("corpus store unavailable: {0}")]
    Unavailable(String),
    #[error("corpus store is empty")]
    Empty,
    #[error("corpus query failed: {0}")]
    Query(#[from] sqlx::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// An ordered, read-only collection of phrases addressed by 0-based position
#[async_trait]
pub trait CorpusSource: Send + Sync {
    /// Short name used in logs and diagnostics
    fn name(&self) -> &'static str;

    /// Number of records currently in the store
    async fn count(&self) -> Result<usize, CorpusError>;

    /// Record at `position`, or `None` if the store has no usable row there
    async fn fetch(&self, position: usize) -> Result<Option<PhraseRecord>, CorpusError>;
}
