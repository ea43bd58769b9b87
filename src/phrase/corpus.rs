// src/phrase/corpus.rs
// Corpus Provider: never-failing size/get over whichever store is available

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::defaults::{default_len, default_record};
use super::record::PhraseRecord;
use super::source::{BuiltinCorpus, CorpusError, CorpusSource, FileCorpus, SqliteCorpus};
use crate::server::db;

/// Serves records from one backing store, degrading to the built-in corpus
/// whenever the store errors, is empty, or has no row at a position.
#[derive(Clone)]
pub struct CorpusProvider {
    source: Arc<dyn CorpusSource>,
}

impl CorpusProvider {
    pub fn new(source: Arc<dyn CorpusSource>) -> Self {
        Self { source }
    }

    pub fn builtin() -> Self {
        Self::new(Arc::new(BuiltinCorpus))
    }

    /// Pick the backing store once, in precedence order:
    /// SQLite database, then flat phrase file, then the built-in corpus.
    ///
    /// A store is only chosen if it can be read and holds at least one record.
    pub async fn open(database_url: &str, phrases_file: &Path) -> Self {
        match db::open_existing(database_url).await {
            Ok(pool) => {
                let store = SqliteCorpus::new(pool);
                match store.count().await {
                    Ok(count) if count > 0 => {
                        info!(source = "sqlite", records = count, "Phrase corpus ready");
                        return Self::new(Arc::new(store));
                    }
                    Ok(_) => info!(database_url, "Phrase database is empty, skipping"),
                    Err(e) => warn!(database_url, error = %e, "Phrase database unreadable, skipping"),
                }
            }
            Err(e) => info!(database_url, error = %e, "Phrase database unavailable, skipping"),
        }

        match FileCorpus::load(phrases_file).await {
            Ok(store) if !store.records().is_empty() => {
                info!(
                    source = "file",
                    path = %phrases_file.display(),
                    records = store.records().len(),
                    "Phrase corpus ready"
                );
                return Self::new(Arc::new(store));
            }
            Ok(_) => info!(path = %phrases_file.display(), "Phrase file has no usable lines, skipping"),
            Err(e) => info!(path = %phrases_file.display(), error = %e, "Phrase file unavailable, skipping"),
        }

        warn!(
            source = "builtin",
            records = default_len(),
            "No phrase store available, serving built-in corpus"
        );
        Self::builtin()
    }

    /// Name of the active store ("sqlite", "file" or "builtin")
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Current corpus length. Falls back to the built-in length on any failure.
    pub async fn size(&self) -> usize {
        match self.non_empty_count().await {
            Ok(count) => count,
            Err(e) => {
                warn!(
                    source = self.source.name(),
                    error = %e,
                    fallback_size = default_len(),
                    "Corpus size unavailable, using built-in corpus"
                );
                default_len()
            }
        }
    }

    /// Record at `index mod size`. Any non-negative index yields a record.
    pub async fn get(&self, index: usize) -> PhraseRecord {
        match self.lookup(index).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                warn!(
                    source = self.source.name(),
                    index,
                    "No record after re-reading corpus size, using first built-in phrase"
                );
                default_record(0)
            }
            Err(e) => {
                warn!(
                    source = self.source.name(),
                    index,
                    error = %e,
                    "Corpus lookup failed, using built-in corpus"
                );
                default_record(index)
            }
        }
    }

    async fn lookup(&self, index: usize) -> Result<Option<PhraseRecord>, CorpusError> {
        let size = self.non_empty_count().await?;
        let position = index % size;
        if let Some(record) = self.source.fetch(position).await? {
            return Ok(Some(record));
        }

        // Size may have changed since the caller's read, or ids may be sparse
        let fresh = self.non_empty_count().await?;
        let retry = index % fresh;
        debug!(
            source = self.source.name(),
            index,
            position,
            fresh_size = fresh,
            retry_position = retry,
            "No record at position, retrying"
        );
        self.source.fetch(retry).await
    }

    async fn non_empty_count(&self) -> Result<usize, CorpusError> {
        match self.source.count().await? {
            0 => Err(CorpusError::Empty),
            count => Ok(count),
        }
    }
}

impl std::fmt::Debug for CorpusProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CorpusProvider")
            .field("source", &self.source.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Store that always errors
    struct BrokenStore;

    #[async_trait]
    impl CorpusSource for BrokenStore {
        fn name(&self) -> &'static str {
            "broken"
        }
        async fn count(&self) -> Result<usize, CorpusError> {
            Err(CorpusError::Unavailable("disk on fire".into()))
        }
        async fn fetch(&self, _position: usize) -> Result<Option<PhraseRecord>, CorpusError> {
            Err(CorpusError::Unavailable("disk on fire".into()))
        }
    }

    /// Store whose size shrinks after the first read
    struct ShrinkingStore {
        reads: AtomicUsize,
    }

    #[async_trait]
    impl CorpusSource for ShrinkingStore {
        fn name(&self) -> &'static str {
            "shrinking"
        }
        async fn count(&self) -> Result<usize, CorpusError> {
            let n = self.reads.fetch_add(1, Ordering::SeqCst);
            Ok(if n == 0 { 10 } else { 3 })
        }
        async fn fetch(&self, position: usize) -> Result<Option<PhraseRecord>, CorpusError> {
            if position < 3 {
                Ok(PhraseRecord::new(format!("p{position}"), Some("S")))
            } else {
                Ok(None)
            }
        }
    }

    /// Store that has a size but no rows at all
    struct HollowStore;

    #[async_trait]
    impl CorpusSource for HollowStore {
        fn name(&self) -> &'static str {
            "hollow"
        }
        async fn count(&self) -> Result<usize, CorpusError> {
            Ok(5)
        }
        async fn fetch(&self, _position: usize) -> Result<Option<PhraseRecord>, CorpusError> {
            Ok(None)
        }
    }

    fn file_store(lines: &str) -> CorpusProvider {
        CorpusProvider::new(Arc::new(FileCorpus::parse(lines)))
    }

    #[tokio::test]
    async fn test_get_reduces_index_modulo_size() {
        let provider = file_store("a | 1\nb | 2\nc | 3\n");
        assert_eq!(provider.size().await, 3);
        assert_eq!(provider.get(4).await.text, "b");
        assert_eq!(provider.get(usize::MAX).await.text, ["a", "b", "c"][usize::MAX % 3]);
    }

    #[tokio::test]
    async fn test_broken_store_falls_back_to_builtin() {
        let provider = CorpusProvider::new(Arc::new(BrokenStore));
        assert_eq!(provider.size().await, default_len());
        for i in 0..(default_len() * 2) {
            assert_eq!(provider.get(i).await, default_record(i));
        }
    }

    #[tokio::test]
    async fn test_empty_store_falls_back_to_builtin() {
        let provider = file_store("\n\n");
        assert_eq!(provider.size().await, default_len());
        assert_eq!(provider.get(3).await, default_record(3));
    }

    #[tokio::test]
    async fn test_retry_uses_fresh_size() {
        let provider = CorpusProvider::new(Arc::new(ShrinkingStore {
            reads: AtomicUsize::new(0),
        }));
        // 7 % 10 = 7 misses, then 7 % 3 = 1 hits
        assert_eq!(provider.get(7).await.text, "p1");
    }

    #[tokio::test]
    async fn test_missing_after_retry_uses_first_builtin() {
        let provider = CorpusProvider::new(Arc::new(HollowStore));
        assert_eq!(provider.get(2).await, default_record(0));
    }

    #[tokio::test]
    async fn test_open_without_any_store_uses_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let db_url = format!("sqlite:{}", dir.path().join("missing.db").display());
        let provider = CorpusProvider::open(&db_url, &dir.path().join("missing.txt")).await;

        assert_eq!(provider.source_name(), "builtin");
        assert_eq!(provider.size().await, default_len());
        assert!(!dir.path().join("missing.db").exists());
    }

    #[tokio::test]
    async fn test_open_prefers_file_when_database_missing() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("phrases.txt");
        std::fs::write(&file, "\"Carpe diem.\" - Horace ⚔️\n").unwrap();
        let db_url = format!("sqlite:{}", dir.path().join("missing.db").display());

        let provider = CorpusProvider::open(&db_url, &file).await;
        assert_eq!(provider.source_name(), "file");
        assert_eq!(provider.size().await, 1);
        assert_eq!(provider.get(41).await.author, "Horace");
    }
}
