// src/phrase/source/file.rs

use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use super::{CorpusError, CorpusSource};
use crate::phrase::parser::parse_line_bytes;
use crate::phrase::record::PhraseRecord;

/// Flat phrase file, parsed once and held in memory
#[derive(Debug, Clone)]
pub struct FileCorpus {
    records: Vec<PhraseRecord>,
}

impl FileCorpus {
    /// Read and parse `path`. Unparseable lines, including ones that are not
    /// valid UTF-8, are skipped without rejecting the rest of the file.
    pub async fn load(path: &Path) -> Result<Self, CorpusError> {
        if !path.exists() {
            return Err(CorpusError::Unavailable(format!(
                "phrase file not found: {}",
                path.display()
            )));
        }
        let contents = tokio::fs::read(path).await?;
        let corpus = Self::parse_bytes(&contents);
        debug!(
            path = %path.display(),
            records = corpus.records.len(),
            "Loaded phrase file"
        );
        Ok(corpus)
    }

    pub fn parse(contents: &str) -> Self {
        Self::parse_bytes(contents.as_bytes())
    }

    pub fn parse_bytes(contents: &[u8]) -> Self {
        Self {
            records: contents.split(|b| *b == b'\n').filter_map(parse_line_bytes).collect(),
        }
    }

    pub fn records(&self) -> &[PhraseRecord] {
        &self.records
    }
}

#[async_trait]
impl CorpusSource for FileCorpus {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn count(&self) -> Result<usize, CorpusError> {
        Ok(self.records.len())
    }

    async fn fetch(&self, position: usize) -> Result<Option<PhraseRecord>, CorpusError> {
        Ok(self.records.get(position).cloned())
    }
}
