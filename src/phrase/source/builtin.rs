use async_trait::async_trait;

use super::{CorpusError, CorpusSource};
use crate::phrase::defaults::{default_len, default_record};
use crate::phrase::record::PhraseRecord;

/// The compiled-in default corpus. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCorpus;

#[async_trait]
impl CorpusSource for BuiltinCorpus {
    fn name(&self) -> &'static str {
        "builtin"
    }

    async fn count(&self) -> Result<usize, CorpusError> {
        Ok(default_len())
    }

    async fn fetch(&self, position: usize) -> Result<Option<PhraseRecord>, CorpusError> {
        if position >= default_len() {
            return Ok(None);
        }
        Ok(Some(default_record(position)))
    }
}
