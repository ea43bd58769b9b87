// src/phrase/selector.rs
// Period Selector: maps wall-clock time to a stable corpus index
//
// A day is cut into `rotations_per_day` equal buckets. The bucket key
// "<YYYY-MM-DD>-<period>" is hashed with MD5 and the 128-bit digest,
// read big-endian, is reduced modulo the corpus size. Nothing is stored:
// every process that agrees on the local date, period and corpus size
// picks the same index.

use std::num::NonZeroU32;
use std::sync::Arc;

use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;

use super::corpus::CorpusProvider;
use super::record::PhraseRecord;
use crate::config::ConfigError;

pub const MINUTES_PER_DAY: u32 = 1440;

/// Number of buckets per calendar day, validated to `1..=1440`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationsPerDay(NonZeroU32);

impl RotationsPerDay {
    pub const DEFAULT: u32 = 2;

    pub fn new(value: i64) -> Result<Self, ConfigError> {
        u32::try_from(value)
            .ok()
            .filter(|v| *v <= MINUTES_PER_DAY)
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or(ConfigError::InvalidRotations(value))
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Bucket width in minutes (not necessarily whole). Reported in
    /// diagnostics; bucket assignment uses [`current_period`].
    pub fn minutes_per_period(self) -> f64 {
        f64::from(MINUTES_PER_DAY) / f64::from(self.get())
    }
}

impl Default for RotationsPerDay {
    fn default() -> Self {
        const DEFAULT: NonZeroU32 = match NonZeroU32::new(RotationsPerDay::DEFAULT) {
            Some(v) => v,
            None => panic!("default rotation count must be non-zero"),
        };
        Self(DEFAULT)
    }
}

/// Bucket index of `now` within its day, in `0..rotations`.
///
/// Equal to `floor(minute_of_day / (1440 / rotations))`, computed exactly in
/// integers so bucket edges land on the right minute when 1440 is not a
/// multiple of `rotations`.
pub fn current_period<T: Timelike>(now: &T, rotations: RotationsPerDay) -> u32 {
    let minute_of_day = now.hour() * 60 + now.minute();
    // minute_of_day < 1440 and rotations <= 1440, so this stays below rotations
    minute_of_day * rotations.get() / MINUTES_PER_DAY
}

/// Hash input for the bucket containing `now`, e.g. `2024-03-01-1`
pub fn bucket_key(now: &NaiveDateTime, rotations: RotationsPerDay) -> String {
    format!(
        "{}-{}",
        now.format("%Y-%m-%d"),
        current_period(now, rotations)
    )
}

/// Stable index in `0..corpus_size` for the bucket containing `now`.
///
/// A `corpus_size` of zero yields 0; providers never report an empty corpus.
pub fn select(now: &NaiveDateTime, corpus_size: usize, rotations: RotationsPerDay) -> usize {
    index_for_key(&bucket_key(now, rotations), corpus_size)
}

/// MD5 of `key` as a big-endian integer, reduced modulo `size`
pub fn index_for_key(key: &str, size: usize) -> usize {
    if size == 0 {
        return 0;
    }
    let digest = u128::from_be_bytes(md5::compute(key.as_bytes()).0);
    // Result is below `size`, so it fits back into usize
    (digest % size as u128) as usize
}

/// Computed internals of the active bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSnapshot {
    pub rotations_per_day: u32,
    pub minutes_per_period: f64,
    pub period: u32,
    pub bucket_key: String,
    pub corpus_size: usize,
    pub index: usize,
    pub source: &'static str,
}

/// Composes bucket selection with a corpus
#[derive(Debug, Clone)]
pub struct PeriodSelector {
    corpus: Arc<CorpusProvider>,
    rotations: RotationsPerDay,
}

impl PeriodSelector {
    pub fn new(corpus: Arc<CorpusProvider>, rotations: RotationsPerDay) -> Self {
        Self { corpus, rotations }
    }

    pub fn rotations(&self) -> RotationsPerDay {
        self.rotations
    }

    pub fn corpus(&self) -> &CorpusProvider {
        &self.corpus
    }

    /// The phrase for the bucket containing `now` (local wall-clock time)
    pub async fn daily_phrase(&self, now: &NaiveDateTime) -> PhraseRecord {
        let size = self.corpus.size().await;
        let index = select(now, size, self.rotations);
        self.corpus.get(index).await
    }

    pub async fn snapshot(&self, now: &NaiveDateTime) -> PeriodSnapshot {
        let corpus_size = self.corpus.size().await;
        let bucket_key = bucket_key(now, self.rotations);
        PeriodSnapshot {
            rotations_per_day: self.rotations.get(),
            minutes_per_period: self.rotations.minutes_per_period(),
            period: current_period(now, self.rotations),
            index: index_for_key(&bucket_key, corpus_size),
            bucket_key,
            corpus_size,
            source: self.corpus.source_name(),
        }
    }
}
