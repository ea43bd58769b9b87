// src/state.rs
// Shared handler state

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDateTime, Utc};

use crate::config::FeedConfig;
use crate::phrase::PeriodSelector;

/// Source of the current time. Buckets use local wall-clock time,
/// feed timestamps use UTC.
pub trait Clock: Send + Sync {
    fn local(&self) -> NaiveDateTime;
    fn utc(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn local(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    local: NaiveDateTime,
    utc: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(local: NaiveDateTime, utc: DateTime<Utc>) -> Self {
        Self { local, utc }
    }

    /// Local time and UTC coincide
    pub fn at(local: NaiveDateTime) -> Self {
        Self::new(local, local.and_utc())
    }
}

impl Clock for FixedClock {
    fn local(&self) -> NaiveDateTime {
        self.local
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc
    }
}

#[derive(Clone)]
pub struct AppState {
    pub selector: PeriodSelector,
    pub feed: FeedConfig,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(selector: PeriodSelector, feed: FeedConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            selector,
            feed,
            clock,
        }
    }
}
