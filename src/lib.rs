// src/lib.rs

pub mod api;
pub mod config;
pub mod migrate;
pub mod phrase;
pub mod server;
pub mod state;

pub use phrase::{CorpusProvider, PeriodSelector, PhraseRecord, RotationsPerDay};
pub use state::AppState;
