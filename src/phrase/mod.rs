// src/phrase/mod.rs
// Phrase corpus and deterministic period selection

pub mod corpus;
pub mod defaults;
pub mod parser;
pub mod record;
pub mod selector;
pub mod source;

pub use corpus::CorpusProvider;
pub use parser::{parse_line, parse_line_bytes};
pub use record::{PhraseRecord, UNKNOWN_AUTHOR};
pub use selector::{PeriodSelector, RotationsPerDay, bucket_key, current_period, select};
pub use source::{CorpusError, CorpusSource};
