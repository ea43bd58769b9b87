// src/phrase/record.rs

use serde::{Deserialize, Serialize};

/// Author recorded when a phrase carries no attribution
pub const UNKNOWN_AUTHOR: &str = "Anónimo";

/// A single phrase with its author.
///
/// Records are identified by their position in the corpus, not by content,
/// so two identical records at different positions are distinct entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseRecord {
    #[serde(rename = "phrase")]
    pub text: String,
    pub author: String,
}

impl PhraseRecord {
    /// Build a record, rejecting empty text. A blank author becomes [`UNKNOWN_AUTHOR`].
    pub fn new(text: impl Into<String>, author: Option<&str>) -> Option<Self> {
        let text = text.into().trim().to_string();
        if text.is_empty() {
            return None;
        }
        let author = match author.map(str::trim) {
            Some(a) if !a.is_empty() => a.to_string(),
            _ => UNKNOWN_AUTHOR.to_string(),
        };
        Some(Self { text, author })
    }

    /// Build a record from a stored row, where both fields are required
    pub fn from_row(text: String, author: String) -> Option<Self> {
        if text.trim().is_empty() || author.trim().is_empty() {
            return None;
        }
        Some(Self { text, author })
    }

    /// `"text" - author`, the form used in feed descriptions
    pub fn attributed(&self) -> String {
        format!("\"{}\" - {}", self.text, self.author)
    }
}
