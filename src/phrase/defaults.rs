// src/phrase/defaults.rs
// Built-in corpus served when no backing store is usable

use super::record::{PhraseRecord, UNKNOWN_AUTHOR};

const DEFAULT_PHRASES: &[&str] = &[
    "¡Hoy es un gran día para aprender algo nuevo!",
    "Cada momento es un nuevo comienzo.",
    "Cree que puedes y ya estás a la mitad del camino.",
    "El mejor momento para plantar un árbol fue hace 20 años. El segundo mejor momento es ahora.",
    "Tu limitación, es solo tu imaginación.",
    "Empújate a ti mismo, porque nadie más lo hará por ti.",
    "Las grandes cosas nunca vienen de las zonas de confort.",
];

/// The built-in corpus, in its fixed order
pub fn default_corpus() -> Vec<PhraseRecord> {
    DEFAULT_PHRASES
        .iter()
        .map(|text| PhraseRecord {
            text: (*text).to_string(),
            author: UNKNOWN_AUTHOR.to_string(),
        })
        .collect()
}

/// Number of built-in phrases
pub fn default_len() -> usize {
    DEFAULT_PHRASES.len()
}

/// Built-in record at `index mod len`
pub fn default_record(index: usize) -> PhraseRecord {
    let text = DEFAULT_PHRASES[index % DEFAULT_PHRASES.len()];
    PhraseRecord {
        text: text.to_string(),
        author: UNKNOWN_AUTHOR.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_corpus_is_non_empty_and_ordered() {
        let corpus = default_corpus();
        assert_eq!(corpus.len(), default_len());
        assert!(!corpus.is_empty());
        for (i, rec) in corpus.iter().enumerate() {
            assert_eq!(&default_record(i), rec);
            assert_eq!(rec.author, UNKNOWN_AUTHOR);
        }
    }

    #[test]
    fn test_default_record_wraps() {
        assert_eq!(default_record(default_len()), default_record(0));
        assert_eq!(default_record(usize::MAX), default_record(usize::MAX % default_len()));
    }
}
