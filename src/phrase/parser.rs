// src/phrase/parser.rs
// Line grammar for flat phrase files
//
// Accepted forms, tried in order:
//   "<text>" - <author>[ <glyphs>]
//   <text> | <author>
//   <text>

use tracing::debug;

use super::record::{PhraseRecord, UNKNOWN_AUTHOR};

const QUOTED_SEPARATOR: &str = "\" - ";

/// Parse one line of a phrase file.
///
/// Returns `None` for blank lines and for lines whose required fields are
/// empty once parsed; callers skip those.
pub fn parse_line(line: &str) -> Option<PhraseRecord> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if line.starts_with('"') && line.contains(QUOTED_SEPARATOR) {
        let quote_end = line.rfind(QUOTED_SEPARATOR)?;
        if quote_end == 0 {
            return None;
        }
        let text = &line[1..quote_end];
        let author = strip_decoration(&line[quote_end + QUOTED_SEPARATOR.len()..]);
        return PhraseRecord::from_row(text.to_string(), author);
    }

    if let Some((text, author)) = line.split_once('|') {
        return PhraseRecord::from_row(text.trim().to_string(), author.trim().to_string());
    }

    PhraseRecord::new(line, Some(UNKNOWN_AUTHOR))
}

/// Parse one raw line. A line that is not valid UTF-8 is malformed and
/// skipped like any other unparseable line.
pub fn parse_line_bytes(line: &[u8]) -> Option<PhraseRecord> {
    match std::str::from_utf8(line) {
        Ok(line) => parse_line(line),
        Err(e) => {
            debug!(error = %e, "Skipping line that is not valid UTF-8");
            None
        }
    }
}

/// Cut the author at the first token with no letters or digits (emoji and
/// similar), dropping that token and everything after it:
/// `Séneca 📚 (Cartas)` becomes `Séneca`.
fn strip_decoration(author: &str) -> String {
    author
        .split_whitespace()
        .take_while(|t| t.chars().any(char::is_alphanumeric))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_form_strips_glyphs() {
        let rec = parse_line("\"Carpe diem.\" - Horace ⚔️").unwrap();
        assert_eq!(rec.text, "Carpe diem.");
        assert_eq!(rec.author, "Horace");
    }

    #[test]
    fn test_quoted_form_multiword_author() {
        let rec = parse_line("\"La felicidad depende de nosotros.\" - Marco Aurelio 🏛️ 📚").unwrap();
        assert_eq!(rec.text, "La felicidad depende de nosotros.");
        assert_eq!(rec.author, "Marco Aurelio");
    }

    #[test]
    fn test_quoted_form_drops_everything_after_glyph() {
        let rec = parse_line("\"x\" - Séneca 📚 (Cartas)").unwrap();
        assert_eq!(rec.author, "Séneca");
    }

    #[test]
    fn test_raw_line_with_invalid_utf8_is_skipped() {
        assert!(parse_line_bytes(b"bad \xff byte").is_none());
        assert_eq!(parse_line_bytes(b"ok | A\r").unwrap().author, "A");
    }

    #[test]
    fn test_quoted_form_uses_last_separator() {
        let rec = parse_line("\"He said \" - no\" - Anon").unwrap();
        assert_eq!(rec.text, "He said \" - no");
        assert_eq!(rec.author, "Anon");
    }

    #[test]
    fn test_pipe_form() {
        let rec = parse_line("  Keep going | Someone  ").unwrap();
        assert_eq!(rec.text, "Keep going");
        assert_eq!(rec.author, "Someone");
    }

    #[test]
    fn test_pipe_form_splits_on_first_pipe() {
        let rec = parse_line("a | b | c").unwrap();
        assert_eq!(rec.text, "a");
        assert_eq!(rec.author, "b | c");
    }

    #[test]
    fn test_plain_form() {
        let rec = parse_line("Plain phrase only").unwrap();
        assert_eq!(rec.text, "Plain phrase only");
        assert_eq!(rec.author, UNKNOWN_AUTHOR);
    }

    #[test]
    fn test_malformed_lines_skipped() {
        assert!(parse_line("").is_none());
        assert!(parse_line("   \t").is_none());
        assert!(parse_line("just text |").is_none());
        assert!(parse_line("| author only").is_none());
        assert!(parse_line("\"\" - Nobody").is_none());
        assert!(parse_line("\"Glyph author\" - ⚔️").is_none());
        assert!(parse_line("\" - starts with separator").is_none());
    }
}
