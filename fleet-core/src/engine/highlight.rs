//! ``src/engine/highlight.rs``
//! ============================================================================
//! # Search highlighting
//!
//! Splits cell text into matched and unmatched runs so the table can style
//! the parts that match the active search term.

use regex::{Regex, RegexBuilder};

/// Default shortest search (in characters) that gets highlighted.
pub const HIGHLIGHT_MIN_LENGTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub matched: bool,
}

/// Compiled literal, case-insensitive matcher for one search term.
#[derive(Debug, Clone)]
pub struct Highlighter {
    pattern: Regex,
}

impl Highlighter {
    /// `None` when the term is too short to highlight.
    #[must_use]
    pub fn new(search: &str, min_len: usize) -> Option<Self> {
        if search.is_empty() || search.chars().count() < min_len {
            return None;
        }

        // escaped input always compiles; a failure only means "no highlight"
        RegexBuilder::new(&regex::escape(search))
            .case_insensitive(true)
            .build()
            .ok()
            .map(|pattern| Self { pattern })
    }

    #[must_use]
    pub fn segments<'a>(&self, text: &'a str) -> Vec<Segment<'a>> {
        let mut segments = Vec::new();
        let mut last = 0;

        for found in self.pattern.find_iter(text) {
            if found.start() > last {
                segments.push(Segment {
                    text: &text[last..found.start()],
                    matched: false,
                });
            }
            segments.push(Segment {
                text: found.as_str(),
                matched: true,
            });
            last = found.end();
        }

        if last < text.len() || segments.is_empty() {
            segments.push(Segment {
                text: &text[last..],
                matched: false,
            });
        }

        segments
    }
}

/// One-shot form of [`Highlighter::segments`]. Short searches yield the whole
/// text as a single unmatched segment.
#[must_use]
pub fn highlight_segments<'a>(text: &'a str, search: &str, min_len: usize) -> Vec<Segment<'a>> {
    match Highlighter::new(search, min_len) {
        Some(highlighter) => highlighter.segments(text),
        None => vec![Segment {
            text,
            matched: false,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(segments: &[Segment<'_>]) -> String {
        segments
            .iter()
            .map(|s| {
                if s.matched {
                    format!("[{}]", s.text)
                } else {
                    s.text.to_string()
                }
            })
            .collect()
    }

    #[test]
    fn test_marks_every_match_preserving_case() {
        let segments = highlight_segments("Web-web-WEB", "web", HIGHLIGHT_MIN_LENGTH);
        assert_eq!(render(&segments), "[Web]-[web]-[WEB]");
    }

    #[test]
    fn test_short_search_is_single_plain_segment() {
        let segments = highlight_segments("web-prod-01", "we", HIGHLIGHT_MIN_LENGTH);
        assert_eq!(
            segments,
            vec![Segment {
                text: "web-prod-01",
                matched: false
            }]
        );
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let segments = highlight_segments("v1.2 and v1x2", "v1.2", HIGHLIGHT_MIN_LENGTH);
        assert_eq!(render(&segments), "[v1.2] and v1x2");

        let segments = highlight_segments("a(b)c", "(b)", HIGHLIGHT_MIN_LENGTH);
        assert_eq!(render(&segments), "a[(b)]c");
    }

    #[test]
    fn test_no_match_returns_text() {
        let segments = highlight_segments("db-master", "cache", HIGHLIGHT_MIN_LENGTH);
        assert_eq!(render(&segments), "db-master");
    }
}
