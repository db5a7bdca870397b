//! Bold span segmentation for analysis text.
//!
//! Analyses use `**...**` for emphasis. A span never crosses a line break and
//! matches as little as possible, so `**a** and **b**` gives two spans.

use once_cell::sync::Lazy;
use regex::Regex;

static BOLD_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*.*?\*\*").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Bold(&'a str),
}

/// Split text into plain and bold segments, dropping the `**` markers
pub fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut cursor = 0;
    for m in BOLD_SPAN.find_iter(text) {
        if m.start() > cursor {
            out.push(Segment::Plain(&text[cursor..m.start()]));
        }
        out.push(Segment::Bold(&text[m.start() + 2..m.end() - 2]));
        cursor = m.end();
    }
    if cursor < text.len() {
        out.push(Segment::Plain(&text[cursor..]));
    }
    out
}

/// Inverse of [`segments`]
pub fn to_markdown(segments: &[Segment<'_>]) -> String {
    segments
        .iter()
        .map(|s| match s {
            Segment::Plain(t) => t.to_string(),
            Segment::Bold(t) => format!("**{}**", t),
        })
        .collect()
}

/// Texts of the bold spans only
pub fn bold_spans(text: &str) -> Vec<&str> {
    segments(text)
        .into_iter()
        .filter_map(|s| match s {
            Segment::Bold(t) => Some(t),
            Segment::Plain(_) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments() {
        assert_eq!(
            segments("Mostly true **confirmed** by **two** sources."),
            vec![
                Segment::Plain("Mostly true "),
                Segment::Bold("confirmed"),
                Segment::Plain(" by "),
                Segment::Bold("two"),
                Segment::Plain(" sources."),
            ]
        );
    }

    #[test]
    fn test_unclosed_marker_stays_plain() {
        assert_eq!(segments("a **b"), vec![Segment::Plain("a **b")]);
    }

    #[test]
    fn test_span_does_not_cross_lines() {
        assert!(bold_spans("**a\nb**").is_empty());
    }

    #[test]
    fn test_empty_bold() {
        assert_eq!(segments("****"), vec![Segment::Bold("")]);
    }

    #[test]
    fn test_reassembles() {
        let text = "**Wrong:** the tower is **330 m**, not 500 m.\nSee *notes*.";
        assert_eq!(to_markdown(&segments(text)), text);
    }
}
