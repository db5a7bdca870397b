//! Which text a check runs on.
//!
//! A selection inside the previous analysis lets the user re-check part of
//! the answer; a selection in the input narrows the check to that passage.

use std::str::FromStr;

/// Character range `[start, end)` within a text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Selected characters of `text`. Reversed ranges are normalized and
    /// offsets past the end are clamped.
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        let (lo, hi) = if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };
        let start = byte_offset(text, lo);
        let end = byte_offset(text, hi);
        &text[start..end]
    }
}

fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

impl FromStr for Selection {
    type Err = String;

    /// Parses `START:END`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once(':')
            .ok_or_else(|| format!("expected START:END, got '{}'", s))?;
        let start = start
            .trim()
            .parse()
            .map_err(|_| format!("invalid start offset '{}'", start))?;
        let end = end
            .trim()
            .parse()
            .map_err(|_| format!("invalid end offset '{}'", end))?;
        Ok(Self { start, end })
    }
}

/// Pick the text to check.
///
/// Priority: non-empty selection in the previous analysis (only if there is
/// one), then a non-empty input selection, then the whole input.
pub fn select_target<'a>(
    input: &'a str,
    input_selection: Option<Selection>,
    output: &'a str,
    output_selection: Option<Selection>,
) -> &'a str {
    if let Some(sel) = output_selection.filter(|s| !s.is_empty()) {
        if !output.is_empty() {
            return sel.slice(output);
        }
    }
    if let Some(sel) = input_selection.filter(|s| !s.is_empty()) {
        return sel.slice(input);
    }
    input
}
