//! Line/column coordinates for everything extracted from a document.
//!
//! Extractors work on byte offsets (that is what regex matches give us), but
//! diagnostics are reported as a 1-based line plus a character column, so a
//! [`Locator`] sits between the two and does the translation once per match.

use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
/// Where an element sits in the source text.
///
/// The all-zero value is the unanchored sentinel, used by diagnostics that
/// have no specific location (a section that is missing, for example).
pub struct Position {
    /// Line number, starting at 1.
    pub line: usize,
    /// Character column within the line, starting at 0.
    pub offset: usize,
    /// Length of the element in characters.
    pub length: usize,
}

impl Position {
    #[must_use]
    /// Build a position from its three components.
    pub const fn new(line: usize, offset: usize, length: usize) -> Self {
        Self {
            line,
            offset,
            length,
        }
    }
}

/// Translates absolute byte spans of one text into [`Position`]s.
pub struct Locator<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> Locator<'a> {
    #[must_use]
    /// Index the line starts of `text`.
    pub fn new(text: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { text, line_starts }
    }

    #[must_use]
    /// The text this locator was built over.
    pub fn text(&self) -> &'a str {
        self.text
    }

    #[must_use]
    /// Position of the byte span `start..end`.
    ///
    /// Spans are clamped to the text, and both ends must fall on character
    /// boundaries (regex match offsets always do).
    pub fn position(&self, start: usize, end: usize) -> Position {
        let start = start.min(self.text.len());
        let end = end.clamp(start, self.text.len());
        let index = self.line_starts.partition_point(|&s| s <= start);
        let line_start = self.line_starts[index.saturating_sub(1)];
        Position {
            line: index.max(1),
            offset: self.text[line_start..start].chars().count(),
            length: self.text[start..end].chars().count(),
        }
    }
}

#[cfg(test)]
#[path = "tests/position.rs"]
mod tests;
