//! Pattern-based extractors for the markdown elements a section carries.
//!
//! Each submodule owns the patterns for one kind of element and exposes an
//! `extract` function over an [`Excerpt`]. Extractors never look inside fenced
//! code: the document builder blanks those ranges out (see [`mask`]) before
//! handing text over, which keeps byte offsets identical to the source.

pub mod code;
pub mod front_matter;
pub mod header;
pub mod image;
pub mod link;
pub mod quote;
pub mod reference;
pub mod table;

use crate::position::{Locator, Position};
use std::ops::Range;

#[derive(Clone, Copy)]
/// A slice of (possibly masked) document text anchored at its absolute offset.
pub struct Excerpt<'a> {
    text: &'a str,
    base: usize,
    locator: &'a Locator<'a>,
}

impl<'a> Excerpt<'a> {
    #[must_use]
    /// Wrap `text`, which starts at byte `base` of the locator's document.
    ///
    /// `text` must have the same byte layout as the document over that range,
    /// which holds for raw slices and for slices of [`mask`]ed copies.
    pub fn new(text: &'a str, base: usize, locator: &'a Locator<'a>) -> Self {
        Self {
            text,
            base,
            locator,
        }
    }

    #[must_use]
    /// The whole unmasked document.
    pub fn whole(locator: &'a Locator<'a>) -> Self {
        Self::new(locator.text(), 0, locator)
    }

    #[must_use]
    /// Text visible to extractors.
    pub fn text(&self) -> &'a str {
        self.text
    }

    #[must_use]
    /// Translate a span relative to this excerpt into an absolute byte range.
    pub fn absolute(&self, span: Range<usize>) -> Range<usize> {
        self.base + span.start..self.base + span.end
    }

    #[must_use]
    /// Position of a span given relative to this excerpt.
    pub fn position(&self, span: Range<usize>) -> Position {
        let span = self.absolute(span);
        self.locator.position(span.start, span.end)
    }
}

#[must_use]
/// Blank out `ranges` of `text`, keeping newlines and byte offsets intact.
///
/// Every non-newline character in a range becomes as many spaces as it had
/// UTF-8 bytes. Ranges must fall on character boundaries.
pub fn mask(text: &str, ranges: &[Range<usize>]) -> String {
    let mut masked = text.to_string();
    for range in ranges {
        let start = range.start.min(text.len());
        let end = range.end.clamp(start, text.len());
        let blank: String = text[start..end]
            .chars()
            .flat_map(|c| {
                let width = if c == '\n' { 0 } else { c.len_utf8() };
                std::iter::repeat_n(' ', width).chain((c == '\n').then_some('\n'))
            })
            .collect();
        masked.replace_range(start..end, &blank);
    }
    masked
}

/// Iterate the lines of `text` with the byte offset each one starts at.
///
/// Lines exclude their terminating `\n` (and a preceding `\r`).
pub(crate) fn lines_with_offsets(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split_inclusive('\n').scan(0, |offset, line| {
        let start = *offset;
        *offset += line.len();
        let line = line.strip_suffix('\n').unwrap_or(line);
        Some((start, line.strip_suffix('\r').unwrap_or(line)))
    })
}

#[cfg(test)]
#[path = "tests/extract.rs"]
mod tests;
