//! ATX-style headings (`#` through `######`).

use crate::extract::Excerpt;
use crate::position::Position;
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^ {0,3}(?P<marker>#{1,6})(?:[ \t]+(?P<title>.*?))?(?:[ \t]+#+)?[ \t]*\r?$")
        .unwrap()
});

#[derive(Clone, Debug, PartialEq, Eq)]
/// A heading line.
pub struct Header {
    /// Heading depth, 1 to 6. Zero marks the synthetic preamble header.
    pub level: u8,
    /// Heading text without markers or surrounding whitespace.
    pub title: String,
    /// Location of the full heading line.
    pub position: Position,
}

impl Header {
    #[must_use]
    /// Header for text that precedes any heading.
    pub fn synthetic() -> Self {
        Self {
            level: 0,
            title: String::new(),
            position: Position::new(1, 0, 0),
        }
    }
}

#[must_use]
/// Find headings along with the absolute byte offset each one starts at.
pub fn extract(excerpt: &Excerpt<'_>) -> Vec<(Header, Range<usize>)> {
    HEADER
        .captures_iter(excerpt.text())
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let level = u8::try_from(caps["marker"].len()).ok()?;
            let title = caps.name("title").map_or("", |m| m.as_str()).trim();
            Some((
                Header {
                    level,
                    title: title.to_string(),
                    position: excerpt.position(whole.range()),
                },
                excerpt.absolute(whole.range()),
            ))
        })
        .collect()
}

#[cfg(test)]
#[path = "../tests/header.rs"]
mod tests;
