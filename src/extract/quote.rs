//! Block quotes, merged line by line into runs of equal nesting depth.

use crate::extract::Excerpt;
use crate::position::Position;
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static QUOTE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^ {0,3}(?P<markers>>(?:[ \t]*>)*)[ \t]?(?P<text>.*?)\r?$").unwrap()
});

#[derive(Clone, Debug, PartialEq, Eq)]
/// Consecutive quote lines sharing one nesting depth.
pub struct QuoteBlock {
    /// Number of `>` markers on each line.
    pub depth: usize,
    /// Line contents with markers removed, joined with `\n`.
    pub text: String,
    /// Location from the first marker to the end of the last line.
    pub position: Position,
    /// Absolute byte range of the run.
    pub span: Range<usize>,
}

#[must_use]
/// Find quote blocks.
///
/// A run continues only on the very next line and only at the same depth;
/// anything else starts a new block.
pub fn extract(excerpt: &Excerpt<'_>) -> Vec<QuoteBlock> {
    let text = excerpt.text();
    let mut blocks = Vec::new();
    // Relative span of the block being accumulated.
    let mut current: Option<(QuoteBlock, Range<usize>)> = None;

    for caps in QUOTE_LINE.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let depth = caps["markers"].matches('>').count();
        let line_text = &caps["text"];

        if let Some((block, span)) = current.as_mut() {
            let adjacent = next_line_start(text, span.end) == Some(whole.start());
            if adjacent && block.depth == depth {
                block.text.push('\n');
                block.text.push_str(line_text);
                span.end = whole.end();
                continue;
            }
        }

        if let Some(done) = current.take() {
            blocks.push(finish(done, excerpt));
        }
        current = Some((
            QuoteBlock {
                depth,
                text: line_text.to_string(),
                position: Position::default(),
                span: 0..0,
            },
            whole.range(),
        ));
    }

    if let Some(done) = current {
        blocks.push(finish(done, excerpt));
    }
    blocks
}

fn finish((mut block, span): (QuoteBlock, Range<usize>), excerpt: &Excerpt<'_>) -> QuoteBlock {
    block.position = excerpt.position(span.clone());
    block.span = excerpt.absolute(span);
    block
}

/// Byte offset where the line after the one ending at `end` begins.
fn next_line_start(text: &str, end: usize) -> Option<usize> {
    text[end..].find('\n').map(|i| end + i + 1)
}

#[cfg(test)]
#[path = "../tests/quote.rs"]
mod tests;
