//! Fenced code blocks and inline code spans.

use crate::extract::{lines_with_offsets, Excerpt};
use crate::position::Position;
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static FENCE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ {0,3}(?P<fence>`{3,}|~{3,})(?P<info>.*)$").unwrap());

static FENCE_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ {0,3}(?P<fence>`{3,}|~{3,})[ \t]*$").unwrap());

static BACKTICK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`+").unwrap());

#[derive(Clone, Debug, PartialEq, Eq)]
/// A ``` or ~~~ fenced block, fences included.
pub struct CodeBlock {
    /// First word of the info string, if any.
    pub language: Option<String>,
    /// Lines between the fences, joined with `\n`.
    pub code: String,
    /// Location of the block from opening fence to closing fence.
    pub position: Position,
    /// Absolute byte range of the block.
    pub span: Range<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A backtick-delimited code span within a line or paragraph.
pub struct InlineCode {
    /// Code between the delimiters.
    pub code: String,
    /// Location of the span, delimiters included.
    pub position: Position,
}

struct OpenFence {
    marker: char,
    width: usize,
    start: usize,
    language: Option<String>,
    lines: Vec<String>,
}

impl OpenFence {
    fn close(self, end: usize, excerpt: &Excerpt<'_>) -> CodeBlock {
        CodeBlock {
            language: self.language,
            code: self.lines.join("\n"),
            position: excerpt.position(self.start..end),
            span: excerpt.absolute(self.start..end),
        }
    }
}

#[must_use]
/// Find every fenced code block. An unclosed fence runs to the end of the text.
pub fn fenced_blocks(excerpt: &Excerpt<'_>) -> Vec<CodeBlock> {
    let mut blocks = Vec::new();
    let mut open: Option<OpenFence> = None;
    let mut last_end = 0;

    for (start, line) in lines_with_offsets(excerpt.text()) {
        let end = start + line.len();
        last_end = end;
        match open.take() {
            Some(mut fence) => {
                let closes = FENCE_CLOSE.captures(line).is_some_and(|caps| {
                    let run = &caps["fence"];
                    run.starts_with(fence.marker) && run.len() >= fence.width
                });
                if closes {
                    blocks.push(fence.close(end, excerpt));
                } else {
                    fence.lines.push(line.to_string());
                    open = Some(fence);
                }
            }
            None => {
                let Some(caps) = FENCE_OPEN.captures(line) else {
                    continue;
                };
                let run = &caps["fence"];
                let info = caps["info"].trim();
                let marker = if run.starts_with('`') { '`' } else { '~' };
                // A backtick fence's info string may not itself contain backticks
                if marker == '`' && info.contains('`') {
                    continue;
                }
                open = Some(OpenFence {
                    marker,
                    width: run.len(),
                    start,
                    language: info.split_whitespace().next().map(str::to_string),
                    lines: Vec::new(),
                });
            }
        }
    }

    if let Some(fence) = open {
        blocks.push(fence.close(last_end, excerpt));
    }
    blocks
}

#[must_use]
/// Find inline code spans.
///
/// A backtick run opens a span closed by the next run of the same length.
/// Spans never cross a blank line; an unmatched run is literal text.
pub fn inline_spans(excerpt: &Excerpt<'_>) -> Vec<InlineCode> {
    let text = excerpt.text();
    let runs: Vec<Range<usize>> = BACKTICK_RUN.find_iter(text).map(|m| m.range()).collect();
    let mut spans = Vec::new();
    let mut i = 0;

    while i < runs.len() {
        let open = &runs[i];
        let width = open.len();
        let closing = runs[i + 1..]
            .iter()
            .position(|run| run.len() == width)
            .map(|offset| i + 1 + offset)
            .filter(|&j| !crosses_blank_line(&text[open.end..runs[j].start]));

        let Some(j) = closing else {
            i += 1;
            continue;
        };

        let inner = &text[open.end..runs[j].start];
        spans.push(InlineCode {
            code: strip_padding(inner).to_string(),
            position: excerpt.position(open.start..runs[j].end),
        });
        i = j + 1;
    }
    spans
}

fn crosses_blank_line(text: &str) -> bool {
    let segments: Vec<&str> = text.split('\n').collect();
    segments.len() > 2
        && segments[1..segments.len() - 1]
            .iter()
            .any(|line| line.trim().is_empty())
}

/// Drop one space of padding from each side when both sides have one.
fn strip_padding(inner: &str) -> &str {
    let padded = inner.len() >= 2 && inner.starts_with(' ') && inner.ends_with(' ');
    if padded && !inner.trim().is_empty() {
        &inner[1..inner.len() - 1]
    } else {
        inner
    }
}

#[cfg(test)]
#[path = "../tests/code.rs"]
mod tests;
