//! Link reference definitions (`[label]: url "title"`).

use crate::extract::Excerpt;
use crate::position::Position;
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static DEFINITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?m)^ {0,3}\[(?P<label>[^\]]+)\]:[ \t]*<?(?P<url>[^\s<>]+)>?(?:[ \t]+(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)'|\((?P<paren>[^)]*)\)))?[ \t]*\r?$"#,
    )
    .unwrap()
});

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Handle to an element stored in one section of a document.
pub struct ElementRef {
    /// Index of the owning section in the document.
    pub section: usize,
    /// Index of the element within that section's collection.
    pub index: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A reference definition and the references that resolve to it.
pub struct ReferenceDefinition {
    /// Label as written.
    pub label: String,
    /// Destination URL.
    pub url: String,
    /// Optional title.
    pub title: Option<String>,
    /// Location of the definition line.
    pub position: Position,
    /// Reference links using this definition, filled in after the tree is built.
    pub usage_links: Vec<ElementRef>,
    /// Reference images using this definition, filled in after the tree is built.
    pub usage_images: Vec<ElementRef>,
}

#[must_use]
/// Normalise a label for matching: case-folded, inner whitespace collapsed.
pub fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[must_use]
/// Find reference definitions. Footnote definitions (`[^x]:`) are skipped.
pub fn extract(excerpt: &Excerpt<'_>) -> Vec<ReferenceDefinition> {
    DEFINITION
        .captures_iter(excerpt.text())
        .filter(|caps| !caps["label"].starts_with('^'))
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let title = caps
                .name("dq")
                .or_else(|| caps.name("sq"))
                .or_else(|| caps.name("paren"))
                .map(|m| m.as_str().to_string());
            Some(ReferenceDefinition {
                label: caps["label"].trim().to_string(),
                url: caps["url"].to_string(),
                title,
                position: excerpt.position(whole.range()),
                usage_links: Vec::new(),
                usage_images: Vec::new(),
            })
        })
        .collect()
}

/// Relative byte ranges of every definition line, footnote definitions
/// included, so bare URLs inside them are not reported as links.
pub(crate) fn definition_spans(text: &str) -> Vec<Range<usize>> {
    DEFINITION.find_iter(text).map(|m| m.range()).collect()
}

#[cfg(test)]
#[path = "../tests/reference.rs"]
mod tests;
