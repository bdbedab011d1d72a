//! Inline (`![alt](url)`) and reference (`![alt][label]`) images.

use crate::extract::reference::ElementRef;
use crate::extract::Excerpt;
use crate::position::Position;
use regex::Regex;
use std::sync::LazyLock;

static INLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"!\[(?P<alt>[^\]]*)\]\([ \t]*<?(?P<url>[^\s()<>]*)>?(?:[ \t]+"(?P<title>[^"]*)")?[ \t]*\)"#)
        .unwrap()
});

static REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[(?P<alt>[^\]]*)\]\[(?P<label>[^\]]*)\]").unwrap());

#[derive(Clone, Debug, PartialEq, Eq)]
/// An image with its destination written inline.
pub struct ImageInline {
    /// Alternative text.
    pub alt: String,
    /// Image source.
    pub url: String,
    /// Optional title.
    pub title: Option<String>,
    /// Location of the whole image syntax.
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// An image whose destination comes from a reference definition.
pub struct ImageReference {
    /// Alternative text.
    pub alt: String,
    /// Label to resolve; the alt text when written as `![alt][]`.
    pub label: String,
    /// Location of the whole image syntax.
    pub position: Position,
    /// Definition this image resolved to, if any.
    pub definition: Option<ElementRef>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Images found in one excerpt.
pub struct Images {
    /// Inline images in source order.
    pub inline: Vec<ImageInline>,
    /// Reference images in source order.
    pub reference: Vec<ImageReference>,
}

#[must_use]
/// Find inline and reference images.
pub fn extract(excerpt: &Excerpt<'_>) -> Images {
    let text = excerpt.text();
    let inline = INLINE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(ImageInline {
                alt: caps["alt"].to_string(),
                url: caps["url"].to_string(),
                title: caps.name("title").map(|m| m.as_str().to_string()),
                position: excerpt.position(whole.range()),
            })
        })
        .collect();

    let reference = REFERENCE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let alt = caps["alt"].to_string();
            let label = match caps["label"].trim() {
                "" => alt.clone(),
                label => label.to_string(),
            };
            Some(ImageReference {
                alt,
                label,
                position: excerpt.position(whole.range()),
                definition: None,
            })
        })
        .collect();

    Images { inline, reference }
}

#[cfg(test)]
#[path = "../tests/image.rs"]
mod tests;
