//! Links in their four spellings: bare URLs, `<bracketed>` autolinks, inline
//! `[text](url)` and reference `[text][label]`.

use crate::extract::reference::{self, ElementRef};
use crate::extract::Excerpt;
use crate::position::Position;
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

// The optional leading `!` lets us see (and skip) images without lookbehind.
static INLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?P<bang>!?)\[(?P<text>[^\]]*)\]\([ \t]*<?(?P<url>[^\s()<>]*)>?(?:[ \t]+"(?P<title>[^"]*)")?[ \t]*\)"#)
        .unwrap()
});

static REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<bang>!?)\[(?P<text>[^\]]*)\]\[(?P<label>[^\]]*)\]").unwrap()
});

static BRACKET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(?P<url>(?:https?|ftp)://[^\s<>]+|mailto:[^\s<>]+)>").unwrap()
});

static BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?:https?|ftp)://[^\s<>()\[\]"'`]+"#).unwrap());

#[derive(Clone, Debug, PartialEq, Eq)]
/// A URL written directly in the text.
pub struct LinkBare {
    /// The URL, trailing sentence punctuation dropped.
    pub url: String,
    /// Location of the URL.
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// An autolink wrapped in angle brackets.
pub struct LinkBracket {
    /// The URL without brackets.
    pub url: String,
    /// Location including the brackets.
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A link with its destination written inline.
pub struct LinkInline {
    /// Link text.
    pub text: String,
    /// Destination.
    pub url: String,
    /// Optional title.
    pub title: Option<String>,
    /// Location of the whole link syntax.
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A link whose destination comes from a reference definition.
pub struct LinkReference {
    /// Link text.
    pub text: String,
    /// Label to resolve; the link text when written as `[text][]`.
    pub label: String,
    /// Location of the whole link syntax.
    pub position: Position,
    /// Definition this link resolved to, if any.
    pub definition: Option<ElementRef>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Links found in one excerpt.
pub struct Links {
    /// Bare URLs.
    pub bare: Vec<LinkBare>,
    /// Angle-bracket autolinks.
    pub bracket: Vec<LinkBracket>,
    /// Inline links.
    pub inline: Vec<LinkInline>,
    /// Reference links.
    pub reference: Vec<LinkReference>,
}

#[must_use]
/// Find every link in the excerpt.
///
/// A bare URL is only reported when it is not part of another link, an image
/// or a reference definition.
pub fn extract(excerpt: &Excerpt<'_>) -> Links {
    let text = excerpt.text();
    let mut claimed: Vec<Range<usize>> = reference::definition_spans(text);
    let mut links = Links::default();

    for caps in INLINE.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        claimed.push(whole.range());
        if !caps["bang"].is_empty() {
            continue;
        }
        links.inline.push(LinkInline {
            text: caps["text"].to_string(),
            url: caps["url"].to_string(),
            title: caps.name("title").map(|m| m.as_str().to_string()),
            position: excerpt.position(whole.range()),
        });
    }

    for caps in REFERENCE.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        claimed.push(whole.range());
        if !caps["bang"].is_empty() {
            continue;
        }
        let link_text = caps["text"].to_string();
        let label = match caps["label"].trim() {
            "" => link_text.clone(),
            label => label.to_string(),
        };
        links.reference.push(LinkReference {
            text: link_text,
            label,
            position: excerpt.position(whole.range()),
            definition: None,
        });
    }

    for caps in BRACKET.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        claimed.push(whole.range());
        links.bracket.push(LinkBracket {
            url: caps["url"].to_string(),
            position: excerpt.position(whole.range()),
        });
    }

    for found in BARE.find_iter(text) {
        let url = found
            .as_str()
            .trim_end_matches(['.', ',', ';', ':', '!', '?']);
        let span = found.start()..found.start() + url.len();
        if claimed.iter().any(|c| c.start < span.end && span.start < c.end) {
            continue;
        }
        links.bare.push(LinkBare {
            url: url.to_string(),
            position: excerpt.position(span),
        });
    }

    links
}

#[cfg(test)]
#[path = "../tests/link.rs"]
mod tests;
