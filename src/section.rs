//! Section representation for parsed markdown documents.
//!
//! A section is a heading plus everything up to the next heading. Sections
//! live in a flat arena owned by the [`Document`](crate::document::Document)
//! and point at each other by index, so the tree can be walked in either
//! direction without shared ownership.

use crate::extract::code::{CodeBlock, InlineCode};
use crate::extract::header::Header;
use crate::extract::image::{ImageInline, ImageReference};
use crate::extract::link::{LinkBare, LinkBracket, LinkInline, LinkReference};
use crate::extract::quote::QuoteBlock;
use crate::extract::reference::ReferenceDefinition;
use crate::extract::table::Table;
use crate::position::Position;
use std::ops::Range;

#[derive(Clone, Debug, PartialEq)]
/// Hierarchical document division with the elements found inside it.
pub struct Section {
    /// Heading that opens the section (synthetic, level 0, for a preamble).
    pub header: Header,
    /// Location of the whole section, heading included.
    pub position: Position,
    /// Absolute byte range of the section.
    pub span: Range<usize>,
    /// Verbatim text of the section.
    pub content_raw: String,
    /// Section text with front matter, quote blocks and fenced code blanked
    /// out. Byte offsets match `content_raw`.
    pub content: String,
    /// Fenced code blocks.
    pub code_blocks: Vec<CodeBlock>,
    /// Inline code spans outside fenced code.
    pub inline_code: Vec<InlineCode>,
    /// Quote blocks outside fenced code.
    pub quote_blocks: Vec<QuoteBlock>,
    /// Pipe tables.
    pub tables: Vec<Table>,
    /// Inline images.
    pub images_inline: Vec<ImageInline>,
    /// Reference images.
    pub images_reference: Vec<ImageReference>,
    /// Bare URLs.
    pub links_bare: Vec<LinkBare>,
    /// Angle-bracket autolinks.
    pub links_bracket: Vec<LinkBracket>,
    /// Inline links.
    pub links_inline: Vec<LinkInline>,
    /// Reference links.
    pub links_reference: Vec<LinkReference>,
    /// Reference definitions.
    pub reference_definitions: Vec<ReferenceDefinition>,
    /// Index of the containing section in the hierarchy.
    pub parent_index: Option<usize>,
    /// Indices of directly nested subsections.
    pub subsections: Vec<usize>,
}

impl Section {
    #[must_use]
    /// Heading text.
    pub fn title(&self) -> &str {
        &self.header.title
    }

    #[must_use]
    /// Heading depth; 0 for the preamble.
    pub fn level(&self) -> u8 {
        self.header.level
    }

    #[must_use]
    /// Whether this section holds text that precedes any heading.
    pub fn is_preamble(&self) -> bool {
        self.header.level == 0
    }

    #[must_use]
    /// Whether no other section contains this one.
    pub fn is_root(&self) -> bool {
        self.parent_index.is_none()
    }
}
