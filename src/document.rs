//! Assembles extracted elements into a tree of sections.
//!
//! Parsing runs in three passes over one text: extraction (with front matter,
//! fenced code and quote blocks progressively masked), parent assignment, and
//! reference resolution. Nothing is shared between calls, so parsing the same
//! text twice gives identical documents.

use crate::extract::code::{self, CodeBlock};
use crate::extract::front_matter::{self, FrontMatter, FrontMatterError};
use crate::extract::header::{self, Header};
use crate::extract::quote::{self, QuoteBlock};
use crate::extract::reference::{self, normalize_label, ElementRef, ReferenceDefinition};
use crate::extract::table::Table;
use crate::extract::{image, link, mask, table, Excerpt};
use crate::position::Locator;
use crate::section::Section;
use std::collections::HashMap;
use std::ops::Range;

#[derive(Clone, Copy, Debug, Default)]
/// Knobs for [`Document::parse_with`].
pub struct ParseOptions {
    /// Fail on front matter that is delimited but not a YAML mapping, instead
    /// of treating the document as having none.
    pub strict_front_matter: bool,
}

#[derive(Debug, thiserror::Error)]
/// Parsing failures. Only raised in strict mode; markdown itself never fails.
pub enum ParseError {
    /// The front matter block could not be used.
    #[error(transparent)]
    FrontMatter(#[from] FrontMatterError),
}

#[derive(Clone, Debug, PartialEq)]
/// A parsed markdown document.
pub struct Document {
    /// Front matter, when present and valid.
    pub front_matter: Option<FrontMatter>,
    /// Every section in source order. Sections refer to each other by index.
    pub sections: Vec<Section>,
}

impl Document {
    #[must_use]
    /// Parse a document, treating unusable front matter as absent.
    pub fn parse(text: &str) -> Self {
        let locator = Locator::new(text);
        let front_matter = front_matter::extract(&locator).unwrap_or_else(|err| {
            tracing::debug!("ignoring front matter: {err}");
            None
        });
        Self::build(&locator, front_matter)
    }

    /// Parse a document with explicit options.
    ///
    /// # Errors
    ///
    /// Returns an error in strict mode when the front matter is not a YAML
    /// mapping.
    pub fn parse_with(text: &str, options: ParseOptions) -> Result<Self, ParseError> {
        if !options.strict_front_matter {
            return Ok(Self::parse(text));
        }
        let locator = Locator::new(text);
        let front_matter = front_matter::extract(&locator)?;
        Ok(Self::build(&locator, front_matter))
    }

    fn build(locator: &Locator<'_>, front_matter: Option<FrontMatter>) -> Self {
        let text = locator.text();
        let mut hidden: Vec<Range<usize>> =
            front_matter.iter().map(|fm| fm.span.clone()).collect();
        let unfronted = mask(text, &hidden);

        let code_blocks = code::fenced_blocks(&Excerpt::new(&unfronted, 0, locator));
        hidden.extend(code_blocks.iter().map(|block| block.span.clone()));
        let fenced = mask(text, &hidden);

        let quotes = quote::extract(&Excerpt::new(&fenced, 0, locator));
        hidden.extend(quotes.iter().map(|q| q.span.clone()));
        let content = mask(text, &hidden);

        let headers = header::extract(&Excerpt::new(&fenced, 0, locator));
        let masked = Masked {
            fenced: &fenced,
            content: &content,
        };

        let mut sections: Vec<Section> = section_bounds(&unfronted, headers)
            .into_iter()
            .map(|(header, span)| {
                build_section(locator, &masked, header, span, &code_blocks, &quotes)
            })
            .collect();

        assign_parents(&mut sections);
        resolve_references(&mut sections);

        tracing::debug!(
            sections = sections.len(),
            code_blocks = code_blocks.len(),
            quote_blocks = quotes.len(),
            "built section tree"
        );

        Self {
            front_matter,
            sections,
        }
    }

    /// Indices of sections that no other section contains.
    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        self.sections
            .iter()
            .enumerate()
            .filter(|(_, section)| section.is_root())
            .map(|(index, _)| index)
    }

    #[must_use]
    /// Section at `index`, if it exists.
    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// Direct subsections of the section at `index`.
    pub fn children(&self, index: usize) -> impl Iterator<Item = &Section> + '_ {
        self.sections
            .get(index)
            .into_iter()
            .flat_map(|section| section.subsections.iter())
            .filter_map(|&child| self.sections.get(child))
    }

    /// Every real heading in source order.
    pub fn headers(&self) -> impl Iterator<Item = &Header> + '_ {
        self.sections
            .iter()
            .filter(|section| !section.is_preamble())
            .map(|section| &section.header)
    }

    /// Every table in source order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> + '_ {
        self.sections.iter().flat_map(|section| section.tables.iter())
    }

    #[must_use]
    /// Reference definition behind a handle.
    pub fn definition(&self, handle: ElementRef) -> Option<&ReferenceDefinition> {
        self.sections
            .get(handle.section)?
            .reference_definitions
            .get(handle.index)
    }
}

/// Copies of the document text with progressively more blanked out.
struct Masked<'a> {
    /// Front matter and fenced code hidden.
    fenced: &'a str,
    /// Quote blocks hidden as well.
    content: &'a str,
}

/// Split the text into one span per heading, plus a preamble when non-blank
/// text precedes the first heading (or there is no heading at all).
fn section_bounds(
    unfronted: &str,
    headers: Vec<(Header, Range<usize>)>,
) -> Vec<(Header, Range<usize>)> {
    let len = unfronted.len();
    let first = headers.first().map_or(len, |(_, span)| span.start);
    let mut bounds = Vec::with_capacity(headers.len() + 1);

    if headers.is_empty() || !unfronted[..first].trim().is_empty() {
        bounds.push((Header::synthetic(), 0..first));
    }

    let starts: Vec<usize> = headers.iter().map(|(_, span)| span.start).collect();
    for (i, (header, span)) in headers.into_iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(len);
        bounds.push((header, span.start..end));
    }
    bounds
}

fn build_section(
    locator: &Locator<'_>,
    masked: &Masked<'_>,
    header: Header,
    span: Range<usize>,
    code_blocks: &[CodeBlock],
    quotes: &[QuoteBlock],
) -> Section {
    let fenced = Excerpt::new(&masked.fenced[span.clone()], span.start, locator);
    let content = Excerpt::new(&masked.content[span.clone()], span.start, locator);
    let images = image::extract(&content);
    let links = link::extract(&content);

    Section {
        header,
        position: locator.position(span.start, span.end),
        content_raw: locator.text()[span.clone()].to_string(),
        content: content.text().to_string(),
        code_blocks: code_blocks
            .iter()
            .filter(|block| span.contains(&block.span.start))
            .cloned()
            .collect(),
        inline_code: code::inline_spans(&fenced),
        quote_blocks: quotes
            .iter()
            .filter(|q| span.contains(&q.span.start))
            .cloned()
            .collect(),
        tables: table::extract(&content),
        images_inline: images.inline,
        images_reference: images.reference,
        links_bare: links.bare,
        links_bracket: links.bracket,
        links_inline: links.inline,
        links_reference: links.reference,
        reference_definitions: reference::extract(&content),
        parent_index: None,
        subsections: Vec::new(),
        span,
    }
}

/// Attach each heading to the nearest preceding heading of lower level.
///
/// This yields direct children only, even across skipped levels. The
/// preamble never adopts anything.
fn assign_parents(sections: &mut [Section]) {
    let mut open: Vec<usize> = Vec::new();
    for index in 0..sections.len() {
        if sections[index].is_preamble() {
            continue;
        }
        let level = sections[index].level();
        while open
            .last()
            .is_some_and(|&top| sections[top].level() >= level)
        {
            open.pop();
        }
        if let Some(&parent) = open.last() {
            sections[index].parent_index = Some(parent);
            sections[parent].subsections.push(index);
        }
        open.push(index);
    }
}

/// Point reference links and images at their definitions and record the
/// usages on the definitions. The first definition of a label wins.
fn resolve_references(sections: &mut [Section]) {
    let mut definitions: HashMap<String, ElementRef> = HashMap::new();
    for (section_index, section) in sections.iter().enumerate() {
        for (index, definition) in section.reference_definitions.iter().enumerate() {
            definitions
                .entry(normalize_label(&definition.label))
                .or_insert(ElementRef {
                    section: section_index,
                    index,
                });
        }
    }

    let mut link_usages = Vec::new();
    let mut image_usages = Vec::new();
    for (section_index, section) in sections.iter_mut().enumerate() {
        for (index, link) in section.links_reference.iter_mut().enumerate() {
            link.definition = definitions.get(&normalize_label(&link.label)).copied();
            if let Some(target) = link.definition {
                link_usages.push((target, ElementRef { section: section_index, index }));
            }
        }
        for (index, image) in section.images_reference.iter_mut().enumerate() {
            image.definition = definitions.get(&normalize_label(&image.label)).copied();
            if let Some(target) = image.definition {
                image_usages.push((target, ElementRef { section: section_index, index }));
            }
        }
    }

    for (target, usage) in link_usages {
        sections[target.section].reference_definitions[target.index]
            .usage_links
            .push(usage);
    }
    for (target, usage) in image_usages {
        sections[target.section].reference_definitions[target.index]
            .usage_images
            .push(usage);
    }
}

#[cfg(test)]
#[path = "tests/document.rs"]
mod tests;
