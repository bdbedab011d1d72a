//! Matching a document's section tree against a schema tree.
//!
//! Both trees are walked one sibling list at a time: the document sections
//! under one parent are matched against the schema entries under the
//! corresponding parent, and each match recurses into its children. Which
//! sibling matcher runs depends on [`SchemaConfig::enforce_order`]; see
//! [`ordered`] and [`unordered`].
//!
//! Structural problems in the document become [`RuleResult`]s and the walk
//! carries on. A schema whose entries overlap on a title present in the
//! document is a different matter: there is no way to decide which entry the
//! section belongs to, so the whole call fails with an [`AmbiguityError`].

mod ordered;
mod unordered;

use crate::diagnostic::{RuleResult, SchemaRule};
use crate::document::Document;
use crate::position::Position;
use crate::schema::{SchemaConfig, SchemaSection};
use crate::section::Section;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error(
    "ambiguous schema: section '{title}' (line {}) matches {}",
    .position.line,
    .entries.join(" and ")
)]
/// A document section matched more than one schema entry at the same level.
pub struct AmbiguityError {
    /// Title of the section that matched several entries.
    pub title: String,
    /// Location of that section's heading.
    pub position: Position,
    /// Descriptions of the conflicting schema entries.
    pub entries: Vec<String>,
}

/// Check `document` against `schema`.
///
/// Top-level entries are matched against the root sections, leaving out any
/// preamble that precedes the first heading.
///
/// # Errors
///
/// Returns an [`AmbiguityError`] if any document section matches two or more
/// sibling schema entries. No diagnostics are returned in that case.
pub fn validate(
    document: &Document,
    schema: &SchemaConfig,
) -> Result<Vec<RuleResult>, AmbiguityError> {
    let top_level: Vec<usize> = document
        .roots()
        .filter(|&index| !document.sections[index].is_preamble())
        .collect();

    let mut validator = Validator {
        document,
        config: schema,
        results: Vec::new(),
    };
    validator.match_siblings(&top_level, &schema.sections)?;

    tracing::debug!(diagnostics = validator.results.len(), "validated document");
    Ok(validator.results)
}

/// Walk state shared by both sibling matchers.
struct Validator<'a> {
    document: &'a Document,
    config: &'a SchemaConfig,
    results: Vec<RuleResult>,
}

impl<'a> Validator<'a> {
    fn match_siblings(
        &mut self,
        sections: &[usize],
        entries: &[SchemaSection],
    ) -> Result<(), AmbiguityError> {
        self.check_ambiguity(sections, entries)?;
        if self.config.enforce_order {
            self.match_ordered(sections, entries)
        } else {
            self.match_unordered(sections, entries)
        }
    }

    /// Match a section's subsections against an entry's children.
    fn descend(&mut self, index: usize, entry: &SchemaSection) -> Result<(), AmbiguityError> {
        let document = self.document;
        self.match_siblings(&document.sections[index].subsections, &entry.children)
    }

    fn section(&self, index: usize) -> &'a Section {
        &self.document.sections[index]
    }

    fn check_ambiguity(
        &self,
        sections: &[usize],
        entries: &[SchemaSection],
    ) -> Result<(), AmbiguityError> {
        for &index in sections {
            let section = self.section(index);
            let matching: Vec<String> = entries
                .iter()
                .filter(|entry| entry.matches(section.title()))
                .map(ToString::to_string)
                .collect();
            if matching.len() > 1 {
                return Err(AmbiguityError {
                    title: section.title().to_string(),
                    position: section.header.position,
                    entries: matching,
                });
            }
        }
        Ok(())
    }

    fn check_level(&mut self, index: usize, entry: &SchemaSection) {
        let section = self.section(index);
        if section.level() != entry.level {
            self.results.push(SchemaRule::WrongLevel.result(
                format!(
                    "Section '{}' has level {}, expected level {}",
                    section.title(),
                    section.level(),
                    entry.level
                ),
                section.header.position,
            ));
        }
    }

    /// Compare the number of sections matched by a repeating entry with its bounds.
    fn check_repeat(&mut self, entry: &SchemaSection, matched: &[usize]) {
        let Some(repeat) = entry.repeat else {
            return;
        };
        let count = matched.len();
        if repeat.allows(count) {
            return;
        }
        if count < repeat.min {
            let position = matched
                .first()
                .map_or_else(Position::default, |&index| self.section(index).header.position);
            self.below_minimum(entry, count, repeat.min, position);
        } else if let Some(max) = repeat.max {
            let excess = self.section(matched[max]);
            self.results.push(SchemaRule::RepeatAboveMaximum.result(
                format!(
                    "Section '{}' occurs {count} times, expected at most {max}",
                    entry.matcher
                ),
                excess.header.position,
            ));
        }
    }

    fn below_minimum(
        &mut self,
        entry: &SchemaSection,
        count: usize,
        min: usize,
        position: Position,
    ) {
        let times = if count == 1 { "time" } else { "times" };
        self.results.push(SchemaRule::RepeatBelowMinimum.result(
            format!(
                "Section '{}' occurs {count} {times}, expected at least {min}",
                entry.matcher
            ),
            position,
        ));
    }

    fn missing(&mut self, entry: &SchemaSection) {
        self.results.push(SchemaRule::MissingSection.result(
            format!("Missing required section '{}'", entry.matcher),
            Position::default(),
        ));
    }

    fn unexpected(&mut self, index: usize) {
        if self.config.allow_extra_sections {
            return;
        }
        let section = self.section(index);
        self.results.push(SchemaRule::UnexpectedSection.result(
            format!("Unexpected section '{}'", section.title()),
            section.header.position,
        ));
    }

    fn out_of_order(&mut self, index: usize, entry: &SchemaSection) {
        let section = self.section(index);
        self.results.push(SchemaRule::OutOfOrder.result(
            format!(
                "Section '{}' is out of order (expected earlier, as {})",
                section.title(),
                entry
            ),
            section.header.position,
        ));
    }
}

#[cfg(test)]
#[path = "tests/validate.rs"]
mod tests;
