//! Diagnostics produced while checking a document.
//!
//! A [`RuleResult`] is deliberately generic (a rule id string, a message and a
//! position) so lint rules living outside this crate can report through the
//! same channel. The schema validator's own rules are enumerated by
//! [`SchemaRule`].

use crate::position::Position;
use serde::Serialize;
use std::fmt;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// One finding against a document.
pub struct RuleResult {
    /// Identifier of the rule that produced the finding.
    pub rule_id: String,
    /// Human-readable explanation.
    pub message: String,
    /// Where the finding applies; all zeros when it has no anchor.
    pub position: Position,
}

impl RuleResult {
    #[must_use]
    /// Build a finding for any rule id.
    pub fn new(rule_id: impl Into<String>, message: impl Into<String>, position: Position) -> Self {
        Self {
            rule_id: rule_id.into(),
            message: message.into(),
            position,
        }
    }

    #[must_use]
    /// Render as `path:line:offset: [rule_id] message`.
    pub fn render(&self, path: &Path) -> String {
        format!(
            "{}:{}:{}: [{}] {}",
            path.display(),
            self.position.line,
            self.position.offset,
            self.rule_id,
            self.message
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Rules enforced by schema validation.
pub enum SchemaRule {
    /// A required section is absent.
    MissingSection,
    /// A section is not described by the schema.
    UnexpectedSection,
    /// A section appears after one the schema places later.
    OutOfOrder,
    /// A section's heading level differs from the schema's.
    WrongLevel,
    /// A repeating section occurs fewer times than allowed.
    RepeatBelowMinimum,
    /// A repeating section occurs more times than allowed.
    RepeatAboveMaximum,
}

impl SchemaRule {
    #[must_use]
    /// Stable identifier reported in [`RuleResult::rule_id`].
    pub const fn id(self) -> &'static str {
        match self {
            Self::MissingSection => "schema.markdown.missing_section",
            Self::UnexpectedSection => "schema.markdown.unexpected_section",
            Self::OutOfOrder => "schema.markdown.out_of_order",
            Self::WrongLevel => "schema.markdown.wrong_level",
            Self::RepeatBelowMinimum => "schema.markdown.repeat_below_minimum",
            Self::RepeatAboveMaximum => "schema.markdown.repeat_above_maximum",
        }
    }

    #[must_use]
    /// Build a finding for this rule.
    pub fn result(self, message: impl Into<String>, position: Position) -> RuleResult {
        RuleResult::new(self.id(), message, position)
    }
}

impl fmt::Display for SchemaRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl PartialEq<SchemaRule> for RuleResult {
    fn eq(&self, rule: &SchemaRule) -> bool {
        self.rule_id == rule.id()
    }
}

#[cfg(test)]
#[path = "tests/diagnostic.rs"]
mod tests;
