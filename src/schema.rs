//! The expected outline of a document, loaded from YAML.
//!
//! A schema is a tree of [`SchemaSection`]s, each naming (or pattern-matching)
//! a heading at a given level. Everything about the schema is checked while
//! loading, so the validator can assume a well-formed tree.
//!
//! ```yaml
//! enforce_order: true
//! allow_extra_sections: false
//! sections:
//!   - name: Report
//!     children:
//!       - name: Introduction
//!       - pattern: "Procedure [A-Z]: .+"
//!         repeat: { min: 1, max: 5 }
//!       - name: Appendix
//!         required: false
//! ```

use regex::Regex;
use serde::Deserialize;
use std::fmt;

/// Deepest heading level markdown can express.
pub const MAX_LEVEL: u8 = 6;

#[derive(Clone, Debug)]
/// How a schema entry recognises a heading.
pub enum Matcher {
    /// Exact, case-sensitive title.
    Name(String),
    /// Regular expression that must match the whole title.
    Pattern(Pattern),
}

#[derive(Clone, Debug)]
/// A compiled title pattern, anchored at both ends.
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile `source` so that it only accepts full matches.
    ///
    /// `source` must be a valid pattern by itself, not just once wrapped, so
    /// that it cannot close the anchoring group early.
    ///
    /// # Errors
    ///
    /// Returns the regex error if `source` is not a valid pattern.
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Regex::new(source)?;
        Ok(Self {
            source: source.to_string(),
            regex: Regex::new(&format!("^(?:{source})$"))?,
        })
    }

    #[must_use]
    /// The pattern as written in the schema.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    #[must_use]
    /// Whether the whole of `title` matches.
    pub fn is_match(&self, title: &str) -> bool {
        self.regex.is_match(title)
    }
}

impl Matcher {
    #[must_use]
    /// Whether a heading with this title is described by the matcher.
    pub fn matches(&self, title: &str) -> bool {
        match self {
            Self::Name(name) => name == title,
            Self::Pattern(pattern) => pattern.is_match(title),
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{name}"),
            Self::Pattern(pattern) => write!(f, "/{}/", pattern.as_str()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Occurrence bounds for a repeating entry.
pub struct Repeat {
    /// Fewest consecutive matches allowed.
    pub min: usize,
    /// Most matches allowed, unbounded when `None`.
    pub max: Option<usize>,
}

impl Repeat {
    #[must_use]
    /// Whether `count` occurrences satisfy the bounds.
    pub fn allows(&self, count: usize) -> bool {
        count >= self.min && self.max.is_none_or(|max| count <= max)
    }
}

#[derive(Clone, Debug)]
/// One node of the expected outline.
pub struct SchemaSection {
    /// Heading level the matching section must have.
    pub level: u8,
    /// How matching headings are recognised.
    pub matcher: Matcher,
    /// Whether the section must be present.
    pub required: bool,
    /// Bounds when the section may repeat; `None` for a single occurrence.
    pub repeat: Option<Repeat>,
    /// Expected subsections.
    pub children: Vec<SchemaSection>,
}

impl SchemaSection {
    #[must_use]
    /// Whether a heading with this title belongs to this entry.
    pub fn matches(&self, title: &str) -> bool {
        self.matcher.matches(title)
    }

    #[must_use]
    /// Whether this entry may match several consecutive sections.
    pub fn is_repeating(&self) -> bool {
        self.repeat.is_some()
    }

    #[must_use]
    /// Minimum occurrences when repeating with a non-zero minimum.
    pub fn required_repeats(&self) -> Option<usize> {
        self.repeat.map(|r| r.min).filter(|&min| min > 0)
    }
}

impl fmt::Display for SchemaSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (level {})", self.matcher, self.level)
    }
}

#[derive(Clone, Debug)]
/// A loaded schema.
pub struct SchemaConfig {
    /// Whether sibling sections must follow the declared order.
    pub enforce_order: bool,
    /// Whether sections not named by the schema are tolerated.
    pub allow_extra_sections: bool,
    /// Expected top-level sections.
    pub sections: Vec<SchemaSection>,
}

#[derive(Debug, thiserror::Error)]
/// A schema that cannot be used. Always raised at load time.
pub enum SchemaError {
    /// The text is not valid YAML or has the wrong shape.
    #[error("invalid schema: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An entry gives neither `name` nor `pattern`.
    #[error("{path}: section needs a `name` or a `pattern`")]
    MissingMatcher {
        /// Location of the entry in the schema.
        path: String,
    },

    /// An entry gives both `name` and `pattern`.
    #[error("{path}: section cannot have both `name` and `pattern`")]
    ConflictingMatcher {
        /// Location of the entry in the schema.
        path: String,
    },

    /// A `pattern` does not compile.
    #[error("{path}: invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// Location of the entry in the schema.
        path: String,
        /// The pattern as written.
        pattern: String,
        /// Why it failed to compile.
        source: regex::Error,
    },

    /// A level is not deeper than its parent's, or deeper than markdown allows.
    #[error("{path}: level {level} must be greater than {parent_level} and at most 6")]
    InvalidLevel {
        /// Location of the entry in the schema.
        path: String,
        /// Level given for the entry.
        level: i64,
        /// Level of the enclosing entry (0 at the top).
        parent_level: u8,
    },

    /// A repeat bound is not an integer.
    #[error("{path}: repeat `{bound}` must be an integer, got `{value}`")]
    NonIntegerRepeat {
        /// Location of the entry in the schema.
        path: String,
        /// `min` or `max`.
        bound: &'static str,
        /// The offending value, rendered as YAML.
        value: String,
    },

    /// A repeat bound is negative.
    #[error("{path}: repeat `{bound}` must not be negative, got {value}")]
    NegativeRepeat {
        /// Location of the entry in the schema.
        path: String,
        /// `min` or `max`.
        bound: &'static str,
        /// The offending value.
        value: i64,
    },

    /// `max` is smaller than `min`.
    #[error("{path}: repeat max {max} is less than min {min}")]
    InvertedRepeat {
        /// Location of the entry in the schema.
        path: String,
        /// Lower bound.
        min: usize,
        /// Upper bound.
        max: usize,
    },
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default = "default_true")]
    enforce_order: bool,
    #[serde(default)]
    allow_extra_sections: bool,
    #[serde(default)]
    sections: Vec<RawSection>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSection {
    name: Option<String>,
    pattern: Option<String>,
    level: Option<i64>,
    #[serde(default = "default_true")]
    required: bool,
    repeat: Option<RawRepeat>,
    #[serde(default, alias = "sections")]
    children: Vec<RawSection>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRepeat {
    Flag(bool),
    Bounds(RawBounds),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBounds {
    min: Option<serde_yaml::Value>,
    max: Option<serde_yaml::Value>,
}

fn default_true() -> bool {
    true
}

impl SchemaConfig {
    /// Load and validate a schema from YAML.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: malformed YAML, a missing or doubled
    /// matcher, a bad pattern, a bad level, or bad repeat bounds.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        let raw: RawConfig = serde_yaml::from_str(yaml)?;
        let sections = raw
            .sections
            .into_iter()
            .enumerate()
            .map(|(i, section)| convert(section, 0, &format!("sections[{i}]")))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            entries = sections.len(),
            enforce_order = raw.enforce_order,
            "loaded schema"
        );

        Ok(Self {
            enforce_order: raw.enforce_order,
            allow_extra_sections: raw.allow_extra_sections,
            sections,
        })
    }
}

fn convert(raw: RawSection, parent_level: u8, path: &str) -> Result<SchemaSection, SchemaError> {
    let matcher = match (raw.name, raw.pattern) {
        (Some(name), None) => Matcher::Name(name),
        (None, Some(pattern)) => {
            let compiled =
                Pattern::new(&pattern).map_err(|source| SchemaError::InvalidPattern {
                    path: path.to_string(),
                    pattern: pattern.clone(),
                    source,
                })?;
            Matcher::Pattern(compiled)
        }
        (Some(_), Some(_)) => {
            return Err(SchemaError::ConflictingMatcher {
                path: path.to_string(),
            })
        }
        (None, None) => {
            return Err(SchemaError::MissingMatcher {
                path: path.to_string(),
            })
        }
    };

    let requested = raw.level.unwrap_or(i64::from(parent_level) + 1);
    let level = u8::try_from(requested)
        .ok()
        .filter(|&level| level > parent_level && level <= MAX_LEVEL)
        .ok_or_else(|| SchemaError::InvalidLevel {
            path: path.to_string(),
            level: requested,
            parent_level,
        })?;

    let repeat = match raw.repeat {
        None | Some(RawRepeat::Flag(false)) => None,
        Some(RawRepeat::Flag(true)) => Some(Repeat { min: 1, max: None }),
        Some(RawRepeat::Bounds(RawBounds { min, max })) => {
            let min = min
                .map(|value| repeat_bound(&value, "min", path))
                .transpose()?
                .unwrap_or(1);
            let max = max
                .map(|value| repeat_bound(&value, "max", path))
                .transpose()?;
            if let Some(max) = max.filter(|&max| max < min) {
                return Err(SchemaError::InvertedRepeat {
                    path: path.to_string(),
                    min,
                    max,
                });
            }
            Some(Repeat { min, max })
        }
    };

    let children = raw
        .children
        .into_iter()
        .enumerate()
        .map(|(i, child)| convert(child, level, &format!("{path}.children[{i}]")))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SchemaSection {
        level,
        matcher,
        required: raw.required,
        repeat,
        children,
    })
}

fn repeat_bound(
    value: &serde_yaml::Value,
    bound: &'static str,
    path: &str,
) -> Result<usize, SchemaError> {
    let Some(number) = value.as_i64() else {
        return Err(SchemaError::NonIntegerRepeat {
            path: path.to_string(),
            bound,
            value: serde_yaml::to_string(value)
                .map_or_else(|_| format!("{value:?}"), |s| s.trim().to_string()),
        });
    };
    usize::try_from(number).map_err(|_| SchemaError::NegativeRepeat {
        path: path.to_string(),
        bound,
        value: number,
    })
}

#[cfg(test)]
#[path = "tests/schema.rs"]
mod tests;
