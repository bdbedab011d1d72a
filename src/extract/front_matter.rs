//! YAML front matter delimited by `---` lines at the very start of a document.

use crate::position::{Locator, Position};
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static FRONT_MATTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?ms)\A---[ \t]*\r?\n(?P<body>.*?)^---[ \t]*\r?$").unwrap()
});

#[derive(Clone, Debug, PartialEq)]
/// Parsed front matter block.
pub struct FrontMatter {
    /// Top-level YAML mapping.
    pub content: serde_yaml::Mapping,
    /// Location of the block, delimiters included.
    pub position: Position,
    /// Raw YAML between the delimiters.
    pub string: String,
    /// Absolute byte range of the block.
    pub span: Range<usize>,
}

#[derive(Debug, thiserror::Error)]
/// Front matter was delimited correctly but its body is unusable.
pub enum FrontMatterError {
    /// The body is not valid YAML.
    #[error("invalid front matter YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The body parsed, but to something other than a mapping.
    #[error("front matter must be a YAML mapping")]
    NotAMapping,
}

/// Extract and parse the front matter block at the start of the text.
///
/// Returns `Ok(None)` when the text does not open with a delimited block.
///
/// # Errors
///
/// Returns an error if the block exists but its body is not a YAML mapping.
pub fn extract(locator: &Locator<'_>) -> Result<Option<FrontMatter>, FrontMatterError> {
    let Some(caps) = FRONT_MATTER.captures(locator.text()) else {
        return Ok(None);
    };
    let (Some(whole), Some(body)) = (caps.get(0), caps.name("body")) else {
        return Ok(None);
    };

    let content = match serde_yaml::from_str::<serde_yaml::Value>(body.as_str())? {
        serde_yaml::Value::Mapping(mapping) => mapping,
        serde_yaml::Value::Null => serde_yaml::Mapping::new(),
        _ => return Err(FrontMatterError::NotAMapping),
    };

    Ok(Some(FrontMatter {
        content,
        position: locator.position(whole.start(), whole.end()),
        string: body.as_str().to_string(),
        span: whole.range(),
    }))
}

#[cfg(test)]
#[path = "../tests/front_matter.rs"]
mod tests;
