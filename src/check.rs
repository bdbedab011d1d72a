//! Checking files on disk: read, parse, validate.

use crate::diagnostic::RuleResult;
use crate::document::{Document, ParseError, ParseOptions};
use crate::schema::{SchemaConfig, SchemaError};
use crate::validate::{validate, AmbiguityError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
/// A file that could not be checked at all.
pub enum CheckError {
    /// The file could not be read.
    #[error("{}: {source}", path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying failure.
        source: io::Error,
    },

    /// The schema file is unusable.
    #[error("{}: {source}", path.display())]
    Schema {
        /// Schema file being loaded.
        path: PathBuf,
        /// What is wrong with it.
        source: SchemaError,
    },

    /// The document's front matter was rejected in strict mode.
    #[error("{}: {source}", path.display())]
    Parse {
        /// Document being parsed.
        path: PathBuf,
        /// What is wrong with it.
        source: ParseError,
    },

    /// The schema cannot classify one of the document's sections.
    #[error("{}: {source}", path.display())]
    Ambiguity {
        /// Document being validated.
        path: PathBuf,
        /// The conflicting entries.
        source: AmbiguityError,
    },
}

/// Read and load a YAML schema.
///
/// # Errors
///
/// Returns [`CheckError::Io`] if the file cannot be read and
/// [`CheckError::Schema`] if its contents are not a valid schema.
pub fn load_schema(path: &Path) -> Result<SchemaConfig, CheckError> {
    let yaml = fs::read_to_string(path).map_err(|source| CheckError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    SchemaConfig::from_yaml(&yaml).map_err(|source| CheckError::Schema {
        path: path.to_path_buf(),
        source,
    })
}

/// Check one markdown file against `schema`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, its front matter is rejected
/// in strict mode, or the schema is ambiguous for it.
pub fn check_file(
    path: &Path,
    schema: &SchemaConfig,
    options: ParseOptions,
) -> Result<Vec<RuleResult>, CheckError> {
    let text = fs::read_to_string(path).map_err(|source| CheckError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let document = Document::parse_with(&text, options).map_err(|source| CheckError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let results = validate(&document, schema).map_err(|source| CheckError::Ambiguity {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), diagnostics = results.len(), "checked file");
    Ok(results)
}

#[cfg(test)]
#[path = "tests/check.rs"]
mod tests;
