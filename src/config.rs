//! Configuration to acknowledge project preferences as well as set defaults.
//!
//! Specifically, we try to find an mdschema.toml, and if present we load settings from there.
//! This provides the schema location, file extension preferences and front matter strictness.

use facet::Facet;
use std::fs;
use std::path::Path;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "mdschema.toml";

#[derive(Facet, Clone, Debug, PartialEq)]
/// User preferences loaded from mdschema.toml or falling back to defaults.
pub struct Config {
    #[facet(default)]
    /// Path to the YAML schema, when not given on the command line.
    pub schema: Option<String>,
    #[facet(default = vec!["md".to_string()])]
    /// File suffixes to match when scanning directories.
    pub file_extensions: Vec<String>,
    #[facet(default = false)]
    /// Reject documents whose front matter is not a YAML mapping.
    pub strict_front_matter: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema: None,
            file_extensions: vec!["md".to_string()],
            strict_front_matter: false,
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from mdschema.toml if present.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    #[must_use]
    /// Load configuration from `path`, using defaults if it is missing or unreadable.
    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };
        Self::parse(&contents).unwrap_or_else(|| {
            tracing::warn!("ignoring malformed {}", path.display());
            Self::default()
        })
    }

    #[must_use]
    /// Parse TOML settings, filling in defaults for absent keys.
    pub fn parse(contents: &str) -> Option<Self> {
        facet_toml::from_str::<Self>(contents).ok()
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
