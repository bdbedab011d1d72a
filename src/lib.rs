//! mdschema: structural parsing of markdown and validation against a section schema.
//!
//! A [`Document`](document::Document) splits markdown into a tree of
//! [`Section`](section::Section)s, each carrying the code, quotes, tables,
//! links and images found in it. A [`SchemaConfig`](schema::SchemaConfig)
//! describes the outline a document should have, and
//! [`validate`](validate::validate) reports where the two disagree.
//!
//! ```
//! use mdschema::document::Document;
//! use mdschema::schema::SchemaConfig;
//! use mdschema::validate::validate;
//!
//! let schema = SchemaConfig::from_yaml("sections:\n  - name: Usage\n").unwrap();
//! let document = Document::parse("# Install\n");
//! let results = validate(&document, &schema).unwrap();
//! assert_eq!(results.len(), 2);
//! ```

pub mod check;
pub mod config;
pub mod diagnostic;
pub mod document;
pub mod extract;
pub mod input;
pub mod position;
pub mod schema;
pub mod section;
pub mod validate;
