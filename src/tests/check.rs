use super::{check_file, load_schema, CheckError};
use crate::diagnostic::SchemaRule;
use crate::document::ParseOptions;
use std::fs;
use tempfile::tempdir;

const SCHEMA: &str = "sections:\n  - name: R\n    children:\n      - name: Intro\n      - name: Body\n";

#[test]
fn test_check_file_reports_diagnostics() {
    let dir = tempdir().unwrap();
    let schema_path = dir.path().join("schema.yaml");
    let doc_path = dir.path().join("doc.md");
    fs::write(&schema_path, SCHEMA).unwrap();
    fs::write(&doc_path, "# R\n\n## Intro\n").unwrap();

    let schema = load_schema(&schema_path).unwrap();
    let results = check_file(&doc_path, &schema, ParseOptions::default()).unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0], SchemaRule::MissingSection);
    assert_eq!(
        results[0].render(&doc_path),
        format!(
            "{}:0:0: [schema.markdown.missing_section] Missing required section 'Body'",
            doc_path.display()
        )
    );
}

#[test]
fn test_bad_schema_names_file() {
    let dir = tempdir().unwrap();
    let schema_path = dir.path().join("schema.yaml");
    fs::write(&schema_path, "sections:\n  - level: 1\n").unwrap();

    let err = load_schema(&schema_path).unwrap_err();
    assert!(matches!(err, CheckError::Schema { .. }));
    assert!(err.to_string().contains("schema.yaml"));
    assert!(err.to_string().contains("sections[0]"));
}

#[test]
fn test_unreadable_document() {
    let dir = tempdir().unwrap();
    let schema = crate::schema::SchemaConfig::from_yaml(SCHEMA).unwrap();
    let err = check_file(&dir.path().join("missing.md"), &schema, ParseOptions::default()).unwrap_err();
    assert!(matches!(err, CheckError::Io { .. }));
}

#[test]
fn test_strict_mode_rejects_front_matter() {
    let dir = tempdir().unwrap();
    let doc_path = dir.path().join("doc.md");
    fs::write(&doc_path, "---\njust words\n---\n# R\n## Intro\n## Body\n").unwrap();
    let schema = crate::schema::SchemaConfig::from_yaml(SCHEMA).unwrap();

    assert!(check_file(&doc_path, &schema, ParseOptions::default()).unwrap().is_empty());
    let strict = ParseOptions {
        strict_front_matter: true,
    };
    assert!(matches!(
        check_file(&doc_path, &schema, strict),
        Err(CheckError::Parse { .. })
    ));
}

#[test]
fn test_ambiguity_is_an_error() {
    let dir = tempdir().unwrap();
    let doc_path = dir.path().join("doc.md");
    fs::write(&doc_path, "# Intro\n").unwrap();
    let schema = crate::schema::SchemaConfig::from_yaml(
        "sections:\n  - name: Intro\n  - pattern: 'I.*'\n",
    )
    .unwrap();

    assert!(matches!(
        check_file(&doc_path, &schema, ParseOptions::default()),
        Err(CheckError::Ambiguity { .. })
    ));
}
