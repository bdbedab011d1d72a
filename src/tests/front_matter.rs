use super::{extract, FrontMatterError};
use crate::position::{Locator, Position};

#[test]
fn test_front_matter_parsed_into_mapping() {
    let text = "---\ntitle: Report\ntags: [a, b]\n---\n# Heading\n";
    let locator = Locator::new(text);
    let front_matter = extract(&locator).unwrap().unwrap();

    assert_eq!(
        front_matter.content.get("title").and_then(|v| v.as_str()),
        Some("Report")
    );
    assert_eq!(front_matter.string, "title: Report\ntags: [a, b]\n");
    assert_eq!(front_matter.position.line, 1);
    assert_eq!(front_matter.span, 0..34);
}

#[test]
fn test_empty_front_matter_is_empty_mapping() {
    let text = "---\n---\nbody";
    let locator = Locator::new(text);
    let front_matter = extract(&locator).unwrap().unwrap();

    assert!(front_matter.content.is_empty());
    assert_eq!(front_matter.position, Position::new(1, 0, 7));
}

#[test]
fn test_front_matter_must_start_at_offset_zero() {
    let text = "\n---\ntitle: x\n---\n";
    let locator = Locator::new(text);
    assert!(extract(&locator).unwrap().is_none());
}

#[test]
fn test_scalar_front_matter_is_rejected() {
    let text = "---\njust words\n---\n";
    let locator = Locator::new(text);
    assert!(matches!(
        extract(&locator),
        Err(FrontMatterError::NotAMapping)
    ));
}

#[test]
fn test_invalid_yaml_is_an_error() {
    let text = "---\nkey: [unclosed\n---\n";
    let locator = Locator::new(text);
    assert!(matches!(extract(&locator), Err(FrontMatterError::Yaml(_))));
}

#[test]
fn test_closing_delimiter_must_start_a_line() {
    let text = "---\na: b---\n";
    let locator = Locator::new(text);
    assert!(extract(&locator).unwrap().is_none());
}
