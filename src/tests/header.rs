use super::extract;
use crate::extract::Excerpt;
use crate::position::{Locator, Position};

fn titles(text: &str) -> Vec<(u8, String)> {
    let locator = Locator::new(text);
    extract(&Excerpt::whole(&locator))
        .into_iter()
        .map(|(header, _)| (header.level, header.title))
        .collect()
}

#[test]
fn test_levels_and_titles() {
    let text = "# One\n\n## Two\n\n###### Six\n";
    assert_eq!(
        titles(text),
        vec![
            (1, "One".to_string()),
            (2, "Two".to_string()),
            (6, "Six".to_string())
        ]
    );
}

#[test]
fn test_closing_hashes_are_stripped() {
    assert_eq!(titles("## Title ##\n"), vec![(2, "Title".to_string())]);
    assert_eq!(titles("# C# tips\n"), vec![(1, "C# tips".to_string())]);
}

#[test]
fn test_not_headers() {
    assert!(titles("#NoSpace\n").is_empty());
    assert!(titles("####### seven\n").is_empty());
    assert!(titles("    # indented code\n").is_empty());
    assert!(titles("text # mid-line\n").is_empty());
}

#[test]
fn test_header_position_and_span() {
    let text = "intro\n\n## Body\n";
    let locator = Locator::new(text);
    let headers = extract(&Excerpt::whole(&locator));

    assert_eq!(headers.len(), 1);
    let (header, span) = &headers[0];
    assert_eq!(header.position, Position::new(3, 0, 7));
    assert_eq!(span.clone(), 7..14);
}

#[test]
fn test_excerpt_offsets_are_absolute() {
    let text = "skip\n# Title\n";
    let locator = Locator::new(text);
    let excerpt = Excerpt::new(&text[5..], 5, &locator);
    let headers = extract(&excerpt);

    assert_eq!(headers[0].1, 5..12);
    assert_eq!(headers[0].0.position.line, 2);
}
