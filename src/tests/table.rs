use super::{extract, split_row};
use crate::extract::Excerpt;
use crate::position::{Locator, Position};

fn cells(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

#[test]
fn test_dangling_pipes_parse_best_effort() {
    let text = "| A | B\n-- | -\n| a | b |\n";
    let locator = Locator::new(text);
    let tables = extract(&Excerpt::whole(&locator));

    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].header, cells(&["A", "B"]));
    assert_eq!(tables[0].divider, cells(&["--", "-"]));
    assert_eq!(tables[0].rows, vec![cells(&["a", "b"])]);
    assert_eq!(tables[0].position, Position::new(1, 0, 24));
}

#[test]
fn test_escaped_pipe_stays_in_cell() {
    assert_eq!(split_row(r"| a \| b | c |"), cells(&[r"a \| b", "c"]));
}

#[test]
fn test_alignment_divider() {
    let text = "| Left | Right |\n|:-----|------:|\n| 1 | 2 |\n| 3 | 4 |\n\nafter | text\n";
    let locator = Locator::new(text);
    let tables = extract(&Excerpt::whole(&locator));

    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].divider, cells(&[":-----", "------:"]));
    assert_eq!(tables[0].rows.len(), 2);
    assert_eq!(tables[0].position.line, 1);
}

#[test]
fn test_header_without_divider_is_not_a_table() {
    let text = "a | b\nc | d\n";
    let locator = Locator::new(text);
    assert!(extract(&Excerpt::whole(&locator)).is_empty());
}

#[test]
fn test_thematic_break_is_not_a_divider() {
    let text = "a | b\n---\n";
    let locator = Locator::new(text);
    assert!(extract(&Excerpt::whole(&locator)).is_empty());
}

#[test]
fn test_table_without_data_rows() {
    let text = "text\n\n| h |\n| - |\n";
    let locator = Locator::new(text);
    let tables = extract(&Excerpt::whole(&locator));

    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].header, cells(&["h"]));
    assert!(tables[0].rows.is_empty());
    assert_eq!(tables[0].position.line, 3);
}

#[test]
fn test_two_tables_in_sequence() {
    let text = "| a |\n|---|\n| 1 |\n\n| b |\n|---|\n| 2 |\n";
    let locator = Locator::new(text);
    let tables = extract(&Excerpt::whole(&locator));

    assert_eq!(tables.len(), 2);
    assert_eq!(tables[1].header, cells(&["b"]));
    assert_eq!(tables[1].rows, vec![cells(&["2"])]);
}
