use super::{validate, AmbiguityError};
use crate::diagnostic::{RuleResult, SchemaRule};
use crate::document::Document;
use crate::position::Position;
use crate::schema::SchemaConfig;
use proptest::prelude::*;

const REPORT: &str = r"
sections:
  - name: R
    children:
      - name: Intro
      - name: Body
";

fn check(schema: &str, text: &str) -> Vec<RuleResult> {
    let schema = SchemaConfig::from_yaml(schema).unwrap();
    validate(&Document::parse(text), &schema).unwrap()
}

fn ambiguity(schema: &str, text: &str) -> AmbiguityError {
    let schema = SchemaConfig::from_yaml(schema).unwrap();
    validate(&Document::parse(text), &schema).unwrap_err()
}

fn rule_ids(results: &[RuleResult]) -> Vec<&str> {
    results.iter().map(|r| r.rule_id.as_str()).collect()
}

#[test]
fn test_matching_document_is_clean() {
    assert!(check(REPORT, "# R\n\n## Intro\n\n## Body\n").is_empty());
}

#[test]
fn test_missing_required_section() {
    let results = check(REPORT, "# R\n\n## Intro\n");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0], SchemaRule::MissingSection);
    assert!(results[0].message.contains("Body"));
    assert_eq!(results[0].position, Position::default());
}

#[test]
fn test_swapped_sections_are_out_of_order() {
    let results = check(REPORT, "# R\n\n## Body\n\n## Intro\n");

    assert_eq!(rule_ids(&results), vec![SchemaRule::OutOfOrder.id()]);
    assert!(results[0].message.contains("'Intro'"));
    assert_eq!(results[0].position.line, 5);
}

#[test]
fn test_pattern_repeat_below_minimum() {
    let schema = "sections:\n  - pattern: 'Procedure [A-Z]: .+'\n    level: 3\n    repeat: {min: 2}\n";
    let results = check(schema, "### Procedure A: Setup\n");

    assert_eq!(rule_ids(&results), vec![SchemaRule::RepeatBelowMinimum.id()]);
    assert_eq!(results[0].position, Position::new(1, 0, 22));
}

#[test]
fn test_repeat_above_maximum_points_at_first_excess() {
    let schema = "sections:\n  - pattern: 'Step \\d+'\n    repeat: {max: 2}\n";
    let results = check(schema, "# Step 1\n# Step 2\n# Step 3\n# Step 4\n");

    assert_eq!(rule_ids(&results), vec![SchemaRule::RepeatAboveMaximum.id()]);
    assert_eq!(results[0].position.line, 3);
    assert!(results[0].message.contains("4 times"));
}

#[test]
fn test_wrong_level() {
    let results = check(REPORT, "# R\n### Intro\n## Body\n");

    assert_eq!(rule_ids(&results), vec![SchemaRule::WrongLevel.id()]);
    assert_eq!(results[0].position.line, 2);
}

#[test]
fn test_unexpected_section() {
    let results = check(REPORT, "# R\n## Intro\n## Extra\n## Body\n");

    assert_eq!(rule_ids(&results), vec![SchemaRule::UnexpectedSection.id()]);
    assert!(results[0].message.contains("'Extra'"));
}

#[test]
fn test_nested_section_without_schema_children_is_unexpected() {
    let results = check(REPORT, "# R\n## Intro\n### Deep\n## Body\n");
    assert_eq!(rule_ids(&results), vec![SchemaRule::UnexpectedSection.id()]);
    assert_eq!(results[0].position.line, 3);
}

#[test]
fn test_extra_sections_allowed() {
    let schema = format!("allow_extra_sections: true\n{REPORT}");
    assert!(check(&schema, "# R\n## Intro\n## Extra\n### Deep\n## Body\n# Tail\n").is_empty());
}

#[test]
fn test_optional_section_may_be_absent() {
    let schema = "sections:\n  - name: A\n  - name: B\n    required: false\n  - name: C\n";
    assert!(check(schema, "# A\n# C\n").is_empty());
}

#[test]
fn test_preamble_is_not_validated() {
    assert!(check(REPORT, "Some intro text.\n\n# R\n## Intro\n## Body\n").is_empty());
}

#[test]
fn test_skipped_repeating_entry_reports_minimum() {
    let schema = "sections:\n  - pattern: 'Step \\d+'\n    repeat: true\n  - name: End\n";
    let results = check(schema, "# End\n");

    assert_eq!(rule_ids(&results), vec![SchemaRule::RepeatBelowMinimum.id()]);
    assert_eq!(results[0].position, Position::default());
}

#[test]
fn test_absent_optional_repeat_is_clean() {
    let schema = "sections:\n  - name: A\n  - pattern: 'Note .+'\n    repeat: {min: 0}\n";
    assert!(check(schema, "# A\n").is_empty());
}

#[test]
fn test_diagnostics_follow_document_order() {
    let schema = r"
sections:
  - name: A
    children:
      - name: A1
  - name: B
    children:
      - name: B1
";
    let results = check(schema, "# A\n## X\n# B\n");
    assert_eq!(
        rule_ids(&results),
        vec![
            SchemaRule::UnexpectedSection.id(),
            SchemaRule::MissingSection.id(),
            SchemaRule::MissingSection.id(),
        ]
    );
    assert!(results[1].message.contains("A1"));
    assert!(results[2].message.contains("B1"));
}

#[test]
fn test_out_of_order_section_is_still_checked_inside() {
    let schema = r"
sections:
  - name: A
    children:
      - name: A1
  - name: B
";
    let results = check(schema, "# B\n# A\n");

    assert_eq!(
        rule_ids(&results),
        vec![SchemaRule::OutOfOrder.id(), SchemaRule::MissingSection.id()]
    );
    assert!(results[1].message.contains("'A1'"));
}

#[test]
fn test_unordered_reports_unclaimed_sections() {
    let schema = format!("enforce_order: false\n{REPORT}");
    let results = check(&schema, "# R\n## Notes\n## Body\n## Intro\n");

    assert_eq!(rule_ids(&results), vec![SchemaRule::UnexpectedSection.id()]);
    assert!(results[0].message.contains("'Notes'"));
    assert_eq!(results[0].position.line, 2);
}

#[test]
fn test_unordered_extra_sections_allowed() {
    let schema = format!("enforce_order: false\nallow_extra_sections: true\n{REPORT}");
    assert!(check(&schema, "# Top\n# R\n## Body\n## Notes\n## Intro\n## Body\n").is_empty());
}

#[test]
fn test_unordered_accepts_any_order() {
    let schema = format!("enforce_order: false\n{REPORT}");
    assert!(check(&schema, "# R\n## Body\n## Intro\n").is_empty());
}

#[test]
fn test_unordered_missing_and_duplicate() {
    let schema = format!("enforce_order: false\n{REPORT}");
    let results = check(&schema, "# R\n## Intro\n## Intro\n");

    assert_eq!(
        rule_ids(&results),
        vec![
            SchemaRule::UnexpectedSection.id(),
            SchemaRule::MissingSection.id(),
        ]
    );
    assert_eq!(results[0].position.line, 3);
}

#[test]
fn test_unordered_counts_scattered_repeats() {
    let scattered = "# Step 1\n# Other\n# Step 2\n";
    let body = "allow_extra_sections: true\nsections:\n  - pattern: 'Step \\d+'\n    repeat: {min: 2}\n";

    assert!(check(&format!("enforce_order: false\n{body}"), scattered).is_empty());
    assert_eq!(
        rule_ids(&check(body, scattered)),
        vec![SchemaRule::RepeatBelowMinimum.id()]
    );
}

#[test]
fn test_level_checks_per_mode() {
    let body = "sections:\n  - pattern: 'Step \\d+'\n    level: 2\n    repeat: true\n";
    let text = "## Step 1\n## Step 2\n# Step 3\n";

    let unordered = check(&format!("enforce_order: false\n{body}"), text);
    assert_eq!(rule_ids(&unordered), vec![SchemaRule::WrongLevel.id()]);
    assert_eq!(unordered[0].position.line, 3);

    assert!(check(body, text).is_empty());
}

const OVERLAPPING: &str = r"
sections:
  - name: Intro
  - pattern: 'Intro|Overview'
";

#[test]
fn test_ambiguity_in_ordered_mode() {
    let err = ambiguity(OVERLAPPING, "# Intro\n");

    assert_eq!(err.title, "Intro");
    assert_eq!(err.position.line, 1);
    assert_eq!(err.entries.len(), 2);
    assert!(err.to_string().contains("'Intro'"));
}

#[test]
fn test_ambiguity_in_unordered_mode() {
    let schema = format!("enforce_order: false\n{OVERLAPPING}");
    let err = ambiguity(&schema, "# Overview\n# Intro\n");
    assert_eq!(err.title, "Intro");
}

#[test]
fn test_ambiguity_in_nested_level() {
    let schema = "sections:\n  - name: R\n    children:\n      - name: Intro\n      - pattern: 'In.*'\n";
    let err = ambiguity(schema, "# R\n## Intro\n");
    assert_eq!(err.position.line, 2);
}

#[test]
fn test_overlap_without_matching_title_is_fine() {
    let results = check(OVERLAPPING, "# Overview\n");
    assert_eq!(rule_ids(&results), vec![SchemaRule::MissingSection.id()]);
}

proptest! {
    #[test]
    fn prop_repeat_bounds(
        count in 0usize..7,
        min in 0usize..4,
        extra in proptest::option::of(0usize..4),
        enforce_order in any::<bool>(),
    ) {
        let max = extra.map(|extra| min + extra);
        let bounds = match max {
            Some(max) => format!("{{min: {min}, max: {max}}}"),
            None => format!("{{min: {min}}}"),
        };
        let schema = format!(
            "enforce_order: {enforce_order}\nsections:\n  - pattern: 'Step \\d+'\n    repeat: {bounds}\n"
        );
        let text: String = (0..count).map(|i| format!("# Step {i}\n")).collect();

        let results = check(&schema, &text);
        let below = results.iter().any(|r| *r == SchemaRule::RepeatBelowMinimum);
        let above = results.iter().any(|r| *r == SchemaRule::RepeatAboveMaximum);

        prop_assert_eq!(below, count < min);
        prop_assert_eq!(above, max.is_some_and(|max| count > max));
        prop_assert!(results.len() <= 1);
    }
}
