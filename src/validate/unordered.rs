//! Sibling matching when entries may appear in any order.

use super::{AmbiguityError, Validator};
use crate::schema::SchemaSection;

impl Validator<'_> {
    pub(super) fn match_unordered(
        &mut self,
        sections: &[usize],
        entries: &[SchemaSection],
    ) -> Result<(), AmbiguityError> {
        let mut claimed = vec![false; sections.len()];

        for entry in entries {
            let mut matched = Vec::new();
            for (slot, &index) in sections.iter().enumerate() {
                if entry.matches(self.section(index).title()) {
                    claimed[slot] = true;
                    matched.push(index);
                }
            }

            if entry.is_repeating() {
                for &index in &matched {
                    self.check_level(index, entry);
                    self.descend(index, entry)?;
                }
                self.check_repeat(entry, &matched);
            } else if let Some((&first, duplicates)) = matched.split_first() {
                self.check_level(first, entry);
                self.descend(first, entry)?;
                for &duplicate in duplicates {
                    tracing::debug!(%entry, "duplicate match for single entry");
                    self.unexpected(duplicate);
                }
            } else if entry.required {
                self.missing(entry);
            }
        }

        for (&index, taken) in sections.iter().zip(claimed) {
            if !taken {
                self.unexpected(index);
            }
        }
        Ok(())
    }
}
