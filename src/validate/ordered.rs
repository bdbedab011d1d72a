//! Sibling matching when the schema's declaration order is enforced.
//!
//! Two cursors advance through the document sections and the schema entries.
//! When a section matches an entry further along, the entries in between are
//! provisionally skipped: required ones are parked so a later section can
//! still claim them (reported as out of order) instead of as missing.

use super::{AmbiguityError, Validator};
use crate::position::Position;
use crate::schema::SchemaSection;

impl Validator<'_> {
    pub(super) fn match_ordered(
        &mut self,
        sections: &[usize],
        entries: &[SchemaSection],
    ) -> Result<(), AmbiguityError> {
        let mut doc_ptr = 0;
        let mut schema_ptr = 0;
        let mut skipped_required: Vec<&SchemaSection> = Vec::new();

        while let Some(&index) = sections.get(doc_ptr) {
            let title = self.section(index).title();

            if let Some(queued) = skipped_required.iter().position(|entry| entry.matches(title)) {
                let entry = skipped_required.remove(queued);
                tracing::debug!(title, %entry, "recovered skipped entry");
                self.out_of_order(index, entry);
                self.descend(index, entry)?;
                doc_ptr += 1;
                continue;
            }

            let Some(entry) = entries.get(schema_ptr) else {
                self.unexpected(index);
                doc_ptr += 1;
                continue;
            };

            if entry.matches(title) {
                self.check_level(index, entry);
                if entry.is_repeating() {
                    let run = sections[doc_ptr..]
                        .iter()
                        .take_while(|&&member| entry.matches(self.section(member).title()))
                        .count();
                    let matched = &sections[doc_ptr..doc_ptr + run];
                    for &member in matched {
                        self.descend(member, entry)?;
                    }
                    self.check_repeat(entry, matched);
                    doc_ptr += run;
                } else {
                    self.descend(index, entry)?;
                    doc_ptr += 1;
                }
                schema_ptr += 1;
                continue;
            }

            let ahead = entries[schema_ptr + 1..]
                .iter()
                .position(|candidate| candidate.matches(title));
            let Some(offset) = ahead else {
                self.unexpected(index);
                doc_ptr += 1;
                continue;
            };

            let found = schema_ptr + 1 + offset;
            for skipped in &entries[schema_ptr..found] {
                tracing::debug!(title, entry = %skipped, "skipping entry");
                if let Some(min) = skipped.required_repeats() {
                    self.below_minimum(skipped, 0, min, Position::default());
                } else if skipped.required {
                    skipped_required.push(skipped);
                }
            }
            schema_ptr = found;
        }

        for entry in skipped_required {
            self.missing(entry);
        }
        for entry in entries.iter().skip(schema_ptr) {
            if let Some(min) = entry.required_repeats() {
                self.below_minimum(entry, 0, min, Position::default());
            } else if entry.required && !entry.is_repeating() {
                self.missing(entry);
            }
        }
        Ok(())
    }
}
