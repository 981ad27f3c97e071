//! Filter entries by selected and excluded tags.

use crate::criteria::{Criteria, FilterKind, TagSelection};
use crate::traits::{Filter, FilterContext};
use catalog::{Entry, TagIndex};

/// Keeps entries whose tags satisfy the tag selection.
///
/// ## Algorithm
/// For each entry, resolve its tags through the tag index (characters by
/// avatar, everything else by stringified id), then:
/// 1. Carries ANY excluded tag: drop, whatever else it matches
/// 2. Otherwise, if tags are selected: keep only if it carries ALL of them
/// 3. Otherwise: keep
///
/// Selected tags always combine with AND, so each added tag narrows the list.
pub struct TagFilter;

impl Filter for TagFilter {
    fn name(&self) -> &str {
        "TagFilter"
    }

    fn apply(&self, entries: Vec<Entry>, context: &FilterContext<'_>) -> Vec<Entry> {
        let Some(selection) = context
            .criteria(FilterKind::Tag)
            .and_then(Criteria::tag_selection)
        else {
            return entries;
        };
        if selection.is_empty() {
            return entries;
        }

        entries
            .into_iter()
            .filter(|entry| matches_selection(selection, context.tag_index, entry))
            .collect()
    }
}

/// Whether `entry` passes `selection`. An entry absent from the index has
/// no tags: it passes exclusion and fails any non-empty selection.
pub fn matches_selection(selection: &TagSelection, index: &TagIndex, entry: &Entry) -> bool {
    let excluded = selection
        .excluded()
        .iter()
        .any(|tag| index.entry_has_tag(entry, tag));
    if excluded {
        return false;
    }

    selection
        .selected()
        .iter()
        .all(|tag| index.entry_has_tag(entry, tag))
}
