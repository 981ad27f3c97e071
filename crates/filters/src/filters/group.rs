//! Filter to keep only group entries.

use crate::criteria::{Criteria, FilterKind};
use crate::traits::{Filter, FilterContext};
use catalog::{Entry, EntryKind};

pub struct GroupFilter;

impl Filter for GroupFilter {
    fn name(&self) -> &str {
        "GroupFilter"
    }

    fn apply(&self, entries: Vec<Entry>, context: &FilterContext<'_>) -> Vec<Entry> {
        let enabled = context
            .criteria(FilterKind::Group)
            .and_then(Criteria::group)
            .unwrap_or(false);
        if !enabled {
            return entries;
        }

        entries
            .into_iter()
            .filter(|entry| entry.kind == EntryKind::Group)
            .collect()
    }
}
