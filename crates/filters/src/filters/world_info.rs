//! Filter world-info records through the fuzzy matcher.

use crate::criteria::{Criteria, FilterKind};
use crate::traits::{Filter, FilterContext};
use catalog::Entry;

/// Keeps world-info records matching the world-info search term.
///
/// Records are addressed by `uid`; anything without one is dropped once a
/// term is set. The matcher sees the whole incoming list.
pub struct WorldInfoSearchFilter;

impl Filter for WorldInfoSearchFilter {
    fn name(&self) -> &str {
        "WorldInfoSearchFilter"
    }

    fn apply(&self, entries: Vec<Entry>, context: &FilterContext<'_>) -> Vec<Entry> {
        let Some(term) = context
            .criteria(FilterKind::WorldInfoSearch)
            .and_then(Criteria::world_info_term)
        else {
            return entries;
        };
        if term.is_empty() {
            return entries;
        }

        let matches = context.fuzzy.match_world_info(&entries, term);
        entries
            .into_iter()
            .filter(|entry| entry.uid().is_some_and(|uid| matches.contains(&uid)))
            .collect()
    }
}
