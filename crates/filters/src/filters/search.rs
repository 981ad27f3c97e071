//! Filter entries by name.
//!
//! Two modes, chosen by `FilterConfig::fuzzy_search`:
//! - exact: case-insensitive substring match on the entry name
//! - fuzzy: delegate to the fuzzy matcher for characters and groups

use crate::criteria::{Criteria, FilterKind};
use crate::traits::{Filter, FilterContext};
use catalog::{Entry, EntryId, EntryKind};

/// Keeps entries whose name matches the search criterion.
///
/// ## Algorithm
/// 1. Empty criterion: return the list unchanged
/// 2. Trim and lowercase the term
/// 3. Fuzzy mode: ask the matcher once for characters and once for groups,
///    then keep characters whose integer id and groups whose string id is
///    in the returned set. Other kinds cannot be fuzzy-matched and are dropped.
/// 4. Exact mode: keep entries whose lowercased name contains the term.
///    Nameless entries are dropped.
pub struct SearchFilter;

impl Filter for SearchFilter {
    fn name(&self) -> &str {
        "SearchFilter"
    }

    fn apply(&self, entries: Vec<Entry>, context: &FilterContext<'_>) -> Vec<Entry> {
        let Some(term) = context
            .criteria(FilterKind::Search)
            .and_then(Criteria::search_term)
        else {
            return entries;
        };
        if term.is_empty() {
            return entries;
        }
        let term = term.trim().to_lowercase();

        if context.config.fuzzy_search {
            // The matcher answers for the whole catalog, so intersect
            let characters = context.fuzzy.match_characters(&term);
            let groups = context.fuzzy.match_groups(&term);

            entries
                .into_iter()
                .filter(|entry| match entry.kind {
                    EntryKind::Character => entry
                        .id
                        .as_ref()
                        .and_then(EntryId::as_int)
                        .is_some_and(|id| characters.contains(&id)),
                    EntryKind::Group => entry
                        .id
                        .as_ref()
                        .is_some_and(|id| groups.contains(&id.to_string())),
                    _ => false,
                })
                .collect()
        } else {
            entries
                .into_iter()
                .filter(|entry| {
                    entry
                        .name()
                        .is_some_and(|name| name.to_lowercase().contains(&term))
                })
                .collect()
        }
    }
}
