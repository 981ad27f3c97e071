//! Filter to keep only favorite entries.

use crate::criteria::{Criteria, FilterKind};
use crate::traits::{Filter, FilterContext};
use catalog::Entry;

/// Keeps favorites when the favorite criterion is on.
///
/// The legacy `"true"` string form of the flag is normalized at ingestion,
/// so this only reads a boolean.
pub struct FavoriteFilter;

impl Filter for FavoriteFilter {
    fn name(&self) -> &str {
        "FavoriteFilter"
    }

    fn apply(&self, entries: Vec<Entry>, context: &FilterContext<'_>) -> Vec<Entry> {
        let enabled = context
            .criteria(FilterKind::Favorite)
            .and_then(Criteria::favorite)
            .unwrap_or(false);
        if !enabled {
            return entries;
        }

        entries
            .into_iter()
            .filter(|entry| entry.is_favorite())
            .collect()
    }
}
