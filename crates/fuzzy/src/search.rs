//! The fuzzy-search seam consumed by the search filters.

use catalog::{Entry, Uid};
use std::collections::HashSet;

/// Approximate matching over the catalog, delegated by the search filters.
///
/// Implementations answer for their whole candidate universe, not for the
/// list currently being filtered: callers must intersect the returned sets
/// with their own entries rather than assume the two line up.
///
/// `Send + Sync` lets one matcher be shared by every filter surface.
pub trait FuzzySearch: Send + Sync {
    /// Integer ids of characters whose name matches `term`
    fn match_characters(&self, term: &str) -> HashSet<i64>;

    /// String ids of groups whose name matches `term`
    fn match_groups(&self, term: &str) -> HashSet<String>;

    /// Uids of the world-info records in `entries` that match `term`
    fn match_world_info(&self, entries: &[Entry], term: &str) -> HashSet<Uid>;
}

/// Matcher that never matches anything.
///
/// Used when no fuzzy backend is wired in; with fuzzy mode enabled every
/// searched entry is filtered out.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFuzzy;

impl FuzzySearch for NoFuzzy {
    fn match_characters(&self, _term: &str) -> HashSet<i64> {
        HashSet::new()
    }

    fn match_groups(&self, _term: &str) -> HashSet<String> {
        HashSet::new()
    }

    fn match_world_info(&self, _entries: &[Entry], _term: &str) -> HashSet<Uid> {
        HashSet::new()
    }
}
