//! Filter implementations for the entry pipeline.
//!
//! One stage per [`FilterKind`], plus the deck de-duplication stage which is
//! driven by configuration rather than criteria.

pub mod deck;
pub mod favorite;
pub mod group;
pub mod search;
pub mod tag;
pub mod world_info;

// Re-export for convenience
pub use deck::DeckDedupFilter;
pub use favorite::FavoriteFilter;
pub use group::GroupFilter;
pub use search::SearchFilter;
pub use tag::TagFilter;
pub use world_info::WorldInfoSearchFilter;

use crate::criteria::FilterKind;
use crate::traits::Filter;

/// The stage bound to each criteria kind
pub fn filter_for(kind: FilterKind) -> Box<dyn Filter> {
    match kind {
        FilterKind::Search => Box::new(SearchFilter),
        FilterKind::Tag => Box::new(TagFilter),
        FilterKind::Favorite => Box::new(FavoriteFilter),
        FilterKind::Group => Box::new(GroupFilter),
        FilterKind::WorldInfoSearch => Box::new(WorldInfoSearchFilter),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Shared fixtures for the stage tests.

    use crate::config::FilterConfig;
    use crate::criteria::{Criteria, CriteriaStore, FilterKind};
    use crate::traits::FilterContext;
    use catalog::{Entry, TagIndex, Uid};
    use fuzzy::{FuzzySearch, NoFuzzy};
    use std::collections::HashSet;

    /// Fuzzy matcher returning fixed sets, regardless of the term
    #[derive(Default)]
    pub struct FixedFuzzy {
        pub characters: HashSet<i64>,
        pub groups: HashSet<String>,
        pub world_info: HashSet<Uid>,
    }

    impl FuzzySearch for FixedFuzzy {
        fn match_characters(&self, _term: &str) -> HashSet<i64> {
            self.characters.clone()
        }

        fn match_groups(&self, _term: &str) -> HashSet<String> {
            self.groups.clone()
        }

        fn match_world_info(&self, _entries: &[Entry], _term: &str) -> HashSet<Uid> {
            self.world_info.clone()
        }
    }

    /// Owned pieces a `FilterContext` borrows from
    pub struct Fixture {
        pub criteria: CriteriaStore,
        pub tag_index: TagIndex,
        pub fuzzy: Box<dyn FuzzySearch>,
        pub config: FilterConfig,
    }

    impl Fixture {
        pub fn new() -> Self {
            Self {
                criteria: CriteriaStore::default(),
                tag_index: TagIndex::new(),
                fuzzy: Box::new(NoFuzzy),
                config: FilterConfig::default(),
            }
        }

        pub fn with(mut self, kind: FilterKind, value: Criteria) -> Self {
            self.criteria.set(kind, value).unwrap();
            self
        }

        pub fn context(&self) -> FilterContext<'_> {
            FilterContext {
                criteria: &self.criteria,
                tag_index: &self.tag_index,
                fuzzy: self.fuzzy.as_ref(),
                config: &self.config,
            }
        }
    }

    pub fn sample_entries() -> Vec<Entry> {
        vec![
            Entry::character(1, "Alice", "alice.png").with_fav(true),
            Entry::character(2, "Bob", "bob.png"),
            Entry::group("g1", "Alice's Group"),
        ]
    }

    pub fn ids(entries: &[Entry]) -> Vec<String> {
        entries
            .iter()
            .map(|e| match (&e.id, e.uid()) {
                (Some(id), _) => id.to_string(),
                (None, Some(uid)) => format!("uid:{}", uid),
                (None, None) => "?".to_string(),
            })
            .collect()
    }
}
