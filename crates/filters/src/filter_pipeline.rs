//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the FilterPipeline struct that chains filters
//! together as a left fold over the entry list.

use crate::criteria::FilterKind;
use crate::filters::{DeckDedupFilter, filter_for};
use crate::traits::{Filter, FilterContext};
use catalog::Entry;
use tracing;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(SearchFilter)
///     .add_filter(TagFilter)
///     .add_filter(DeckDedupFilter);
///
/// let filtered = pipeline.apply(entries, &context);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// The standard pipeline for a set of registered kinds: one stage per
    /// kind in the given order, then deck de-duplication last so it only
    /// sees decks and characters that survived every criterion.
    pub fn for_kinds(kinds: impl IntoIterator<Item = FilterKind>) -> Self {
        let mut pipeline = Self::new();
        for kind in kinds {
            pipeline.filters.push(filter_for(kind));
        }
        pipeline.add_filter(DeckDedupFilter)
    }

    /// Add a filter to the pipeline (builder pattern).
    ///
    /// # Arguments
    /// * `filter` - Any type implementing the Filter trait
    ///
    /// # Returns
    /// Self for method chaining
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Stage names in execution order
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|filter| filter.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence to the entries.
    ///
    /// ## Algorithm
    /// 1. Start with the input entries
    /// 2. For each filter in order:
    ///    a. Log filter name and input count
    ///    b. Apply the filter
    ///    c. Log output count
    /// 3. Return final filtered set
    ///
    /// With no filters the input comes back as is.
    pub fn apply(&self, entries: Vec<Entry>, context: &FilterContext<'_>) -> Vec<Entry> {
        let mut current = entries;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, context);
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::Criteria;
    use crate::filters::test_support::*;
    use crate::filters::{FavoriteFilter, SearchFilter};

    #[test]
    fn test_empty_pipeline() {
        let pipeline = FilterPipeline::default();
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.len(), 0);
        let fixture = Fixture::new().with(FilterKind::Favorite, Criteria::Favorite(true));

        let filtered = pipeline.apply(sample_entries(), &fixture.context());
        assert_eq!(filtered, sample_entries());
    }

    #[test]
    fn test_single_filter() {
        let fixture = Fixture::new().with(FilterKind::Favorite, Criteria::Favorite(true));

        let pipeline = FilterPipeline::new().add_filter(FavoriteFilter);

        let filtered = pipeline.apply(sample_entries(), &fixture.context());
        assert_eq!(filtered.len(), 1);
        assert_eq!(ids(&filtered), vec!["1"]);
    }

    #[test]
    fn test_stages_fold_in_order() {
        let fixture = Fixture::new()
            .with(FilterKind::Search, Criteria::search("alice"))
            .with(FilterKind::Favorite, Criteria::Favorite(true));

        let pipeline = FilterPipeline::new()
            .add_filter(SearchFilter)
            .add_filter(FavoriteFilter);

        let filtered = pipeline.apply(sample_entries(), &fixture.context());
        assert_eq!(ids(&filtered), vec!["1"]);
    }

    #[test]
    fn test_for_kinds_order() {
        let pipeline = FilterPipeline::for_kinds([FilterKind::Favorite, FilterKind::Search]);
        assert_eq!(pipeline.len(), 3);
        assert!(!pipeline.is_empty());
        assert_eq!(
            pipeline.filter_names(),
            vec!["FavoriteFilter", "SearchFilter", "DeckDedupFilter"]
        );

        let standard = FilterPipeline::for_kinds(FilterKind::ALL);
        assert_eq!(
            standard.filter_names(),
            vec![
                "SearchFilter",
                "TagFilter",
                "FavoriteFilter",
                "GroupFilter",
                "WorldInfoSearchFilter",
                "DeckDedupFilter",
            ]
        );
    }
}
