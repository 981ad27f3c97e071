//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that every pipeline stage
//! implements, and the context each stage reads its inputs from.

use crate::config::FilterConfig;
use crate::criteria::{Criteria, CriteriaStore, FilterKind};
use catalog::{Entry, TagIndex};
use fuzzy::FuzzySearch;

/// Everything a stage may consult besides the entries themselves.
///
/// Built fresh for each pipeline run; stages only ever borrow from it.
pub struct FilterContext<'a> {
    pub criteria: &'a CriteriaStore,
    pub tag_index: &'a TagIndex,
    pub fuzzy: &'a dyn FuzzySearch,
    pub config: &'a FilterConfig,
}

impl<'a> FilterContext<'a> {
    /// Criteria for `kind`, or `None` if the kind is not registered
    pub fn criteria(&self, kind: FilterKind) -> Option<&'a Criteria> {
        self.criteria.get(kind).ok()
    }
}

/// A single pipeline stage.
///
/// ## Design Note
/// - `Send + Sync` lets a pipeline be shared across threads
/// - Stages take ownership of the Vec<Entry> and return the survivors, so a
///   stage with nothing to do hands the list back untouched
/// - Stages are total: bad data means "no match", never an error
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a list of entries.
    ///
    /// # Arguments
    /// * `entries` - The entries to filter (takes ownership)
    /// * `context` - Criteria, tag index, fuzzy matcher and config
    fn apply(&self, entries: Vec<Entry>, context: &FilterContext<'_>) -> Vec<Entry>;
}
