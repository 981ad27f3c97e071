//! # Filter Helper
//!
//! The object a list surface owns: it stores the current criteria, tells
//! its owner when they change, and runs the pipeline on demand.
//!
//! Control flow:
//! 1. Owner calls `set_criteria`
//! 2. If the value changed structurally, the change notifier fires
//!    synchronously, before `set_criteria` returns
//! 3. Owner (usually from the notifier's subscriber) calls `apply_filters`
//!    with fresh data
//!
//! The notifier is an `FnMut` owned by the helper, and `set_criteria` takes
//! `&mut self`, so the notifier cannot reach back into the helper to mutate
//! criteria re-entrantly.

use crate::config::FilterConfig;
use crate::criteria::{Criteria, CriteriaStore, FilterKind};
use crate::error::Result;
use crate::filter_pipeline::FilterPipeline;
use crate::traits::FilterContext;
use catalog::{Entry, TagIndex};
use fuzzy::{FuzzySearch, NoFuzzy};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Callback fired when criteria change in a way that alters filtering
pub type ChangeNotifier = Box<dyn FnMut() + Send>;

/// Criteria store, change notification and pipeline for one list surface.
pub struct FilterHelper {
    criteria: CriteriaStore,
    pipeline: FilterPipeline,
    on_change: ChangeNotifier,
    tag_index: Arc<TagIndex>,
    fuzzy: Arc<dyn FuzzySearch>,
    config: FilterConfig,
}

impl FilterHelper {
    /// Helper with every filter kind registered.
    ///
    /// Starts with an empty tag index, no fuzzy backend and default config.
    pub fn new(on_change: impl FnMut() + Send + 'static) -> Self {
        Self::with_kinds(FilterKind::ALL, on_change)
    }

    /// Helper for a subset of filter kinds, in the given order.
    ///
    /// Criteria for any other kind are rejected with `UnknownFilterKind`
    /// and their stages never run.
    pub fn with_kinds(
        kinds: impl IntoIterator<Item = FilterKind>,
        on_change: impl FnMut() + Send + 'static,
    ) -> Self {
        let criteria = CriteriaStore::new(kinds);
        let pipeline = FilterPipeline::for_kinds(criteria.kinds());
        Self {
            criteria,
            pipeline,
            on_change: Box::new(on_change),
            tag_index: Arc::new(TagIndex::new()),
            fuzzy: Arc::new(NoFuzzy),
            config: FilterConfig::default(),
        }
    }

    /// Use `tag_index` for tag lookups (builder pattern)
    pub fn with_tag_index(mut self, tag_index: Arc<TagIndex>) -> Self {
        self.tag_index = tag_index;
        self
    }

    /// Use `fuzzy` for fuzzy search (builder pattern)
    pub fn with_fuzzy_search(mut self, fuzzy: Arc<dyn FuzzySearch>) -> Self {
        self.fuzzy = fuzzy;
        self
    }

    /// Use `config` (builder pattern)
    pub fn with_config(mut self, config: FilterConfig) -> Self {
        self.config = config;
        self
    }

    // Swapping collaborators does not notify: criteria are unchanged.

    pub fn set_tag_index(&mut self, tag_index: Arc<TagIndex>) {
        self.tag_index = tag_index;
    }

    pub fn set_fuzzy_search(&mut self, fuzzy: Arc<dyn FuzzySearch>) {
        self.fuzzy = fuzzy;
    }

    pub fn set_config(&mut self, config: FilterConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn tag_index(&self) -> &TagIndex {
        &self.tag_index
    }

    /// Registered kinds in pipeline order
    pub fn kinds(&self) -> impl Iterator<Item = FilterKind> + '_ {
        self.criteria.kinds()
    }

    /// Replace the criteria for `kind`.
    ///
    /// Fires the change notifier exactly once if the new value differs
    /// structurally from the old one and `suppress_notify` is false.
    pub fn set_criteria(
        &mut self,
        kind: FilterKind,
        value: Criteria,
        suppress_notify: bool,
    ) -> Result<()> {
        let changed = self.criteria.set(kind, value)?;
        if !changed {
            trace!("Criteria for {} unchanged", kind);
            return Ok(());
        }
        if suppress_notify {
            trace!("Criteria for {} changed, notification suppressed", kind);
            return Ok(());
        }
        trace!("Criteria for {} changed", kind);
        (self.on_change)();
        Ok(())
    }

    /// Current criteria for `kind`
    pub fn get_criteria(&self, kind: FilterKind) -> Result<&Criteria> {
        self.criteria.get(kind)
    }

    /// Restore every registered kind to its default, notifying once if
    /// anything changed
    pub fn clear_filters(&mut self) {
        if self.criteria.reset() {
            trace!("Criteria cleared");
            (self.on_change)();
        }
    }

    /// Whether the criterion for `kind` currently narrows the list
    pub fn is_active(&self, kind: FilterKind) -> Result<bool> {
        self.criteria.is_active(kind)
    }

    /// Whether any criterion currently narrows the list
    pub fn is_filtered(&self) -> bool {
        self.criteria.any_active()
    }

    /// Run every registered stage over `entries`.
    ///
    /// The input is never modified: the result is always a new list, even
    /// when no stage removes anything.
    pub fn apply_filters(&self, entries: &[Entry]) -> Vec<Entry> {
        let context = FilterContext {
            criteria: &self.criteria,
            tag_index: &self.tag_index,
            fuzzy: self.fuzzy.as_ref(),
            config: &self.config,
        };
        self.pipeline.apply(entries.to_vec(), &context)
    }
}

impl fmt::Debug for FilterHelper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterHelper")
            .field("criteria", &self.criteria)
            .field("stages", &self.pipeline.filter_names())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
