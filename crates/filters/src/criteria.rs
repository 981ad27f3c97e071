//! Filter kinds, criteria values and the criteria store.
//!
//! Each [`FilterKind`] has exactly one criteria shape and a default value
//! that filters nothing out. The [`CriteriaStore`] holds one value per
//! registered kind and reports whether a write actually changed anything.

use crate::error::{FilterError, Result};
use catalog::TagId;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Filter kinds
// =============================================================================

/// The closed set of criteria-driven filters.
///
/// Declaration order is the default pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    Search,
    Tag,
    Favorite,
    Group,
    WorldInfoSearch,
}

impl FilterKind {
    /// Every kind, in default pipeline order
    pub const ALL: [FilterKind; 5] = [
        FilterKind::Search,
        FilterKind::Tag,
        FilterKind::Favorite,
        FilterKind::Group,
        FilterKind::WorldInfoSearch,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Tag => "tag",
            Self::Favorite => "favorite",
            Self::Group => "group",
            Self::WorldInfoSearch => "world_info_search",
        }
    }

    /// The value under which this kind filters nothing out
    pub fn default_criteria(self) -> Criteria {
        match self {
            Self::Search => Criteria::Search(String::new()),
            Self::Tag => Criteria::Tag(TagSelection::default()),
            Self::Favorite => Criteria::Favorite(false),
            Self::Group => Criteria::Group(false),
            Self::WorldInfoSearch => Criteria::WorldInfoSearch(String::new()),
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Tag selection
// =============================================================================

/// Selected and excluded tags for the tag filter.
///
/// Both lists keep first-insertion order and never hold duplicates when
/// built through this API. Equality ignores order: `[a, b]` and `[b, a]`
/// select the same entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TagSelection {
    selected: Vec<TagId>,
    excluded: Vec<TagId>,
}

impl TagSelection {
    pub fn new<S, E>(selected: S, excluded: E) -> Self
    where
        S: IntoIterator,
        S::Item: Into<TagId>,
        E: IntoIterator,
        E::Item: Into<TagId>,
    {
        let mut selection = Self::default();
        for tag in selected {
            push_unique(&mut selection.selected, tag.into());
        }
        for tag in excluded {
            push_unique(&mut selection.excluded, tag.into());
        }
        selection
    }

    /// Add a tag entries must carry (builder pattern)
    pub fn select(mut self, tag: impl Into<TagId>) -> Self {
        push_unique(&mut self.selected, tag.into());
        self
    }

    /// Add a tag that removes any entry carrying it (builder pattern)
    pub fn exclude(mut self, tag: impl Into<TagId>) -> Self {
        push_unique(&mut self.excluded, tag.into());
        self
    }

    pub fn selected(&self) -> &[TagId] {
        &self.selected
    }

    pub fn excluded(&self) -> &[TagId] {
        &self.excluded
    }

    /// True when neither list has a tag, i.e. the tag filter is a no-op
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty() && self.excluded.is_empty()
    }
}

fn push_unique(list: &mut Vec<TagId>, tag: TagId) {
    if !list.contains(&tag) {
        list.push(tag);
    }
}

/// Set equality over two tag lists, tolerant of duplicates
fn same_tags(a: &[TagId], b: &[TagId]) -> bool {
    a.iter().all(|tag| b.contains(tag)) && b.iter().all(|tag| a.contains(tag))
}

impl PartialEq for TagSelection {
    fn eq(&self, other: &Self) -> bool {
        same_tags(&self.selected, &other.selected) && same_tags(&self.excluded, &other.excluded)
    }
}

impl Eq for TagSelection {}

// =============================================================================
// Criteria
// =============================================================================

/// Current configuration of one filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Criteria {
    Search(String),
    Tag(TagSelection),
    Favorite(bool),
    Group(bool),
    WorldInfoSearch(String),
}

impl Criteria {
    pub fn search(term: impl Into<String>) -> Self {
        Self::Search(term.into())
    }

    pub fn world_info_search(term: impl Into<String>) -> Self {
        Self::WorldInfoSearch(term.into())
    }

    /// The kind this value is shaped for
    pub fn kind(&self) -> FilterKind {
        match self {
            Self::Search(_) => FilterKind::Search,
            Self::Tag(_) => FilterKind::Tag,
            Self::Favorite(_) => FilterKind::Favorite,
            Self::Group(_) => FilterKind::Group,
            Self::WorldInfoSearch(_) => FilterKind::WorldInfoSearch,
        }
    }

    /// True when this value filters nothing out
    pub fn is_noop(&self) -> bool {
        match self {
            Self::Search(term) | Self::WorldInfoSearch(term) => term.is_empty(),
            Self::Tag(selection) => selection.is_empty(),
            Self::Favorite(on) | Self::Group(on) => !on,
        }
    }

    // Shape accessors. A value stored under the wrong kind yields `None`,
    // which every filter treats as "no criterion".

    pub fn search_term(&self) -> Option<&str> {
        match self {
            Self::Search(term) => Some(term.as_str()),
            _ => None,
        }
    }

    pub fn world_info_term(&self) -> Option<&str> {
        match self {
            Self::WorldInfoSearch(term) => Some(term.as_str()),
            _ => None,
        }
    }

    pub fn tag_selection(&self) -> Option<&TagSelection> {
        match self {
            Self::Tag(selection) => Some(selection),
            _ => None,
        }
    }

    pub fn favorite(&self) -> Option<bool> {
        match self {
            Self::Favorite(on) => Some(*on),
            _ => None,
        }
    }

    pub fn group(&self) -> Option<bool> {
        match self {
            Self::Group(on) => Some(*on),
            _ => None,
        }
    }
}

/// Structural comparison, shape by shape. Values of different shapes are
/// never equal.
impl PartialEq for Criteria {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Search(a), Self::Search(b)) => a == b,
            (Self::WorldInfoSearch(a), Self::WorldInfoSearch(b)) => a == b,
            (Self::Tag(a), Self::Tag(b)) => a == b,
            (Self::Favorite(a), Self::Favorite(b)) => a == b,
            (Self::Group(a), Self::Group(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Criteria {}

impl From<TagSelection> for Criteria {
    fn from(selection: TagSelection) -> Self {
        Self::Tag(selection)
    }
}

// =============================================================================
// Criteria store
// =============================================================================

/// One criteria value per registered filter kind.
///
/// The registered kinds are fixed at construction and keep their
/// registration order, which is also the pipeline order.
#[derive(Debug, Clone, PartialEq)]
pub struct CriteriaStore {
    slots: Vec<(FilterKind, Criteria)>,
}

impl CriteriaStore {
    /// Register `kinds` (duplicates ignored), each at its default value
    pub fn new(kinds: impl IntoIterator<Item = FilterKind>) -> Self {
        let mut slots: Vec<(FilterKind, Criteria)> = Vec::new();
        for kind in kinds {
            if !slots.iter().any(|(k, _)| *k == kind) {
                slots.push((kind, kind.default_criteria()));
            }
        }
        Self { slots }
    }

    /// Registered kinds in registration order
    pub fn kinds(&self) -> impl Iterator<Item = FilterKind> + '_ {
        self.slots.iter().map(|(kind, _)| *kind)
    }

    pub fn is_registered(&self, kind: FilterKind) -> bool {
        self.slots.iter().any(|(k, _)| *k == kind)
    }

    pub fn get(&self, kind: FilterKind) -> Result<&Criteria> {
        self.slots
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, value)| value)
            .ok_or(FilterError::UnknownFilterKind(kind))
    }

    /// Replace the value for `kind`. Returns whether the stored value
    /// changed under structural equality.
    ///
    /// The value is stored as given, even if its shape belongs to another
    /// kind; filters read such a value as "no criterion".
    pub fn set(&mut self, kind: FilterKind, value: Criteria) -> Result<bool> {
        let slot = self
            .slots
            .iter_mut()
            .find(|(k, _)| *k == kind)
            .map(|(_, value)| value)
            .ok_or(FilterError::UnknownFilterKind(kind))?;

        let changed = *slot != value;
        *slot = value;
        Ok(changed)
    }

    /// Restore every kind to its default. Returns whether anything changed.
    pub fn reset(&mut self) -> bool {
        let mut changed = false;
        for (kind, value) in &mut self.slots {
            let default = kind.default_criteria();
            if *value != default {
                *value = default;
                changed = true;
            }
        }
        changed
    }

    /// Whether the criterion for `kind` currently narrows the list
    ///
    /// A value stored under the wrong kind is read by the filters as no
    /// criterion, so it is never active.
    pub fn is_active(&self, kind: FilterKind) -> Result<bool> {
        Ok(narrows(kind, self.get(kind)?))
    }

    /// Whether any registered criterion narrows the list
    pub fn any_active(&self) -> bool {
        self.slots.iter().any(|(kind, value)| narrows(*kind, value))
    }
}

fn narrows(kind: FilterKind, value: &Criteria) -> bool {
    value.kind() == kind && !value.is_noop()
}

impl Default for CriteriaStore {
    fn default() -> Self {
        Self::new(FilterKind::ALL)
    }
}
