//! In-memory catalog and tag index.
//!
//! The [`TagIndex`] maps an entry's lookup key to the tags attached to it.
//! The filter engine only ever reads it; building and persisting it is the
//! embedding application's job.

use crate::error::Result;
use crate::parser;
use crate::types::*;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Mapping from lookup key to the ordered tags attached to that entry.
///
/// A key with no list is indistinguishable from a key with an empty list:
/// both mean "no tags".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagIndex {
    tags: HashMap<String, Vec<TagId>>,
}

impl TagIndex {
    pub fn new() -> Self {
        Self {
            tags: HashMap::new(),
        }
    }

    /// Replace the tags stored for `key`
    pub fn insert(&mut self, key: impl Into<String>, tags: Vec<TagId>) {
        self.tags.insert(key.into(), tags);
    }

    /// Attach one tag to `key`, ignoring duplicates
    pub fn add_tag(&mut self, key: impl Into<String>, tag: impl Into<TagId>) {
        let tag = tag.into();
        let list = self.tags.entry(key.into()).or_default();
        if !list.contains(&tag) {
            list.push(tag);
        }
    }

    /// Tags for a lookup key. Returns an empty slice if the key is unknown.
    pub fn tags_for(&self, key: &str) -> &[TagId] {
        self.tags.get(key).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Tags attached to an entry, resolved through its lookup key
    pub fn tags_for_entry(&self, entry: &Entry) -> &[TagId] {
        match entry.lookup_key() {
            Some(key) => self.tags_for(&key),
            None => &[],
        }
    }

    /// Whether `tag` is attached to `entry`
    pub fn entry_has_tag(&self, entry: &Entry, tag: &str) -> bool {
        self.tags_for_entry(entry).iter().any(|t| t == tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// A loaded catalog: the entry list plus the tag index describing it.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<Entry>,
    tag_index: TagIndex,
}

impl Catalog {
    pub fn new(entries: Vec<Entry>, tag_index: TagIndex) -> Self {
        Self { entries, tag_index }
    }

    /// Load entries and (optionally) a tag index from disk.
    ///
    /// Both documents are parsed in parallel with `rayon::join`. A missing
    /// tag index path yields an empty index.
    pub fn load_from_files(entries_path: &Path, tags_path: Option<&Path>) -> Result<Self> {
        info!("Loading catalog from {:?}", entries_path);

        let (entries, tag_index) = rayon::join(
            || parser::parse_entries(entries_path),
            || match tags_path {
                Some(path) => parser::parse_tag_index(path),
                None => Ok(TagIndex::new()),
            },
        );

        let catalog = Self::new(entries?, tag_index?);
        info!(
            "Loaded {} entries, {} tag index keys",
            catalog.entries.len(),
            catalog.tag_index.len()
        );
        Ok(catalog)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn tag_index(&self) -> &TagIndex {
        &self.tag_index
    }

    /// Split the catalog into its parts
    pub fn into_parts(self) -> (Vec<Entry>, TagIndex) {
        (self.entries, self.tag_index)
    }

    /// Entries of one kind, in catalog order
    pub fn entries_of_kind(&self, kind: EntryKind) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(move |e| e.kind == kind)
    }

    /// Find an entry by its stringified identifier or, for world info, uid
    pub fn find(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| match (&e.id, e.uid()) {
            (Some(entry_id), _) => entry_id.to_string() == id,
            (None, Some(uid)) => uid.to_string() == id,
            (None, None) => false,
        })
    }

    /// Count entries per kind, for summaries
    pub fn counts(&self) -> HashMap<EntryKind, usize> {
        let mut counts = HashMap::new();
        for entry in &self.entries {
            *counts.entry(entry.kind).or_insert(0) += 1;
        }
        counts
    }
}
