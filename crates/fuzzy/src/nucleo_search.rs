//! Fuzzy matching backed by `nucleo`.
//!
//! ## Algorithm
//! 1. Snapshot the candidate universe (character and group names) once
//! 2. For each query, build a single fuzzy `Atom` (case-insensitive, smart
//!    unicode normalization)
//! 3. Score every candidate name; any score counts as a match
//!
//! Scores are discarded: the filters only need membership.

use crate::search::FuzzySearch;
use catalog::{Entry, EntryKind, Uid};
use nucleo::{
    Matcher, Utf32Str,
    pattern::{Atom, AtomKind, CaseMatching, Normalization},
};
use std::collections::HashSet;

/// Fuzzy matcher over a snapshot of character and group names.
#[derive(Debug, Clone, Default)]
pub struct NucleoSearch {
    characters: Vec<(i64, String)>,
    groups: Vec<(String, String)>,
}

impl NucleoSearch {
    /// Create an empty matcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot every named character and group in `entries`.
    ///
    /// Characters whose id is not an integer, and entries without a name or
    /// id, cannot be matched and are skipped.
    pub fn from_entries(entries: &[Entry]) -> Self {
        let mut search = Self::new();
        for entry in entries {
            let (Some(id), Some(name)) = (&entry.id, entry.name()) else {
                continue;
            };
            match entry.kind {
                EntryKind::Character => {
                    if let Some(id) = id.as_int() {
                        search.characters.push((id, name.to_string()));
                    }
                }
                EntryKind::Group => search.groups.push((id.to_string(), name.to_string())),
                _ => {}
            }
        }
        tracing::debug!(
            "Fuzzy universe: {} characters, {} groups",
            search.characters.len(),
            search.groups.len()
        );
        search
    }

    /// Add a character to the universe (builder pattern)
    pub fn with_character(mut self, id: i64, name: impl Into<String>) -> Self {
        self.characters.push((id, name.into()));
        self
    }

    /// Add a group to the universe (builder pattern)
    pub fn with_group(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.groups.push((id.into(), name.into()));
        self
    }
}

/// Build the atom for a query, or `None` for a blank query
fn query_atom(term: &str) -> Option<Atom> {
    let term = term.trim();
    if term.is_empty() {
        return None;
    }
    Some(Atom::new(
        term,
        CaseMatching::Ignore,
        Normalization::Smart,
        AtomKind::Fuzzy,
        false,
    ))
}

fn is_match(atom: &Atom, matcher: &mut Matcher, buf: &mut Vec<char>, haystack: &str) -> bool {
    let haystack = Utf32Str::new(haystack, buf);
    atom.score(haystack, matcher).is_some()
}

impl FuzzySearch for NucleoSearch {
    fn match_characters(&self, term: &str) -> HashSet<i64> {
        let Some(atom) = query_atom(term) else {
            return HashSet::new();
        };
        let mut matcher = Matcher::default();
        let mut buf = Vec::new();

        self.characters
            .iter()
            .filter(|(_, name)| is_match(&atom, &mut matcher, &mut buf, name))
            .map(|(id, _)| *id)
            .collect()
    }

    fn match_groups(&self, term: &str) -> HashSet<String> {
        let Some(atom) = query_atom(term) else {
            return HashSet::new();
        };
        let mut matcher = Matcher::default();
        let mut buf = Vec::new();

        self.groups
            .iter()
            .filter(|(_, name)| is_match(&atom, &mut matcher, &mut buf, name))
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// A record matches if any of its keys, its comment or its content
    /// matches. Records without a uid are never returned.
    fn match_world_info(&self, entries: &[Entry], term: &str) -> HashSet<Uid> {
        let Some(atom) = query_atom(term) else {
            return HashSet::new();
        };
        let mut matcher = Matcher::default();
        let mut buf = Vec::new();

        entries
            .iter()
            .filter_map(|entry| {
                let uid = entry.uid()?;
                let item = &entry.item;
                let hit = item
                    .key
                    .iter()
                    .map(String::as_str)
                    .chain([item.comment.as_str(), item.content.as_str()])
                    .filter(|field| !field.is_empty())
                    .any(|field| is_match(&atom, &mut matcher, &mut buf, field));
                hit.then_some(uid)
            })
            .collect()
    }
}
