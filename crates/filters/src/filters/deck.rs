//! Filter to hide characters already shown inside a deck.
//!
//! Unlike the other stages this one is not a per-entry predicate: it needs
//! the whole list to know which characters the decks in it cover.

use crate::traits::{Filter, FilterContext};
use catalog::{Entry, EntryKind};
use std::collections::HashSet;

/// Drops entries listed as a member of any deck in the same list.
///
/// ## Algorithm
/// Two passes over the list it receives (the output of earlier stages):
/// 1. Collect the stringified member ids of every deck entry
/// 2. Drop every entry whose stringified id is in that set
///
/// Decks themselves survive unless a deck lists its own id. Runs only when
/// `FilterConfig::hide_deck_members` is on.
pub struct DeckDedupFilter;

impl Filter for DeckDedupFilter {
    fn name(&self) -> &str {
        "DeckDedupFilter"
    }

    fn apply(&self, entries: Vec<Entry>, context: &FilterContext<'_>) -> Vec<Entry> {
        if !context.config.hide_deck_members {
            return entries;
        }
        dedup_deck_members(entries)
    }
}

/// The two-pass de-duplication itself, independent of configuration
pub fn dedup_deck_members(entries: Vec<Entry>) -> Vec<Entry> {
    let members: HashSet<String> = entries
        .iter()
        .filter(|entry| entry.kind == EntryKind::Deck)
        .flat_map(|deck| deck.item.characters.iter())
        .map(|id| id.to_string())
        .collect();

    if members.is_empty() {
        return entries;
    }

    entries
        .into_iter()
        .filter(|entry| {
            entry
                .id
                .as_ref()
                .is_none_or(|id| !members.contains(&id.to_string()))
        })
        .collect()
}
