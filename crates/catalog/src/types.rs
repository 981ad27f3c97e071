//! Core domain types for catalog entries.
//!
//! An [`Entry`] is one row of a filterable list: a character, a group, a
//! tag-bearing item, a world-info record or a deck. All kinds share one
//! loosely-shaped payload ([`Item`]) because the filter stages only read the
//! handful of fields they need and treat anything missing as "no match".

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

// =============================================================================
// Type Aliases
// =============================================================================

/// Identifier of a tag in the tag index
pub type TagId = String;

/// Unique identifier of a world-info record
pub type Uid = u64;

// =============================================================================
// Entry Kind & Identifier
// =============================================================================

/// Kind of a catalog entry.
///
/// Unrecognized `type` strings in the input map to [`EntryKind::Unknown`]
/// rather than failing the whole load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Character,
    Group,
    /// Tag-bearing generic item, such as a tag folder
    Tag,
    WorldInfo,
    Deck,
    #[serde(other)]
    Unknown,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Character => "character",
            Self::Group => "group",
            Self::Tag => "tag",
            Self::WorldInfo => "world_info",
            Self::Deck => "deck",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry identifier. Characters use integers, groups and most other kinds
/// use strings, and upstream data is not always consistent about which.
///
/// Comparisons across kinds go through the stringified form (`Display`), so
/// `Int(1)` and `Text("1")` name the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryId {
    Int(i64),
    Text(String),
}

impl EntryId {
    /// Integer view of the identifier. Text identifiers are parsed, and
    /// anything that is not an integer yields `None`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for EntryId {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for EntryId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

// =============================================================================
// Payload
// =============================================================================

/// Kind-specific payload of an entry.
///
/// Every field is optional on the wire. The custom deserializers in
/// [`crate::parser`] normalize inconsistently-typed upstream data once, at
/// ingestion, so the filters never see a wrongly-typed field:
/// - `fav` accepts `true` or the legacy string `"true"`; anything else is `false`
/// - `name`/`avatar` that are not strings become `None`
/// - list fields drop elements of the wrong type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    #[serde(deserialize_with = "crate::parser::deserialize_opt_string")]
    pub name: Option<String>,
    /// Stable file key of a character, used to look up its tags
    #[serde(deserialize_with = "crate::parser::deserialize_opt_string")]
    pub avatar: Option<String>,
    #[serde(deserialize_with = "crate::parser::deserialize_flag")]
    pub fav: bool,
    /// Member characters of a deck
    #[serde(deserialize_with = "crate::parser::deserialize_ids")]
    pub characters: Vec<EntryId>,
    #[serde(deserialize_with = "crate::parser::deserialize_opt_uid")]
    pub uid: Option<Uid>,
    /// World-info trigger keys
    #[serde(deserialize_with = "crate::parser::deserialize_strings")]
    pub key: Vec<String>,
    #[serde(deserialize_with = "crate::parser::deserialize_string")]
    pub comment: String,
    #[serde(deserialize_with = "crate::parser::deserialize_string")]
    pub content: String,
}

// =============================================================================
// Entry
// =============================================================================

/// One filterable item in the catalog.
///
/// World-info records usually carry no `id`; they are addressed by
/// `item.uid` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(default, deserialize_with = "crate::parser::deserialize_opt_id")]
    pub id: Option<EntryId>,
    #[serde(default)]
    pub item: Item,
}

impl Entry {
    /// Create an entry with an empty payload
    pub fn new(kind: EntryKind, id: impl Into<EntryId>) -> Self {
        Self {
            kind,
            id: Some(id.into()),
            item: Item::default(),
        }
    }

    /// Character entry keyed in the tag index by its avatar file
    pub fn character(id: i64, name: &str, avatar: &str) -> Self {
        let mut entry = Self::new(EntryKind::Character, id);
        entry.item.name = Some(name.to_string());
        entry.item.avatar = Some(avatar.to_string());
        entry
    }

    pub fn group(id: &str, name: &str) -> Self {
        Self::new(EntryKind::Group, id).with_name(name)
    }

    pub fn tag(id: &str, name: &str) -> Self {
        Self::new(EntryKind::Tag, id).with_name(name)
    }

    /// Deck entry listing its member characters
    pub fn deck(id: &str, members: impl IntoIterator<Item = EntryId>) -> Self {
        let mut entry = Self::new(EntryKind::Deck, id);
        entry.item.characters = members.into_iter().collect();
        entry
    }

    /// World-info record, addressed by uid
    pub fn world_info(uid: Uid, comment: &str, keys: &[&str]) -> Self {
        Self {
            kind: EntryKind::WorldInfo,
            id: None,
            item: Item {
                uid: Some(uid),
                comment: comment.to_string(),
                key: keys.iter().map(|k| k.to_string()).collect(),
                ..Item::default()
            },
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.item.name = Some(name.to_string());
        self
    }

    pub fn with_fav(mut self, fav: bool) -> Self {
        self.item.fav = fav;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.item.name.as_deref()
    }

    pub fn uid(&self) -> Option<Uid> {
        self.item.uid
    }

    pub fn is_favorite(&self) -> bool {
        self.item.fav
    }

    /// Key under which the tag index stores this entry's tags.
    ///
    /// Characters are keyed by their avatar file; every other kind by its
    /// stringified identifier. `None` means the entry cannot carry tags.
    pub fn lookup_key(&self) -> Option<Cow<'_, str>> {
        match self.kind {
            EntryKind::Character => self.item.avatar.as_deref().map(Cow::Borrowed),
            _ => self.id.as_ref().map(|id| Cow::Owned(id.to_string())),
        }
    }

    /// Short human-readable label for listings
    pub fn label(&self) -> String {
        let id = match (&self.id, self.item.uid) {
            (Some(id), _) => id.to_string(),
            (None, Some(uid)) => format!("uid:{}", uid),
            (None, None) => "?".to_string(),
        };
        match self.name() {
            Some(name) => format!("{} {} ({})", self.kind, id, name),
            None if !self.item.comment.is_empty() => {
                format!("{} {} ({})", self.kind, id, self.item.comment)
            }
            None => format!("{} {}", self.kind, id),
        }
    }
}
