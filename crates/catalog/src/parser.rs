//! JSON ingestion for catalog entries and the tag index.
//!
//! Two documents are read:
//! - entries: a JSON array of `{"type": ..., "id": ..., "item": {...}}`
//! - tag index: a JSON object mapping a lookup key to an array of tag ids
//!
//! Upstream data is loosely typed, so field-level problems are normalized
//! here (wrong types become "absent") and only document-level problems
//! (unreadable file, invalid JSON, wrong top-level shape) are errors.

use crate::error::{CatalogError, Result};
use crate::index::TagIndex;
use crate::types::*;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::path::Path;

/// Read a whole file, reporting a missing file with its path
fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => CatalogError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => CatalogError::IoError(err),
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse the entries file
pub fn parse_entries(path: &Path) -> Result<Vec<Entry>> {
    let text = read_file(path)?;
    parse_entries_json(&text, &file_label(path))
}

/// Parse an entries document already in memory.
///
/// `file` only labels errors.
pub fn parse_entries_json(text: &str, file: &str) -> Result<Vec<Entry>> {
    serde_json::from_str(text).map_err(|source| CatalogError::JsonError {
        file: file.to_string(),
        source,
    })
}

/// Parse the tag index file
pub fn parse_tag_index(path: &Path) -> Result<TagIndex> {
    let text = read_file(path)?;
    parse_tag_index_json(&text, &file_label(path))
}

/// Parse a tag index document already in memory.
///
/// The top level must be an object. Values that are not arrays mean
/// "no tags" for that key and are skipped; array elements that are numbers
/// are stringified, anything else is dropped.
pub fn parse_tag_index_json(text: &str, file: &str) -> Result<TagIndex> {
    let value: Value = serde_json::from_str(text).map_err(|source| CatalogError::JsonError {
        file: file.to_string(),
        source,
    })?;

    let Value::Object(map) = value else {
        return Err(CatalogError::InvalidValue {
            field: "tag index".to_string(),
            value: json_type_name(&value).to_string(),
        });
    };

    let mut index = TagIndex::new();
    for (key, tags) in map {
        let Value::Array(tags) = tags else {
            tracing::trace!("Skipping non-array tag list for key {}", key);
            continue;
        };
        index.insert(key, tags.iter().filter_map(value_as_tag).collect());
    }
    Ok(index)
}

fn value_as_tag(value: &Value) -> Option<TagId> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Field normalization
// =============================================================================

/// Favorite flag as it appears upstream: a real boolean, or a legacy
/// string written by older exporters.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FavoriteFlag {
    Bool(bool),
    Legacy(String),
    Other(IgnoredAny),
}

impl FavoriteFlag {
    /// Only `true` and the exact string `"true"` count as set
    pub fn is_set(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Legacy(s) => s == "true",
            Self::Other(_) => false,
        }
    }
}

pub(crate) fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(FavoriteFlag::deserialize(deserializer)?.is_set())
}

pub(crate) fn deserialize_opt_string<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

pub(crate) fn deserialize_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_opt_string(deserializer)?.unwrap_or_default())
}

pub(crate) fn deserialize_strings<'de, D>(
    deserializer: D,
) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect()),
        _ => Ok(Vec::new()),
    }
}

fn value_as_id(value: Value) -> Option<EntryId> {
    match value {
        Value::String(s) => Some(EntryId::Text(s)),
        Value::Number(n) => n.as_i64().map(EntryId::Int),
        _ => None,
    }
}

pub(crate) fn deserialize_opt_id<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<EntryId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_as_id(Value::deserialize(deserializer)?))
}

pub(crate) fn deserialize_ids<'de, D>(deserializer: D) -> std::result::Result<Vec<EntryId>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items.into_iter().filter_map(value_as_id).collect()),
        _ => Ok(Vec::new()),
    }
}

pub(crate) fn deserialize_opt_uid<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Uid>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => Ok(n.as_u64()),
        Value::String(s) => Ok(s.trim().parse().ok()),
        _ => Ok(None),
    }
}
