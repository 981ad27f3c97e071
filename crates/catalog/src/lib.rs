//! # Catalog Crate
//!
//! Domain types and ingestion for the entries a catalog list shows:
//! characters, groups, tag-bearing items, world-info records and decks.
//!
//! ## Main Components
//!
//! - **types**: `Entry`, `EntryKind`, `EntryId` and the loose `Item` payload
//! - **parser**: JSON ingestion with field-level normalization
//! - **index**: `TagIndex` (lookup key -> tags) and the `Catalog` container
//! - **error**: Error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::Catalog;
//! use std::path::Path;
//!
//! let catalog = Catalog::load_from_files(
//!     Path::new("data/entries.json"),
//!     Some(Path::new("data/tags.json")),
//! )?;
//!
//! for entry in catalog.entries() {
//!     let tags = catalog.tag_index().tags_for_entry(entry);
//!     println!("{} {:?}", entry.label(), tags);
//! }
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use index::{Catalog, TagIndex};
pub use parser::FavoriteFlag;
pub use types::{Entry, EntryId, EntryKind, Item, TagId, Uid};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::default();
        assert!(catalog.entries().is_empty());
        assert!(catalog.tag_index().is_empty());
    }

    #[test]
    fn test_entry_json_shape() {
        let entry = Entry::character(1, "Alice", "alice.png").with_fav(true);
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["type"], "character");
        assert_eq!(json["id"], 1);
        assert_eq!(json["item"]["name"], "Alice");
        assert_eq!(json["item"]["fav"], true);
    }
}
