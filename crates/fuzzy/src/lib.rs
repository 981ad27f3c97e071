//! # Fuzzy Crate
//!
//! Fuzzy-search collaborators for the catalog filters.
//!
//! ## Components
//!
//! ### `FuzzySearch`
//! The seam the search filters delegate to. It answers "which ids in the
//! whole catalog match this term?" for characters, groups and world info.
//!
//! ### `NucleoSearch`
//! A `nucleo`-backed implementation over a snapshot of character and group
//! names. World-info records match on keys, comment and content.
//!
//! ### `NoFuzzy`
//! Matches nothing; the default when no backend is configured.
//!
//! ## Example Usage
//!
//! ```ignore
//! use fuzzy::{FuzzySearch, NucleoSearch};
//! use std::sync::Arc;
//!
//! let search: Arc<dyn FuzzySearch> = Arc::new(NucleoSearch::from_entries(catalog.entries()));
//! let ids = search.match_characters("alice");
//! ```

pub mod search;
pub mod nucleo_search;

pub use nucleo_search::NucleoSearch;
pub use search::{FuzzySearch, NoFuzzy};
