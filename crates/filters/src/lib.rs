//! Criteria-driven filtering of catalog entry lists.
//!
//! This crate provides:
//! - FilterKind, Criteria and the CriteriaStore holding one value per kind
//! - Filter trait and one implementation per kind, plus deck de-duplication
//! - FilterPipeline for composing filters
//! - FilterHelper, the per-list facade with change notification
//!
//! ## Architecture
//! Entries flow through the stages in a fixed order:
//! 1. Search (exact substring or fuzzy)
//! 2. Tag selection and exclusion
//! 3. Favorite-only
//! 4. Group-only
//! 5. World-info search
//! 6. Deck member de-duplication, when enabled in `FilterConfig`
//!
//! A stage whose criterion is at its default passes its input through.
//!
//! ## Example Usage
//! ```ignore
//! use filters::{Criteria, FilterHelper, FilterKind};
//!
//! let mut helper = FilterHelper::new(|| println!("filters changed"))
//!     .with_tag_index(catalog.tag_index().clone().into());
//!
//! helper.set_criteria(FilterKind::Search, Criteria::search("alice"), false)?;
//! let visible = helper.apply_filters(catalog.entries());
//! ```

pub mod config;
pub mod criteria;
pub mod error;
pub mod filter_pipeline;
pub mod filters;
pub mod helper;
pub mod traits;

// Re-export main types
pub use config::FilterConfig;
pub use criteria::{Criteria, CriteriaStore, FilterKind, TagSelection};
pub use error::{FilterError, Result};
pub use filter_pipeline::FilterPipeline;
pub use helper::{ChangeNotifier, FilterHelper};
pub use traits::{Filter, FilterContext};
