//! Error types for the filters crate.
//!
//! Filtering itself never fails: malformed entries or criteria simply do
//! not match. The only fault is addressing a filter kind the helper was not
//! built with, which is a programming error at the call site.

use crate::criteria::FilterKind;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterError {
    /// Criteria were read or written for a kind that is not registered
    #[error("Unknown filter kind: {0}")]
    UnknownFilterKind(FilterKind),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, FilterError>;
