//! Engine configuration owned by the embedding application.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Switches that change how filters behave without being criteria.
///
/// Changing the configuration never fires the change notifier; callers
/// re-run the pipeline themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Delegate name search to the fuzzy matcher instead of substring search
    pub fuzzy_search: bool,
    /// Hide characters that already appear as a member of a deck in the list
    pub hide_deck_members: bool,
}

impl FilterConfig {
    /// Parse a JSON config document. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Invalid filter config")
    }

    /// Load a JSON config file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read filter config {}", path.display()))?;
        Self::from_json(&text)
    }
}
