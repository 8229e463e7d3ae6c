//! Account-line entities shared between ingestion and validation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Separator between ancestor names in an [`AccountNode`] path.
///
/// Paths are an internal disambiguation key; rendered labels always use the
/// last segment only. The separator must never occur inside an account name.
pub const PATH_SEPARATOR: &str = " > ";

/// Reporting-year key as it appears in the extract header (e.g. `"2024-12-31"`).
pub type YearKey = String;

/// One raw line of the extract: the label cell as written (leading whitespace
/// intact) plus the amount cell per reporting year.
///
/// `None` amounts mean the cell was empty or unparseable for that year;
/// absence, not zero, is the signal that a line item had no reported value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRow {
    pub raw_label: String,
    pub amounts: BTreeMap<YearKey, Option<f64>>,
}

impl AccountRow {
    pub fn new(raw_label: impl Into<String>) -> Self {
        Self {
            raw_label: raw_label.into(),
            amounts: BTreeMap::new(),
        }
    }
}

/// A placed account line for one reporting year.
///
/// Built once per parsed year by the hierarchy builder and never mutated
/// afterwards. A node's `path` is its parent's path with its own `name`
/// appended; root nodes have `path == name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountNode {
    /// Trimmed account name (last path segment).
    pub name: String,
    /// Ancestor chain root-to-self, joined with [`PATH_SEPARATOR`].
    pub path: String,
    /// Nesting depth inferred from leading whitespace.
    pub indent_level: usize,
    /// Reported amount for the year this node belongs to.
    pub amount: f64,
}

/// Extract the display segment of a reference: everything after the final
/// path separator, or the reference itself when it carries no separator.
pub fn display_segment(reference: &str) -> &str {
    reference
        .rsplit_once(PATH_SEPARATOR)
        .map_or(reference, |(_, last)| last)
}
