//! Footing result tree and response envelope.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::account::YearKey;

/// One node of the footing result tree.
///
/// `expected` is `None` for leaf items (nothing to foot against); it carries
/// the signed child sum for any item that is itself a rule parent. A leaf
/// cannot fail on its own, so leaves report `is_match: true` unless the
/// reference they stand for failed to resolve at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootingItem {
    pub item: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<f64>,
    pub is_match: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FootingItem>,
}

impl FootingItem {
    /// Informational leaf: resolved value, nothing to compare against.
    pub fn leaf(item: impl Into<String>, actual: f64) -> Self {
        Self {
            item: item.into(),
            expected: None,
            actual: Some(actual),
            is_match: true,
            children: Vec::new(),
        }
    }

    /// Stub for a reference that did not resolve to any row.
    pub fn unresolved(item: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            expected: None,
            actual: None,
            is_match: false,
            children: Vec::new(),
        }
    }

    /// Count of failed items in this subtree, this node included.
    pub fn deep_mismatch_count(&self) -> usize {
        let own = usize::from(!self.is_match);
        own + self
            .children
            .iter()
            .map(FootingItem::deep_mismatch_count)
            .sum::<usize>()
    }
}

/// Per-sheet footing outcome, keyed by reporting year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetResult {
    pub sheet: String,
    pub title: String,
    pub results_by_year: BTreeMap<YearKey, Vec<FootingItem>>,
}

/// Top-level response envelope.
///
/// `mismatch_count` counts failed items in the directly returned per-year
/// lists only; mismatches buried in nested children are visible in the tree
/// but do not add to the count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootingReport {
    pub total_sheets: usize,
    pub mismatch_count: usize,
    pub results: Vec<SheetResult>,
}
