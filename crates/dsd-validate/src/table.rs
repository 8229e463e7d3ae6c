//! Per-year amount lookup.
//!
//! References in the rule table are either full paths or bare names. Rows
//! resolving to the same key are summed: duplicate line items under
//! different parents are tolerated by design, not an error.

use std::collections::{BTreeMap, BTreeSet};

use dsd_model::{AccountNode, display_segment};

/// Resolved amounts for one reporting year, indexed by path and by name.
#[derive(Debug, Clone)]
pub struct AmountTable {
    nodes: Vec<AccountNode>,
    by_path: BTreeMap<String, Vec<usize>>,
    by_name: BTreeMap<String, Vec<usize>>,
}

impl AmountTable {
    pub fn new(nodes: Vec<AccountNode>) -> Self {
        let mut by_path: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        let mut by_name: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (idx, node) in nodes.iter().enumerate() {
            by_path.entry(node.path.clone()).or_default().push(idx);
            by_name.entry(node.name.clone()).or_default().push(idx);
        }
        Self {
            nodes,
            by_path,
            by_name,
        }
    }

    /// Sum of all rows matching the reference by path **or** by name, each
    /// row counted once. Used for rule parents and special-rule terms.
    pub fn resolve_any(&self, reference: &str) -> Option<f64> {
        let mut matched: BTreeSet<usize> = BTreeSet::new();
        if let Some(indices) = self.by_path.get(reference) {
            matched.extend(indices);
        }
        if let Some(indices) = self.by_name.get(reference) {
            matched.extend(indices);
        }
        if matched.is_empty() {
            return None;
        }
        Some(matched.iter().map(|idx| self.nodes[*idx].amount).sum())
    }

    /// Child-reference resolution: exact path match first, then fall back to
    /// the last segment of the reference as a bare name.
    pub fn resolve_child(&self, reference: &str) -> Option<f64> {
        if let Some(indices) = self.by_path.get(reference) {
            return Some(indices.iter().map(|idx| self.nodes[*idx].amount).sum());
        }
        let name = display_segment(reference);
        self.by_name
            .get(name)
            .map(|indices| indices.iter().map(|idx| self.nodes[*idx].amount).sum())
    }

    /// Distinct account names present this year (for diagnostics).
    pub fn item_names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str, path: &str, amount: f64) -> AccountNode {
        AccountNode {
            name: name.to_string(),
            path: path.to_string(),
            indent_level: path.matches(" > ").count(),
            amount,
        }
    }

    fn sample_table() -> AmountTable {
        AmountTable::new(vec![
            node("자산총계", "자산총계", 300.0),
            node("유동자산", "자산총계 > 유동자산", 120.0),
            node("금융자산", "자산총계 > 유동자산 > 금융자산", 50.0),
            node("비유동자산", "자산총계 > 비유동자산", 180.0),
            node("금융자산", "자산총계 > 비유동자산 > 금융자산", 80.0),
        ])
    }

    #[test]
    fn resolve_any_matches_path_or_name_once_per_row() {
        let table = sample_table();
        // Root node: name and path are identical, counted once.
        assert_eq!(table.resolve_any("자산총계"), Some(300.0));
        assert_eq!(table.resolve_any("자산총계 > 유동자산"), Some(120.0));
        assert_eq!(table.resolve_any("없는항목"), None);
    }

    #[test]
    fn resolve_any_sums_duplicate_names() {
        let table = sample_table();
        assert_eq!(table.resolve_any("금융자산"), Some(130.0));
    }

    #[test]
    fn resolve_child_prefers_exact_path() {
        let table = sample_table();
        assert_eq!(
            table.resolve_child("자산총계 > 유동자산 > 금융자산"),
            Some(50.0)
        );
    }

    #[test]
    fn resolve_child_falls_back_to_last_segment_name() {
        let table = sample_table();
        // No row carries this path, so the bare name matches both branches.
        assert_eq!(
            table.resolve_child("다른경로 > 금융자산"),
            Some(130.0)
        );
        assert_eq!(table.resolve_child("다른경로 > 없는항목"), None);
    }
}
