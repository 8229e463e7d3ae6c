//! Indentation-based hierarchy reconstruction.
//!
//! The extract encodes nesting purely through leading whitespace in the
//! label column, four columns per level. The builder is an explicit stack
//! machine over `(indent_level, name)` pairs so indentation edge cases are
//! testable without any spreadsheet plumbing.

use std::collections::BTreeMap;

use tracing::debug;

use dsd_ingest::SheetExtract;
use dsd_model::{AccountNode, PATH_SEPARATOR, YearKey};

/// Whitespace columns per nesting level. Must match the export convention
/// exactly or nesting misparses.
pub const INDENT_WIDTH: usize = 4;

/// Section-marker tag; rows carrying it are headers, not accounts.
pub const SECTION_MARKER: &str = "[개요]";

/// A label placed into the hierarchy: trimmed name, full ancestor path and
/// inferred nesting level. Year-independent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedLabel {
    pub name: String,
    pub path: String,
    pub indent_level: usize,
}

/// Stack machine that turns a sequence of raw labels into placed labels.
#[derive(Debug, Default)]
pub struct HierarchyBuilder {
    /// Current ancestor chain, shallowest first.
    stack: Vec<(usize, String)>,
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next raw label in row order.
    ///
    /// Returns `None` for rows that do not occupy a position in the tree:
    /// blank labels and section markers. Such rows leave the stack untouched.
    pub fn place(&mut self, raw_label: &str) -> Option<PlacedLabel> {
        if raw_label.contains(SECTION_MARKER) {
            return None;
        }
        let name = raw_label.trim();
        if name.is_empty() {
            return None;
        }

        let leading = raw_label
            .chars()
            .take_while(|ch| ch.is_whitespace())
            .count();
        let indent_level = leading / INDENT_WIDTH;

        // A node at the same or shallower level ends all deeper ancestors.
        while self
            .stack
            .last()
            .is_some_and(|(level, _)| *level >= indent_level)
        {
            self.stack.pop();
        }

        let path = if self.stack.is_empty() {
            name.to_string()
        } else {
            let mut segments: Vec<&str> =
                self.stack.iter().map(|(_, name)| name.as_str()).collect();
            segments.push(name);
            segments.join(PATH_SEPARATOR)
        };

        self.stack.push((indent_level, name.to_string()));
        debug!(level = indent_level, path = %path, "placed account label");
        Some(PlacedLabel {
            name: name.to_string(),
            path,
            indent_level,
        })
    }
}

/// Build the per-year node sets for an extract.
///
/// Labels are placed once (structure is shared across years); a year's node
/// set then contains exactly the placed rows whose amount parsed for that
/// year. Years where nothing survives are omitted entirely.
pub fn build_forest(extract: &SheetExtract) -> BTreeMap<YearKey, Vec<AccountNode>> {
    let mut builder = HierarchyBuilder::new();
    let placed: Vec<(usize, PlacedLabel)> = extract
        .rows
        .iter()
        .enumerate()
        .filter_map(|(row_idx, row)| builder.place(&row.raw_label).map(|label| (row_idx, label)))
        .collect();

    let mut forest: BTreeMap<YearKey, Vec<AccountNode>> = BTreeMap::new();
    for year in &extract.years {
        let nodes: Vec<AccountNode> = placed
            .iter()
            .filter_map(|(row_idx, label)| {
                let amount = extract.rows[*row_idx].amounts.get(year).copied().flatten()?;
                Some(AccountNode {
                    name: label.name.clone(),
                    path: label.path.clone(),
                    indent_level: label.indent_level,
                    amount,
                })
            })
            .collect();
        if !nodes.is_empty() {
            forest.insert(year.clone(), nodes);
        }
    }
    forest
}
