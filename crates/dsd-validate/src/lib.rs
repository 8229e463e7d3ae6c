#![deny(unsafe_code)]

//! Hierarchical footing validation.
//!
//! One validation run is request-scoped and synchronous: rebuild the account
//! hierarchy from the extract, evaluate the rule table and the cross-total
//! identities per reporting year, and assemble the result envelope. Nothing
//! is shared across runs.

pub mod diagnostics;
pub mod evaluator;
pub mod hierarchy;
pub mod special;
pub mod table;

pub use evaluator::{TOLERANCE, amounts_match, evaluate};
pub use hierarchy::{HierarchyBuilder, INDENT_WIDTH, PlacedLabel, SECTION_MARKER, build_forest};
pub use special::check_special_rules;
pub use table::AmountTable;

use std::collections::BTreeMap;

use tracing::info;

use dsd_ingest::SheetExtract;
use dsd_model::{FootingError, FootingItem, FootingReport, Result, SheetResult};
use dsd_rules::RuleSet;

/// Evaluate one year's amounts against the rule set.
///
/// Hierarchy results come first, in the configured top-level order (names
/// missing from the table are skipped), followed by the special rules.
pub fn validate_year(rule_set: &RuleSet, table: &AmountTable) -> Vec<FootingItem> {
    diagnostics::log_missing_rule_items(rule_set, table);

    let mut results = Vec::new();
    for parent in &rule_set.top_level {
        if rule_set.is_rule(parent) {
            results.push(evaluate(parent, rule_set, table));
        }
    }
    results.extend(check_special_rules(&rule_set.special, table));
    results
}

/// Run the full footing check for one extract.
///
/// `mismatch_count` counts failed items across the directly returned
/// per-year lists; mismatches nested inside children are not added.
pub fn check_footing(extract: &SheetExtract, rule_set: &RuleSet) -> Result<FootingReport> {
    let forest = build_forest(extract);
    if forest.is_empty() {
        return Err(FootingError::Message(
            "no valid year data after preprocessing".to_string(),
        ));
    }

    let mut results_by_year = BTreeMap::new();
    let mut mismatch_count = 0usize;
    for (year, nodes) in forest {
        let table = AmountTable::new(nodes);
        let year_results = validate_year(rule_set, &table);
        mismatch_count += year_results.iter().filter(|item| !item.is_match).count();
        results_by_year.insert(year, year_results);
    }

    info!(
        sheet = %rule_set.sheet_code,
        years = results_by_year.len(),
        mismatches = mismatch_count,
        "footing check complete"
    );

    Ok(FootingReport {
        total_sheets: 1,
        mismatch_count,
        results: vec![SheetResult {
            sheet: rule_set.sheet_code.clone(),
            title: rule_set.title.clone(),
            results_by_year,
        }],
    })
}
