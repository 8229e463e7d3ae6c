//! Missing-item diagnostics.
//!
//! Before evaluation, rule parents that do not appear in a year's item set
//! are logged with fuzzy-match hints. This never changes results; it exists
//! to make taxonomy/extract drift easy to spot in the logs.

use tracing::{info, warn};

use dsd_rules::RuleSet;

use crate::table::AmountTable;

/// Strip everything but letters and digits, for containment comparison.
fn normalize(label: &str) -> String {
    label.chars().filter(|ch| ch.is_alphanumeric()).collect()
}

pub fn log_missing_rule_items(rule_set: &RuleSet, table: &AmountTable) {
    let available: Vec<&str> = table.item_names().collect();

    let missing: Vec<&str> = rule_set
        .rules
        .keys()
        .map(String::as_str)
        .filter(|key| !available.contains(key))
        .collect();
    if missing.is_empty() {
        return;
    }
    warn!(items = ?missing, "rule items missing from sheet");

    for item in missing {
        let wanted = normalize(item);
        if wanted.is_empty() {
            continue;
        }
        let hints: Vec<&str> = available
            .iter()
            .copied()
            .filter(|candidate| {
                let have = normalize(candidate);
                !have.is_empty() && (have.contains(&wanted) || wanted.contains(&have))
            })
            .collect();
        if !hints.is_empty() {
            info!(item = %item, hints = ?hints, "possible matches for missing rule item");
        }
    }
}
