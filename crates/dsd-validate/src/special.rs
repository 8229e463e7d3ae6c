//! Cross-total identities (e.g. Assets = Liabilities + Equity).
//!
//! These sit outside the indentation hierarchy and use a different
//! missing-reference policy than ordinary rules: an unresolved left-hand
//! side skips the whole rule, an unresolved right-hand term skips just that
//! term. Both are logged so the gap stays visible.

use tracing::warn;

use dsd_model::{FootingItem, display_segment};
use dsd_rules::SpecialRule;

use crate::evaluator::amounts_match;
use crate::table::AmountTable;

/// Evaluate the special rules in order against one year's amounts.
pub fn check_special_rules(special: &[SpecialRule], table: &AmountTable) -> Vec<FootingItem> {
    let mut results = Vec::with_capacity(special.len());

    for rule in special {
        let Some(lhs_value) = table.resolve_any(&rule.lhs) else {
            warn!(rule = %rule.name, lhs = %rule.lhs, "special rule lhs not found, skipping rule");
            continue;
        };

        let mut rhs_sum = 0.0_f64;
        let mut children = Vec::with_capacity(rule.rhs.len());
        for term in &rule.rhs {
            let Some(value) = table.resolve_any(term) else {
                warn!(rule = %rule.name, term = %term, "special rule term not found, skipping term");
                continue;
            };
            rhs_sum += value;
            // Informational only; terms are not independently validated.
            children.push(FootingItem::leaf(display_segment(term), value));
        }

        let is_match = amounts_match(lhs_value, rhs_sum);
        if !is_match {
            warn!(
                rule = %rule.name,
                lhs = lhs_value,
                rhs = rhs_sum,
                diff = lhs_value - rhs_sum,
                "special rule mismatch"
            );
        }

        let rhs_label = rule
            .rhs
            .iter()
            .map(|term| display_segment(term))
            .collect::<Vec<_>>()
            .join("+");
        results.push(FootingItem {
            item: format!(
                "{} ({} = {})",
                rule.name,
                display_segment(&rule.lhs),
                rhs_label
            ),
            expected: Some(rhs_sum),
            actual: Some(lhs_value),
            is_match,
            children,
        });
    }

    results
}
