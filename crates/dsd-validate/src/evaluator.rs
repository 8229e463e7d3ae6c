//! Recursive footing evaluation against the rule table.

use tracing::{error, info, warn};

use dsd_model::{FootingItem, display_segment};
use dsd_rules::RuleSet;

use crate::table::AmountTable;

/// Maximum absolute difference for two amounts to count as equal. Absorbs
/// floating rounding in the source data, not genuine discrepancies.
pub const TOLERANCE: f64 = 0.01;

pub fn amounts_match(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < TOLERANCE
}

/// Evaluate one rule parent: compare its recorded amount against the signed
/// sum of its resolved children, recursing into children that are themselves
/// rule parents.
pub fn evaluate(parent: &str, rule_set: &RuleSet, table: &AmountTable) -> FootingItem {
    let mut chain: Vec<&str> = Vec::new();
    evaluate_inner(parent, rule_set, table, &mut chain)
}

fn evaluate_inner<'r>(
    parent: &'r str,
    rule_set: &'r RuleSet,
    table: &AmountTable,
    chain: &mut Vec<&'r str>,
) -> FootingItem {
    let Some(actual) = table.resolve_any(parent) else {
        warn!(parent = %parent, "parent item not found");
        return FootingItem::unresolved(parent);
    };

    let children = rule_set.children(parent).unwrap_or(&[]);
    chain.push(parent);

    let mut child_sum = 0.0_f64;
    let mut child_results: Vec<FootingItem> = Vec::with_capacity(children.len());
    for child in children {
        let reference = child.reference.as_str();
        let Some(resolved) = table.resolve_child(reference) else {
            warn!(child = %reference, parent = %parent, "child item not found");
            child_results.push(FootingItem::unresolved(reference));
            continue;
        };
        let signed = resolved * child.sign.multiplier();
        child_sum += signed;

        if rule_set.is_rule(reference) {
            if chain.contains(&reference) {
                // A cyclic table should have been rejected by verify(); stub
                // the repeat reference instead of recursing forever.
                error!(
                    child = %reference,
                    chain = %chain.join(" -> "),
                    "cyclic rule reference, not recursing"
                );
                child_results.push(FootingItem::unresolved(reference));
            } else {
                child_results.push(evaluate_inner(reference, rule_set, table, chain));
            }
        } else {
            child_results.push(FootingItem::leaf(display_segment(reference), signed));
        }
    }

    chain.pop();

    let is_match = amounts_match(actual, child_sum);
    if is_match {
        info!(parent = %parent, expected = child_sum, actual, "footing matches");
    } else {
        warn!(
            parent = %parent,
            expected = child_sum,
            actual,
            diff = actual - child_sum,
            "footing mismatch"
        );
    }

    FootingItem {
        item: display_segment(parent).to_string(),
        expected: Some(child_sum),
        actual: Some(actual),
        is_match,
        children: child_results,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use dsd_model::AccountNode;
    use dsd_rules::{ChildRef, RuleSet};

    use super::*;

    fn node(name: &str, path: &str, amount: f64) -> AccountNode {
        AccountNode {
            name: name.to_string(),
            path: path.to_string(),
            indent_level: path.matches(" > ").count(),
            amount,
        }
    }

    fn rule_set(rules: BTreeMap<String, Vec<ChildRef>>) -> RuleSet {
        RuleSet {
            sheet_code: "T000000".to_string(),
            title: "test".to_string(),
            top_level: rules.keys().cloned().collect(),
            rules,
            special: Vec::new(),
        }
    }

    #[test]
    fn matching_parent_foots_against_children() {
        let table = AmountTable::new(vec![
            node("자산총계", "자산총계", 300.0),
            node("유동자산", "자산총계 > 유동자산", 120.0),
            node("비유동자산", "자산총계 > 비유동자산", 180.0),
        ]);
        let rules = rule_set(BTreeMap::from([(
            "자산총계".to_string(),
            vec![ChildRef::plus("유동자산"), ChildRef::plus("비유동자산")],
        )]));

        let result = evaluate("자산총계", &rules, &table);
        assert!(result.is_match);
        assert_eq!(result.expected, Some(300.0));
        assert_eq!(result.actual, Some(300.0));
        assert_eq!(result.children.len(), 2);
        assert_eq!(result.children[0].item, "유동자산");
        assert_eq!(result.children[0].actual, Some(120.0));
        assert_eq!(result.children[0].expected, None);
        assert!(result.children[0].is_match);
    }

    #[test]
    fn mismatching_parent_is_flagged() {
        let table = AmountTable::new(vec![
            node("자산총계", "자산총계", 310.0),
            node("유동자산", "자산총계 > 유동자산", 120.0),
            node("비유동자산", "자산총계 > 비유동자산", 180.0),
        ]);
        let rules = rule_set(BTreeMap::from([(
            "자산총계".to_string(),
            vec![ChildRef::plus("유동자산"), ChildRef::plus("비유동자산")],
        )]));

        let result = evaluate("자산총계", &rules, &table);
        assert!(!result.is_match);
        assert_eq!(result.expected, Some(300.0));
        assert_eq!(result.actual, Some(310.0));
    }

    #[test]
    fn minus_child_contributes_negated() {
        let table = AmountTable::new(vec![
            node("순자산", "순자산", 70.0),
            node("자산", "자산", 100.0),
            node("부채", "부채", 30.0),
        ]);
        let rules = rule_set(BTreeMap::from([(
            "순자산".to_string(),
            vec![ChildRef::plus("자산"), ChildRef::minus("부채")],
        )]));

        let result = evaluate("순자산", &rules, &table);
        assert!(result.is_match);
        assert_eq!(result.expected, Some(70.0));
        // The leaf displays the signed contribution.
        assert_eq!(result.children[1].actual, Some(-30.0));
    }

    #[test]
    fn nested_rules_recurse() {
        let table = AmountTable::new(vec![
            node("자본과부채총계", "자본과부채총계", 300.0),
            node("부채총계", "부채총계", 180.0),
            node("유동부채", "부채총계 > 유동부채", 80.0),
            node("비유동부채", "부채총계 > 비유동부채", 100.0),
            node("자본총계", "자본총계", 120.0),
        ]);
        let rules = rule_set(BTreeMap::from([
            (
                "자본과부채총계".to_string(),
                vec![ChildRef::plus("부채총계"), ChildRef::plus("자본총계")],
            ),
            (
                "부채총계".to_string(),
                vec![ChildRef::plus("유동부채"), ChildRef::plus("비유동부채")],
            ),
        ]));

        let result = evaluate("자본과부채총계", &rules, &table);
        assert!(result.is_match);
        let nested = &result.children[0];
        assert_eq!(nested.item, "부채총계");
        assert_eq!(nested.expected, Some(180.0));
        assert_eq!(nested.children.len(), 2);
        // The non-rule child stays a leaf.
        assert_eq!(result.children[1].expected, None);
    }

    #[test]
    fn missing_parent_yields_failed_stub() {
        let table = AmountTable::new(vec![node("유동자산", "유동자산", 120.0)]);
        let rules = rule_set(BTreeMap::from([(
            "자산총계".to_string(),
            vec![ChildRef::plus("유동자산")],
        )]));

        let result = evaluate("자산총계", &rules, &table);
        assert!(!result.is_match);
        assert_eq!(result.item, "자산총계");
        assert_eq!(result.actual, None);
        assert!(result.children.is_empty());
    }

    #[test]
    fn missing_child_is_stubbed_and_excluded_from_sum() {
        let table = AmountTable::new(vec![
            node("자산총계", "자산총계", 300.0),
            node("유동자산", "자산총계 > 유동자산", 120.0),
        ]);
        let rules = rule_set(BTreeMap::from([(
            "자산총계".to_string(),
            vec![ChildRef::plus("유동자산"), ChildRef::plus("비유동자산")],
        )]));

        let result = evaluate("자산총계", &rules, &table);
        // The sum deliberately excludes the unresolved child.
        assert_eq!(result.expected, Some(120.0));
        assert!(!result.is_match);
        let stub = &result.children[1];
        assert_eq!(stub.item, "비유동자산");
        assert!(!stub.is_match);
        assert_eq!(stub.actual, None);
    }

    #[test]
    fn cyclic_reference_is_stubbed_not_recursed() {
        // An unverified table with a two-rule cycle must still terminate.
        let table = AmountTable::new(vec![node("가", "가", 10.0), node("나", "나", 10.0)]);
        let rules = rule_set(BTreeMap::from([
            ("가".to_string(), vec![ChildRef::plus("나")]),
            ("나".to_string(), vec![ChildRef::plus("가")]),
        ]));

        let result = evaluate("가", &rules, &table);
        let inner = &result.children[0];
        assert_eq!(inner.item, "나");
        let back_ref = &inner.children[0];
        assert_eq!(back_ref.item, "가");
        assert!(!back_ref.is_match);
        assert!(back_ref.children.is_empty());
    }

    #[test]
    fn tolerance_absorbs_rounding_noise_only() {
        assert!(amounts_match(100.0, 100.009));
        assert!(!amounts_match(100.0, 100.011));
    }
}
