//! Property tests for the hierarchy builder and the rule evaluator.

use std::collections::BTreeMap;

use proptest::prelude::{ProptestConfig, any, prop_assert, prop_assert_eq, proptest};

use dsd_model::AccountNode;
use dsd_rules::{ChildRef, RuleSet};
use dsd_validate::{AmountTable, HierarchyBuilder, evaluate};

fn rule_set(rules: BTreeMap<String, Vec<ChildRef>>) -> RuleSet {
    RuleSet {
        sheet_code: "T000000".to_string(),
        title: "property".to_string(),
        top_level: rules.keys().cloned().collect(),
        rules,
        special: Vec::new(),
    }
}

fn node(name: &str, path: &str, amount: f64) -> AccountNode {
    AccountNode {
        name: name.to_string(),
        path: path.to_string(),
        indent_level: path.matches(" > ").count(),
        amount,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// For any valid nesting pattern, the rebuilt path is exactly the
    /// ancestor chain joined with the separator.
    #[test]
    fn indentation_round_trips_to_ancestor_paths(raw_levels in proptest::collection::vec(0usize..4, 1..24)) {
        // Clamp so each row nests at most one level deeper than its
        // predecessor; the first row is a root.
        let mut levels = Vec::with_capacity(raw_levels.len());
        let mut prev = 0usize;
        for (idx, raw) in raw_levels.iter().enumerate() {
            let level = if idx == 0 { 0 } else { (*raw).min(prev + 1) };
            levels.push(level);
            prev = level;
        }

        // Independent oracle: remember the last full path seen per level.
        let mut last_path_at: Vec<String> = Vec::new();
        let mut builder = HierarchyBuilder::new();
        for (idx, level) in levels.iter().enumerate() {
            let name = format!("계정{idx}");
            let raw_label = format!("{}{name}", "    ".repeat(*level));
            let placed = builder.place(&raw_label).expect("non-blank label places");

            let expected_path = if *level == 0 {
                name.clone()
            } else {
                format!("{} > {name}", last_path_at[*level - 1])
            };
            last_path_at.truncate(*level);
            last_path_at.push(expected_path.clone());

            prop_assert_eq!(placed.indent_level, *level);
            prop_assert_eq!(&placed.name, &name);
            prop_assert_eq!(&placed.path, &expected_path);
        }
    }

    /// When every reference resolves, footing holds iff the books balance,
    /// at any recursion depth.
    #[test]
    fn sum_invariant_is_depth_independent(
        depth in 1usize..8,
        leaf_amounts in proptest::collection::vec(-10_000i64..10_000, 8),
        unbalanced in any::<bool>(),
    ) {
        // Chain of rules: 단계i = 단계i+1 + 잎i, deepest rule foots two leaves.
        let mut rules = BTreeMap::new();
        for level in 0..depth {
            let mut children = vec![ChildRef::plus(format!("잎{level}"))];
            if level + 1 < depth {
                children.insert(0, ChildRef::plus(format!("단계{}", level + 1)));
            }
            rules.insert(format!("단계{level}"), children);
        }
        let set = rule_set(rules);

        // Build amounts bottom-up so every rule foots exactly.
        let mut nodes = Vec::new();
        let mut running = 0.0f64;
        for level in (0..depth).rev() {
            let leaf = leaf_amounts[level] as f64;
            nodes.push(node(&format!("잎{level}"), &format!("잎{level}"), leaf));
            running += leaf;
            let recorded = if level == 0 && unbalanced { running + 1.0 } else { running };
            nodes.push(node(&format!("단계{level}"), &format!("단계{level}"), recorded));
        }
        let table = AmountTable::new(nodes);

        let result = evaluate("단계0", &set, &table);
        prop_assert_eq!(result.is_match, !unbalanced);

        // Every nested rule below the root foots exactly regardless of depth.
        let mut current = &result;
        while let Some(nested) = current.children.iter().find(|c| c.expected.is_some()) {
            prop_assert!(nested.is_match);
            current = nested;
        }
    }

    /// Negating one child's sign shifts the expected sum by twice that
    /// child's value.
    #[test]
    fn sign_flip_shifts_expected_by_twice_the_value(
        a in -10_000i64..10_000,
        b in -10_000i64..10_000,
    ) {
        let table = AmountTable::new(vec![
            node("합계", "합계", (a + b) as f64),
            node("가", "가", a as f64),
            node("나", "나", b as f64),
        ]);

        let plus_set = rule_set(BTreeMap::from([(
            "합계".to_string(),
            vec![ChildRef::plus("가"), ChildRef::plus("나")],
        )]));
        let minus_set = rule_set(BTreeMap::from([(
            "합계".to_string(),
            vec![ChildRef::plus("가"), ChildRef::minus("나")],
        )]));

        let plus = evaluate("합계", &plus_set, &table);
        let minus = evaluate("합계", &minus_set, &table);
        let shift = plus.expected.unwrap() - minus.expected.unwrap();
        prop_assert_eq!(shift, 2.0 * b as f64);
    }
}
