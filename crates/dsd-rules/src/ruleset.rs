//! Declarative footing rule set.
//!
//! A rule set is hand-authored configuration for one financial-statement
//! taxonomy: which parent accounts must foot against which (signed) child
//! references, plus the cross-total identities that are not expressible
//! through the indentation hierarchy. Swapping taxonomies means swapping this
//! table, never the evaluation algorithm.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RuleError};

/// Contribution direction of a child reference.
///
/// Written in the JSON form as a `-` prefix on the reference string
/// (e.g. `"-감가상각누계액"` for a contra-account).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    /// Multiplier applied to the resolved child amount.
    pub fn multiplier(self) -> f64 {
        match self {
            Sign::Plus => 1.0,
            Sign::Minus => -1.0,
        }
    }
}

/// One signed child reference of a footing rule.
///
/// The reference is either a bare account name or a full ancestor path; the
/// evaluator resolves paths exactly first and falls back to the bare name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ChildRef {
    pub sign: Sign,
    pub reference: String,
}

impl ChildRef {
    pub fn plus(reference: impl Into<String>) -> Self {
        Self {
            sign: Sign::Plus,
            reference: reference.into(),
        }
    }

    pub fn minus(reference: impl Into<String>) -> Self {
        Self {
            sign: Sign::Minus,
            reference: reference.into(),
        }
    }
}

impl TryFrom<String> for ChildRef {
    type Error = String;

    fn try_from(raw: String) -> std::result::Result<Self, Self::Error> {
        let trimmed = raw.trim();
        let (sign, reference) = match trimmed.strip_prefix('-') {
            Some(rest) => (Sign::Minus, rest.trim_start()),
            None => (Sign::Plus, trimmed),
        };
        if reference.is_empty() {
            return Err("empty child reference".to_string());
        }
        Ok(Self {
            sign,
            reference: reference.to_string(),
        })
    }
}

impl From<ChildRef> for String {
    fn from(child: ChildRef) -> String {
        match child.sign {
            Sign::Plus => child.reference,
            Sign::Minus => format!("-{}", child.reference),
        }
    }
}

/// A cross-total identity (`lhs = rhs₁ + rhs₂ + …`).
///
/// Right-hand terms carry no per-term sign; they always add.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialRule {
    pub name: String,
    pub lhs: String,
    pub rhs: Vec<String>,
}

/// The full footing configuration for one sheet taxonomy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Sheet code the taxonomy applies to (e.g. `"D210000"`).
    pub sheet_code: String,
    /// Human-readable sheet title.
    pub title: String,
    /// Ordered list of parents evaluated at the top level; names missing
    /// from `rules` are skipped by the driver, not an error.
    pub top_level: Vec<String>,
    /// Parent name (or path) to signed child references. A child whose
    /// reference is itself a key here is evaluated recursively.
    pub rules: BTreeMap<String, Vec<ChildRef>>,
    /// Cross-total identities, evaluated in order.
    #[serde(default)]
    pub special: Vec<SpecialRule>,
}

impl RuleSet {
    /// Load a rule set from a JSON string and verify it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let set: RuleSet = serde_json::from_str(json)?;
        set.verify()?;
        Ok(set)
    }

    /// Load a rule set from a JSON file and verify it.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Whether a reference names a nested rule (drives evaluator recursion).
    pub fn is_rule(&self, reference: &str) -> bool {
        self.rules.contains_key(reference)
    }

    pub fn children(&self, parent: &str) -> Option<&[ChildRef]> {
        self.rules.get(parent).map(Vec::as_slice)
    }

    /// Structural checks on the table itself.
    ///
    /// Rejects empty references, duplicate special-rule names, and any cycle
    /// in the rule graph. The recursive evaluator also carries its own guard,
    /// but a cyclic table is a configuration bug and is refused up front.
    pub fn verify(&self) -> Result<()> {
        for (parent, children) in &self.rules {
            for child in children {
                if child.reference.trim().is_empty() {
                    return Err(RuleError::EmptyReference {
                        parent: parent.clone(),
                    });
                }
            }
        }

        let mut seen = std::collections::BTreeSet::new();
        for special in &self.special {
            if !seen.insert(special.name.as_str()) {
                return Err(RuleError::DuplicateSpecialRule {
                    name: special.name.clone(),
                });
            }
        }

        self.check_acyclic()
    }

    /// Depth-first search over rule-to-rule edges; reports the first cycle
    /// found as the chain of parent names leading back around.
    fn check_acyclic(&self) -> Result<()> {
        let mut done = std::collections::BTreeSet::new();
        for start in self.rules.keys() {
            if done.contains(start.as_str()) {
                continue;
            }
            let mut chain: Vec<&str> = Vec::new();
            self.visit(start, &mut chain, &mut done)?;
        }
        Ok(())
    }

    fn visit<'a>(
        &'a self,
        parent: &'a str,
        chain: &mut Vec<&'a str>,
        done: &mut std::collections::BTreeSet<&'a str>,
    ) -> Result<()> {
        if let Some(pos) = chain.iter().position(|name| *name == parent) {
            let mut cycle: Vec<&str> = chain[pos..].to_vec();
            cycle.push(parent);
            return Err(RuleError::CyclicRule {
                chain: cycle.join(" -> "),
            });
        }
        if done.contains(parent) {
            return Ok(());
        }
        chain.push(parent);
        if let Some(children) = self.rules.get(parent) {
            for child in children {
                if self.rules.contains_key(child.reference.as_str()) {
                    self.visit(child.reference.as_str(), chain, done)?;
                }
            }
        }
        chain.pop();
        done.insert(parent);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_set(rules: BTreeMap<String, Vec<ChildRef>>) -> RuleSet {
        RuleSet {
            sheet_code: "T000000".to_string(),
            title: "test".to_string(),
            top_level: rules.keys().cloned().collect(),
            rules,
            special: Vec::new(),
        }
    }

    #[test]
    fn child_ref_parses_sign_prefix() {
        let plus = ChildRef::try_from("유동자산".to_string()).unwrap();
        assert_eq!(plus, ChildRef::plus("유동자산"));
        let minus = ChildRef::try_from("-감가상각누계액".to_string()).unwrap();
        assert_eq!(minus, ChildRef::minus("감가상각누계액"));
        assert!(ChildRef::try_from("-".to_string()).is_err());
    }

    #[test]
    fn child_ref_round_trips_through_string() {
        let original = ChildRef::minus("기타자본");
        let text = String::from(original.clone());
        assert_eq!(text, "-기타자본");
        assert_eq!(ChildRef::try_from(text).unwrap(), original);
    }

    #[test]
    fn verify_accepts_acyclic_table() {
        let set = tiny_set(BTreeMap::from([
            (
                "총계".to_string(),
                vec![ChildRef::plus("가"), ChildRef::plus("나")],
            ),
            ("가".to_string(), vec![ChildRef::plus("가1")]),
        ]));
        set.verify().expect("acyclic table verifies");
    }

    #[test]
    fn verify_rejects_self_reference() {
        let set = tiny_set(BTreeMap::from([(
            "총계".to_string(),
            vec![ChildRef::plus("총계")],
        )]));
        let err = set.verify().unwrap_err();
        assert!(matches!(err, RuleError::CyclicRule { .. }));
    }

    #[test]
    fn verify_rejects_mutual_recursion() {
        let set = tiny_set(BTreeMap::from([
            ("가".to_string(), vec![ChildRef::plus("나")]),
            ("나".to_string(), vec![ChildRef::plus("가")]),
        ]));
        let err = set.verify().unwrap_err();
        let RuleError::CyclicRule { chain } = err else {
            panic!("expected cycle error");
        };
        assert!(chain.contains("가") && chain.contains("나"));
    }

    #[test]
    fn verify_rejects_duplicate_special_names() {
        let mut set = tiny_set(BTreeMap::new());
        set.special = vec![
            SpecialRule {
                name: "일치".to_string(),
                lhs: "가".to_string(),
                rhs: vec!["나".to_string()],
            },
            SpecialRule {
                name: "일치".to_string(),
                lhs: "다".to_string(),
                rhs: vec!["라".to_string()],
            },
        ];
        assert!(matches!(
            set.verify().unwrap_err(),
            RuleError::DuplicateSpecialRule { .. }
        ));
    }

    #[test]
    fn json_round_trip_preserves_signs() {
        let json = r#"{
            "sheet_code": "T000000",
            "title": "test",
            "top_level": ["순자산"],
            "rules": { "순자산": ["자산", "-부채"] },
            "special": []
        }"#;
        let set = RuleSet::from_json_str(json).expect("load rule set");
        let children = set.children("순자산").unwrap();
        assert_eq!(children[0], ChildRef::plus("자산"));
        assert_eq!(children[1], ChildRef::minus("부채"));

        let text = serde_json::to_string(&set).unwrap();
        let round = RuleSet::from_json_str(&text).unwrap();
        assert_eq!(round, set);
    }
}
