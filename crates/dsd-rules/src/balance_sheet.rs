//! Built-in taxonomy for sheet D210000 (연결재무상태표, consolidated
//! statement of financial position).
//!
//! Nested totals are referenced by bare name (unique within the sheet);
//! leaf line items that recur under several parents (e.g.
//! 매출채권및기타채권 under both 유동자산 and 비유동자산) are referenced by
//! full path so each parent foots against its own branch.

use std::collections::BTreeMap;

use crate::ruleset::{ChildRef, RuleSet, SpecialRule};

/// Sheet code of the consolidated statement of financial position.
pub const BALANCE_SHEET_CODE: &str = "D210000";

/// Sheet title as printed in the DSD extract.
pub const BALANCE_SHEET_TITLE: &str = "연결재무상태표";

fn branch(children: &mut BTreeMap<String, Vec<ChildRef>>, parent: &str, refs: &[&str]) {
    children.insert(
        parent.to_string(),
        refs.iter().map(|r| ChildRef::plus(*r)).collect(),
    );
}

impl RuleSet {
    /// The hand-maintained footing table for D210000.
    pub fn consolidated_balance_sheet() -> Self {
        let mut rules = BTreeMap::new();

        branch(&mut rules, "자산총계", &["유동자산", "비유동자산"]);
        branch(
            &mut rules,
            "유동자산",
            &[
                "자산총계 > 유동자산 > 현금및현금성자산",
                "자산총계 > 유동자산 > 매출채권및기타채권",
                "자산총계 > 유동자산 > 당기법인세자산",
                "자산총계 > 유동자산 > 금융자산",
                "자산총계 > 유동자산 > 기타자산",
                "자산총계 > 유동자산 > 재고자산",
                "자산총계 > 유동자산 > 매각예정비유동자산",
            ],
        );
        branch(
            &mut rules,
            "비유동자산",
            &[
                "자산총계 > 비유동자산 > 매출채권및기타채권",
                "자산총계 > 비유동자산 > 관계기업투자",
                "자산총계 > 비유동자산 > 유형자산",
                "자산총계 > 비유동자산 > 사용권자산",
                "자산총계 > 비유동자산 > 투자부동산",
                "자산총계 > 비유동자산 > 무형자산",
                "자산총계 > 비유동자산 > 금융자산",
                "자산총계 > 비유동자산 > 순확정급여자산",
                "자산총계 > 비유동자산 > 기타자산",
                "자산총계 > 비유동자산 > 이연법인세자산",
            ],
        );

        branch(&mut rules, "부채총계", &["유동부채", "비유동부채"]);
        branch(
            &mut rules,
            "유동부채",
            &[
                "부채총계 > 유동부채 > 매입채무및기타채무",
                "부채총계 > 유동부채 > 금융부채",
                "부채총계 > 유동부채 > 리스부채",
                "부채총계 > 유동부채 > 당기법인세부채",
                "부채총계 > 유동부채 > 충당부채",
                "부채총계 > 유동부채 > 매각예정비유동부채",
                "부채총계 > 유동부채 > 기타부채",
            ],
        );
        branch(
            &mut rules,
            "비유동부채",
            &[
                "부채총계 > 비유동부채 > 매입채무및기타채무",
                "부채총계 > 비유동부채 > 금융부채",
                "부채총계 > 비유동부채 > 리스부채",
                "부채총계 > 비유동부채 > 충당부채",
                "부채총계 > 비유동부채 > 기타부채",
                "부채총계 > 비유동부채 > 순확정급여부채",
                "부채총계 > 비유동부채 > 이연법인세부채",
            ],
        );

        branch(&mut rules, "자본총계", &["지배기업의소유지분", "비지배지분"]);
        branch(
            &mut rules,
            "지배기업의소유지분",
            &[
                "자본총계 > 지배기업의소유지분 > 자본금",
                "자본총계 > 지배기업의소유지분 > 주식발행초과금",
                "자본총계 > 지배기업의소유지분 > 이익잉여금",
                "자본총계 > 지배기업의소유지분 > 기타자본",
            ],
        );

        branch(&mut rules, "자본과부채총계", &["부채총계", "자본총계"]);

        RuleSet {
            sheet_code: BALANCE_SHEET_CODE.to_string(),
            title: BALANCE_SHEET_TITLE.to_string(),
            top_level: vec![
                "자산총계".to_string(),
                "부채총계".to_string(),
                "자본총계".to_string(),
                "자본과부채총계".to_string(),
            ],
            rules,
            special: vec![
                SpecialRule {
                    name: "자산부채자본일치".to_string(),
                    lhs: "자산총계".to_string(),
                    rhs: vec!["부채총계".to_string(), "자본총계".to_string()],
                },
                SpecialRule {
                    name: "부채자본합계일치".to_string(),
                    lhs: "자본과부채총계".to_string(),
                    rhs: vec!["부채총계".to_string(), "자본총계".to_string()],
                },
            ],
        }
    }
}
