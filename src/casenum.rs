use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static RE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"第(\d+)號").unwrap());

/// Series a decision number belongs to. Declaration order is sort order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CaseKind {
    /// 促轉司字
    Division,
    /// 促轉復查字 and other 復查 numbers
    Review,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaseNumber {
    pub kind: CaseKind,
    pub number: Option<u32>,
}

impl CaseNumber {
    pub fn parse(case_no: &str) -> Self {
        let kind = if case_no.contains("促轉司字") {
            CaseKind::Division
        } else if case_no.contains("復查") {
            CaseKind::Review
        } else {
            CaseKind::Other
        };
        let number = RE_NUMBER.captures(case_no).and_then(|c| c[1].parse().ok());
        CaseNumber { kind, number }
    }

    /// Series first, then number; unnumbered entries go last in their series.
    pub fn sort_key(&self) -> (CaseKind, u32) {
        (self.kind, self.number.unwrap_or(u32::MAX))
    }
}

/// Numbers missing between the smallest and largest seen, as inclusive
/// `(first, last)` ranges. One range per hole, however wide it is.
pub fn sequence_gaps(numbers: &[u32]) -> Vec<(u32, u32)> {
    let seen: BTreeSet<u32> = numbers.iter().copied().collect();
    seen.iter()
        .zip(seen.iter().skip(1))
        .filter(|&(&a, &b)| b - a > 1)
        .map(|(&a, &b)| (a + 1, b - 1))
        .collect()
}
