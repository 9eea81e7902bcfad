//! 엣지 케이스 검사: 같은 계정 키에 enable 0/1 공존

use std::collections::{BTreeSet, HashMap};

use crate::db::models::AccountRecord;
use super::finding::{Finding, TableName, Violation, SAMPLE_KEY_LIMIT};
use super::record::{format_key, CompositeKey};

/// enable 값이 충돌하는 계정 검출
///
/// 키 구성요소가 널인 행은 그룹에서 제외합니다.
/// 관측된 enable 값 집합이 정확히 {0, 1}인 그룹만 위반입니다.
pub fn check_conflicting_enable(accounts: &[AccountRecord]) -> Option<Finding> {
    let mut groups: HashMap<CompositeKey<'_>, (usize, BTreeSet<Option<i64>>)> = HashMap::new();
    // 첫 등장 순서 유지 (리포트 샘플 안정성)
    let mut order: Vec<CompositeKey<'_>> = Vec::new();

    for account in accounts {
        let key = account.composite_key();
        if key.0.is_none() || key.1.is_none() {
            continue;
        }
        let entry = groups.entry(key).or_insert_with(|| {
            order.push(key);
            (0, BTreeSet::new())
        });
        entry.0 += 1;
        entry.1.insert(account.enable);
    }

    let conflicting: BTreeSet<Option<i64>> = [Some(0), Some(1)].into_iter().collect();

    let mut matched_rows = 0;
    let mut sample_keys = Vec::new();
    for key in order {
        let (rows, values) = &groups[&key];
        if *values == conflicting {
            matched_rows += rows;
            if sample_keys.len() < SAMPLE_KEY_LIMIT {
                sample_keys.push(format_key(key));
            }
        }
    }

    if matched_rows == 0 {
        return None;
    }

    Some(Finding::new(TableName::Users, Violation::ConflictingFlag, matched_rows, sample_keys))
}
