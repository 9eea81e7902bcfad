//! 테이블 단위 검사 (널 행, 중복 행)

use std::collections::HashSet;

use super::finding::{Finding, Violation};
use super::record::Record;

/// 널 값이 하나라도 있는 행 검출 (행 단위)
pub fn check_nulls<R: Record>(rows: &[R]) -> Option<Finding> {
    Finding::from_rows(Violation::NullValues, rows.iter().filter(|row| row.has_null()))
}

/// 앞선 행과 모든 컬럼이 같은 행 검출
///
/// 첫 등장은 제외하고 반복 등장만 위반으로 셉니다.
pub fn check_duplicates<R: Record>(rows: &[R]) -> Option<Finding> {
    let mut seen = HashSet::with_capacity(rows.len());
    let duplicates = rows.iter().filter(|row| !seen.insert(row.cells()));

    Finding::from_rows(Violation::DuplicateRows, duplicates)
}

/// 테이블 단위 검사 전체 실행
pub fn check_table<R: Record>(rows: &[R]) -> Vec<Finding> {
    [check_nulls(rows), check_duplicates(rows)]
        .into_iter()
        .flatten()
        .collect()
}
