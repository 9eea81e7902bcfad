//! 테이블 간 검사: trades → users 참조 무결성
//!
//! (login_hash, server_hash) 기준 left outer join에서
//! 짝이 없는 trades 행을 찾습니다. 널 키끼리는 같은 키로 봅니다.

use std::collections::HashSet;

use crate::db::models::{AccountRecord, TradeRecord};
use super::finding::{Finding, Violation};

/// users에 없는 계정을 참조하는 거래 검출
pub fn check_orphaned_trades(trades: &[TradeRecord], accounts: &[AccountRecord]) -> Option<Finding> {
    let known: HashSet<_> = accounts.iter().map(AccountRecord::composite_key).collect();

    let orphaned = trades
        .iter()
        .filter(|trade| !known.contains(&trade.composite_key()));

    Finding::from_rows(Violation::OrphanedForeignKey, orphaned)
}
