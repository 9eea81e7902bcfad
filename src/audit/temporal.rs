//! trades 시간 검사
//!
//! 기준 시각은 감사 시작 시 한 번만 잡아서 모든 행에 같은 값을 씁니다.
//! `timestamp` 컬럼은 UTC로 저장되므로 기준 시각도 UTC입니다.

use chrono::{NaiveDateTime, Utc};

use crate::db::models::TradeRecord;
use super::finding::{Finding, Violation};

/// 감사 기준 시각 (UTC, 타임존 정보 없음)
pub fn audit_clock() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// 시간 순서 / 미청산 검사
pub fn check_trade_times(trades: &[TradeRecord], now: NaiveDateTime) -> Vec<Finding> {
    let close_before_open = trades.iter().filter(|t| match (t.open_time, t.close_time) {
        (Some(open), Some(close)) => open > close,
        _ => false,
    });

    // 미래 close_time은 에러가 아니라 아직 청산되지 않은 주문
    let still_open = trades
        .iter()
        .filter(|t| t.close_time.map_or(false, |close| close > now));

    [
        Finding::from_rows(Violation::InvalidTemporalOrder, close_before_open),
        Finding::from_rows(Violation::StillOpenTrade, still_open),
    ]
    .into_iter()
    .flatten()
    .collect()
}
