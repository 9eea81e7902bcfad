//! 행 단위 검사
//!
//! 규칙마다 위반 행 집합을 구하고, 비어 있지 않은 집합만 Finding으로 만듭니다.
//! 널 필드는 문자/부호 규칙에 걸리지 않습니다 (널 검사가 따로 잡음).
//! 반면 멤버십 규칙에서는 널도 "목록에 없는 값"으로 취급합니다.
//!
//! open_price 자릿수와 digits 비교 검사는 의도적으로 없습니다.
//! 실수 가격을 문자열로 다시 만들면 뒤쪽 0이 사라져서 (0.1000 → 0.1)
//! 비교 결과를 믿을 수 없습니다.

use crate::db::models::{AccountRecord, TradeRecord};
use super::finding::{Finding, Violation};
use super::reference::ReferenceData;

/// 허용 방향 코드 (0 = 매수, 1 = 매도)
const VALID_CMDS: [i64; 2] = [0, 1];
/// 허용 활성 플래그
const VALID_ENABLES: [i64; 2] = [0, 1];

/// 영문자/숫자 외 문자가 하나라도 있으면 true (`[^a-zA-Z0-9]` 검색과 동일)
pub fn has_unexpected_character(value: &str) -> bool {
    value.chars().any(|c| !c.is_ascii_alphanumeric())
}

fn field_has_unexpected_character(field: &Option<String>) -> bool {
    field.as_deref().map_or(false, has_unexpected_character)
}

fn is_negative_int(value: Option<i64>) -> bool {
    value.map_or(false, |v| v < 0)
}

fn is_negative_float(value: Option<f64>) -> bool {
    value.map_or(false, |v| v < 0.0)
}

fn is_member(value: Option<i64>, allowed: &[i64]) -> bool {
    value.map_or(false, |v| allowed.contains(&v))
}

/// trades 행 단위 검사
pub fn check_trades(trades: &[TradeRecord], reference: &ReferenceData) -> Vec<Finding> {
    let unexpected_character = trades.iter().filter(|t| {
        field_has_unexpected_character(&t.ticket_hash)
            || field_has_unexpected_character(&t.login_hash)
            || field_has_unexpected_character(&t.server_hash)
    });

    let unexpected_symbol = trades.iter().filter(|t| {
        !t.symbol.as_deref().map_or(false, |s| reference.is_valid_symbol(s))
    });

    let invalid_cmd = trades.iter().filter(|t| !is_member(t.cmd, &VALID_CMDS));

    let negative = trades.iter().filter(|t| {
        is_negative_int(t.digits) || is_negative_float(t.volume) || is_negative_float(t.contractsize)
    });

    [
        Finding::from_rows(Violation::UnexpectedCharacter, unexpected_character),
        Finding::from_rows(Violation::UnexpectedEnumValue { column: "symbol" }, unexpected_symbol),
        Finding::from_rows(Violation::UnexpectedEnumValue { column: "cmd" }, invalid_cmd),
        Finding::from_rows(Violation::NegativeNumber, negative),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// users 행 단위 검사
pub fn check_accounts(accounts: &[AccountRecord], reference: &ReferenceData) -> Vec<Finding> {
    let unexpected_character = accounts.iter().filter(|a| {
        field_has_unexpected_character(&a.login_hash) || field_has_unexpected_character(&a.server_hash)
    });

    let unexpected_currency = accounts.iter().filter(|a| {
        !a.currency.as_deref().map_or(false, |c| reference.is_valid_currency(c))
    });

    let invalid_enable = accounts.iter().filter(|a| !is_member(a.enable, &VALID_ENABLES));

    [
        Finding::from_rows(Violation::UnexpectedCharacter, unexpected_character),
        Finding::from_rows(Violation::UnexpectedEnumValue { column: "currency" }, unexpected_currency),
        Finding::from_rows(Violation::UnexpectedEnumValue { column: "enable" }, invalid_enable),
    ]
    .into_iter()
    .flatten()
    .collect()
}
