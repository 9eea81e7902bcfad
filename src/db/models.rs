use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// users 테이블 DB 모델
///
/// 널 값 자체가 검사 대상이므로 모든 컬럼은 `Option`으로 읽습니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AccountRecord {
    pub login_hash: Option<String>,
    pub server_hash: Option<String>,
    pub country_hash: Option<String>,
    pub currency: Option<String>,
    /// 활성 플래그 (0 = 비활성, 1 = 활성)
    pub enable: Option<i64>,
    /// 위 컬럼 외 나머지 컬럼 (JSON 객체, 검증 대상 아님)
    ///
    /// 널/중복 검사는 전체 컬럼 기준이므로 함께 읽어 둡니다.
    pub extra_columns: Option<serde_json::Value>,
}

/// trades 테이블 DB 모델
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TradeRecord {
    pub login_hash: Option<String>,
    pub ticket_hash: Option<String>,
    pub server_hash: Option<String>,
    pub symbol: Option<String>,
    pub digits: Option<i64>,
    /// 매수/매도 방향 (0 = 매수, 1 = 매도)
    pub cmd: Option<i64>,
    pub volume: Option<f64>,
    pub open_time: Option<NaiveDateTime>,
    /// 저장된 그대로의 가격 문자열 (부동소수점 변환 없음)
    pub open_price: Option<String>,
    pub close_time: Option<NaiveDateTime>,
    pub contractsize: Option<f64>,
    /// 위 컬럼 외 나머지 컬럼 (JSON 객체, 검증 대상 아님)
    pub extra_columns: Option<serde_json::Value>,
}
