//! 테이블 행 공통 인터페이스
//!
//! 널/중복 검사는 컬럼 구성과 무관하게 동작해야 하므로
//! 각 행을 비교 가능한 셀 목록으로 펼쳐서 다룹니다.

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::db::models::{AccountRecord, TradeRecord};
use super::finding::TableName;

/// 계정 복합 키 (login_hash, server_hash)
pub type CompositeKey<'a> = (Option<&'a str>, Option<&'a str>);

const NULL_KEY: &str = "<null>";

/// 비교용 셀 값
///
/// 실수는 비트 패턴으로 보관해 `Eq`/`Hash`를 만족시킵니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Cell<'a> {
    Null,
    Text(&'a str),
    Int(i64),
    Float(u64),
    Time(NaiveDateTime),
    /// 타입 없는 나머지 컬럼 (`컬럼명=JSON 값`)
    Extra(String),
}

impl<'a> Cell<'a> {
    pub fn text(value: &'a Option<String>) -> Self {
        value.as_deref().map_or(Cell::Null, Cell::Text)
    }

    pub fn int(value: Option<i64>) -> Self {
        value.map_or(Cell::Null, Cell::Int)
    }

    pub fn float(value: Option<f64>) -> Self {
        match value {
            // NaN은 값이 없는 것으로 취급
            None => Cell::Null,
            Some(v) if v.is_nan() => Cell::Null,
            // 0.0과 -0.0 비트 차이 정규화
            Some(v) if v == 0.0 => Cell::Float(0.0_f64.to_bits()),
            Some(v) => Cell::Float(v.to_bits()),
        }
    }

    pub fn time(value: Option<NaiveDateTime>) -> Self {
        value.map_or(Cell::Null, Cell::Time)
    }

    /// 나머지 컬럼 JSON 객체를 컬럼명 순서대로 펼침
    ///
    /// JSON null은 `Null`, 객체가 아닌 값은 통째로 한 셀이 됩니다.
    pub fn extras(value: &Option<Value>) -> Vec<Self> {
        match value {
            None => Vec::new(),
            Some(Value::Object(columns)) => {
                let mut names: Vec<&String> = columns.keys().collect();
                names.sort();
                names
                    .into_iter()
                    .map(|name| match &columns[name] {
                        Value::Null => Cell::Null,
                        other => Cell::Extra(format!("{}={}", name, other)),
                    })
                    .collect()
            }
            Some(Value::Null) => vec![Cell::Null],
            Some(other) => vec![Cell::Extra(other.to_string())],
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }
}

/// 감사 대상 행
pub trait Record {
    const TABLE: TableName;

    /// 모든 컬럼 값 (컬럼 순서 고정)
    fn cells(&self) -> Vec<Cell<'_>>;

    /// 리포트용 행 식별 키
    fn row_key(&self) -> String;

    fn has_null(&self) -> bool {
        self.cells().iter().any(Cell::is_null)
    }
}

fn key_part(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(NULL_KEY)
}

impl AccountRecord {
    pub fn composite_key(&self) -> CompositeKey<'_> {
        (self.login_hash.as_deref(), self.server_hash.as_deref())
    }
}

impl TradeRecord {
    pub fn composite_key(&self) -> CompositeKey<'_> {
        (self.login_hash.as_deref(), self.server_hash.as_deref())
    }
}

/// 복합 키 표시 문자열
pub fn format_key(key: CompositeKey<'_>) -> String {
    format!("{}/{}", key.0.unwrap_or(NULL_KEY), key.1.unwrap_or(NULL_KEY))
}

impl Record for AccountRecord {
    const TABLE: TableName = TableName::Users;

    fn cells(&self) -> Vec<Cell<'_>> {
        vec![
            Cell::text(&self.login_hash),
            Cell::text(&self.server_hash),
            Cell::text(&self.country_hash),
            Cell::text(&self.currency),
            Cell::int(self.enable),
        ]
        .into_iter()
        .chain(Cell::extras(&self.extra_columns))
        .collect()
    }

    fn row_key(&self) -> String {
        format_key(self.composite_key())
    }
}

impl Record for TradeRecord {
    const TABLE: TableName = TableName::Trades;

    fn cells(&self) -> Vec<Cell<'_>> {
        vec![
            Cell::text(&self.login_hash),
            Cell::text(&self.ticket_hash),
            Cell::text(&self.server_hash),
            Cell::text(&self.symbol),
            Cell::int(self.digits),
            Cell::int(self.cmd),
            Cell::float(self.volume),
            Cell::time(self.open_time),
            Cell::text(&self.open_price),
            Cell::time(self.close_time),
            Cell::float(self.contractsize),
        ]
        .into_iter()
        .chain(Cell::extras(&self.extra_columns))
        .collect()
    }

    fn row_key(&self) -> String {
        key_part(&self.ticket_hash).to_string()
    }
}
