//! 검증 결과(Finding) 모델
//!
//! 검출과 출력 형식을 분리하기 위해 위반 종류를 타입으로 표현하고,
//! 문장 구성은 리포트 쪽에서 `describe`를 통해 처리합니다.

use std::fmt;
use serde::Serialize;

use super::record::Record;

/// 리포트에 포함할 샘플 행 키 최대 개수
pub const SAMPLE_KEY_LIMIT: usize = 5;

/// 감사 대상 테이블
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableName {
    Users,
    Trades,
}

impl TableName {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableName::Users => "users",
            TableName::Trades => "trades",
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 심각도
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARN",
            Severity::Error => "ERROR",
        };
        f.write_str(label)
    }
}

/// 위반 종류
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Violation {
    /// 널 값이 하나 이상 있는 행
    NullValues,
    /// 앞선 행과 모든 컬럼이 같은 행
    DuplicateRows,
    /// 해시 식별자에 영숫자 외 문자 포함
    UnexpectedCharacter,
    /// 허용 목록/열거 값 밖의 값
    UnexpectedEnumValue { column: &'static str },
    /// 음수가 될 수 없는 수치 컬럼의 음수
    NegativeNumber,
    /// close_time < open_time
    InvalidTemporalOrder,
    /// close_time이 감사 시작 시각 이후 (미청산)
    StillOpenTrade,
    /// users에 없는 계정을 참조하는 거래
    OrphanedForeignKey,
    /// 같은 계정 키에 enable 0과 1이 공존
    ConflictingFlag,
}

impl Violation {
    /// 규칙 식별자
    pub fn rule_id(&self) -> String {
        match self {
            Violation::NullValues => "null_values".to_string(),
            Violation::DuplicateRows => "duplicate_rows".to_string(),
            Violation::UnexpectedCharacter => "unexpected_character".to_string(),
            Violation::UnexpectedEnumValue { column } => format!("unexpected_{}", column),
            Violation::NegativeNumber => "negative_number".to_string(),
            Violation::InvalidTemporalOrder => "invalid_temporal_order".to_string(),
            Violation::StillOpenTrade => "still_open_trade".to_string(),
            Violation::OrphanedForeignKey => "orphaned_foreign_key".to_string(),
            Violation::ConflictingFlag => "conflicting_flag".to_string(),
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Violation::StillOpenTrade => Severity::Info,
            Violation::OrphanedForeignKey | Violation::ConflictingFlag => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// 사람이 읽는 한 줄 설명
    pub fn describe(&self, table: TableName) -> String {
        match self {
            Violation::NullValues => format!("The {} table contains null values.", table),
            Violation::DuplicateRows => format!("The {} table contains duplicated data.", table),
            Violation::UnexpectedCharacter => {
                format!("Unexpected characters are found in table {}.", table)
            }
            Violation::UnexpectedEnumValue { column } => {
                format!("Unexpected {} values are found in table {}.", column, table)
            }
            Violation::NegativeNumber => {
                format!("Invalid (negative) values are found in table {}.", table)
            }
            Violation::InvalidTemporalOrder => {
                format!("Invalid trade times in table {}: close_time precedes open_time.", table)
            }
            Violation::StillOpenTrade => {
                format!("Trades in table {} are still open (close_time is in the future).", table)
            }
            Violation::OrphanedForeignKey => format!(
                "The {} table references accounts which can not be found in the users table.",
                table
            ),
            Violation::ConflictingFlag => format!(
                "The {} table contains accounts with both enable = 1 and enable = 0 on the same server.",
                table
            ),
        }
    }
}

/// 검증 결과 한 건
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub table: TableName,
    #[serde(flatten)]
    pub violation: Violation,
    pub severity: Severity,
    /// 규칙에 걸린 행 수
    pub matched_rows: usize,
    /// 일부 행의 식별 키 (최대 `SAMPLE_KEY_LIMIT`개)
    pub sample_keys: Vec<String>,
}

impl Finding {
    pub fn new(table: TableName, violation: Violation, matched_rows: usize, sample_keys: Vec<String>) -> Self {
        let severity = violation.severity();
        Self {
            table,
            violation,
            severity,
            matched_rows,
            sample_keys,
        }
    }

    /// 위반 행 목록으로부터 생성 (위반 행이 없으면 None)
    pub fn from_rows<'a, R, I>(violation: Violation, rows: I) -> Option<Self>
    where
        R: Record + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        let mut matched_rows = 0;
        let mut sample_keys = Vec::new();

        for row in rows {
            matched_rows += 1;
            if sample_keys.len() < SAMPLE_KEY_LIMIT {
                sample_keys.push(row.row_key());
            }
        }

        if matched_rows == 0 {
            return None;
        }

        Some(Self::new(R::TABLE, violation, matched_rows, sample_keys))
    }

    pub fn rule_id(&self) -> String {
        self.violation.rule_id()
    }

    pub fn describe(&self) -> String {
        self.violation.describe(self.table)
    }
}
