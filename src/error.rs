//! 감사 실행 에러 타입
//!
//! 검증 결과(Finding)는 에러가 아니며 여기에 포함되지 않습니다.
//! 이 타입은 실행 자체를 중단시키는 설정/연결/로드 실패만 표현합니다.

/// 감사 실행 에러
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("환경 변수가 설정되지 않음: {0}")]
    MissingVariable(String),
    #[error("잘못된 설정 값 {key}: {reason}")]
    InvalidConfig { key: String, reason: String },
    #[error("기준 데이터 로드 실패 ({path}): {reason}")]
    ReferenceData { path: String, reason: String },
    #[error("데이터베이스 오류: {0}")]
    Database(#[from] sqlx::Error),
    #[error("테이블 로드 실패 ({table}, {attempts}회 시도): {source}")]
    Load {
        table: String,
        attempts: u32,
        #[source]
        source: sqlx::Error,
    },
}

pub type AuditResult<T> = Result<T, AuditError>;
