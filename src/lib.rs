//! xAudit - 트레이딩 플랫폼 데이터 품질 감사
//!
//! users(계정) / trades(체결) 테이블을 한 번에 읽어
//! 식별자 형식, 열거 값, 시간 순서, 참조 무결성, 널/중복 행을 검사합니다.
//! 읽기 전용이며 검출 결과는 출력만 하고 저장하지 않습니다.

pub mod audit;
pub mod config;
pub mod db;
pub mod error;
pub mod report;

pub use audit::{Auditor, Finding, ReferenceData, Snapshot, Violation};
pub use config::{AuditSettings, ConfigProvider, DatabaseConfig, EnvConfigProvider};
pub use error::{AuditError, AuditResult};
pub use report::{AuditReport, ReportFormat, ReportSink, WriterSink};
