//! 감사 리포트 및 출력 싱크
//!
//! 위반 규칙마다 정확히 한 줄을 출력합니다. 걸린 행이 없는 규칙은 출력하지 않습니다.
//! JSON 형식은 같은 내용을 기계가 읽을 수 있게 내보냅니다.

use std::io::Write;
use std::str::FromStr;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::audit::{Finding, Severity, TableName};

/// 리포트 출력 형식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("지원하지 않는 리포트 형식: {}", other)),
        }
    }
}

/// 감사 결과
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub run_id: Uuid,
    pub started_at: NaiveDateTime,
    pub users_rows: usize,
    pub trades_rows: usize,
    pub findings: Vec<Finding>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// 테이블별 결과
    pub fn findings_for(&self, table: TableName) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.table == table)
    }

    /// 심각도 이상의 결과 수
    pub fn count_at_least(&self, severity: Severity) -> usize {
        self.findings.iter().filter(|f| f.severity >= severity).count()
    }

    /// 텍스트 형식 (결과당 한 줄)
    pub fn render_text(&self) -> Vec<String> {
        self.findings.iter().map(format_finding).collect()
    }

    pub fn render_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// 결과 한 건을 한 줄로
pub fn format_finding(finding: &Finding) -> String {
    let mut line = format!(
        "[{}] {}.{}: {} ({} {}",
        finding.severity,
        finding.table,
        finding.rule_id(),
        finding.describe(),
        finding.matched_rows,
        if finding.matched_rows == 1 { "row" } else { "rows" }
    );
    if !finding.sample_keys.is_empty() {
        line.push_str("; e.g. ");
        line.push_str(&finding.sample_keys.join(", "));
    }
    line.push(')');
    line
}

/// 리포트 출력 대상
pub trait ReportSink {
    fn emit(&mut self, report: &AuditReport) -> std::io::Result<()>;
}

/// `Write` 구현체로 출력하는 싱크 (stdout, 파일, 테스트 버퍼)
pub struct WriterSink<W: Write> {
    writer: W,
    format: ReportFormat,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W, format: ReportFormat) -> Self {
        Self { writer, format }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for WriterSink<W> {
    fn emit(&mut self, report: &AuditReport) -> std::io::Result<()> {
        match self.format {
            ReportFormat::Text => {
                for line in report.render_text() {
                    writeln!(self.writer, "{}", line)?;
                }
            }
            ReportFormat::Json => {
                let json = report.render_json().map_err(std::io::Error::from)?;
                writeln!(self.writer, "{}", json)?;
            }
        }
        self.writer.flush()
    }
}
