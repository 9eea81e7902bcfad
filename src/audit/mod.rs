//! 데이터 품질 감사 엔진
//!
//! users / trades 스냅샷에 대해 모든 규칙을 한 번씩 적용합니다.
//! 검출 결과는 실행을 중단시키지 않으며, 모든 규칙이 항상 끝까지 평가됩니다.
//!
//! 실행 순서:
//! 1. 테이블 단위 검사 (널, 중복)
//! 2. 행 단위 검사 (문자, 멤버십, 부호)
//! 3. trades 시간 검사
//! 4. users 엣지 케이스 검사
//! 5. 테이블 간 참조 검사 (두 스냅샷이 모두 필요)

pub mod cross;
pub mod edge;
pub mod finding;
pub mod record;
pub mod reference;
pub mod row;
pub mod table;
pub mod temporal;

use chrono::NaiveDateTime;
use log::{debug, info};
use uuid::Uuid;

use crate::db::models::{AccountRecord, TradeRecord};
use crate::report::AuditReport;

pub use finding::{Finding, Severity, TableName, Violation, SAMPLE_KEY_LIMIT};
pub use record::{Cell, CompositeKey, Record};
pub use reference::ReferenceData;
pub use temporal::audit_clock;

/// 한 번에 읽어 들인 두 테이블의 불변 스냅샷
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub accounts: Vec<AccountRecord>,
    pub trades: Vec<TradeRecord>,
}

impl Snapshot {
    pub fn new(accounts: Vec<AccountRecord>, trades: Vec<TradeRecord>) -> Self {
        Self { accounts, trades }
    }
}

/// 감사기
pub struct Auditor {
    reference: ReferenceData,
}

impl Auditor {
    pub fn new(reference: ReferenceData) -> Self {
        Self { reference }
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// users 테이블 검사
    pub fn audit_accounts(&self, accounts: &[AccountRecord]) -> Vec<Finding> {
        let mut findings = table::check_table(accounts);
        findings.extend(row::check_accounts(accounts, &self.reference));
        findings.extend(edge::check_conflicting_enable(accounts));

        debug!("users 검사 완료: {}행, {}건", accounts.len(), findings.len());
        findings
    }

    /// trades 테이블 검사
    pub fn audit_trades(&self, trades: &[TradeRecord], now: NaiveDateTime) -> Vec<Finding> {
        let mut findings = table::check_table(trades);
        findings.extend(row::check_trades(trades, &self.reference));
        findings.extend(temporal::check_trade_times(trades, now));

        debug!("trades 검사 완료: {}행, {}건", trades.len(), findings.len());
        findings
    }

    /// 전체 감사 실행
    ///
    /// `started_at`은 미청산 판정 기준 시각이기도 합니다.
    pub fn run(&self, snapshot: &Snapshot, started_at: NaiveDateTime) -> AuditReport {
        let run_id = Uuid::new_v4();
        info!("🔍 감사 시작 (run_id: {}, 기준 시각: {})", run_id, started_at);

        let mut findings = self.audit_accounts(&snapshot.accounts);
        findings.extend(self.audit_trades(&snapshot.trades, started_at));
        findings.extend(cross::check_orphaned_trades(&snapshot.trades, &snapshot.accounts));

        info!("✅ 감사 완료: 검출 {}건", findings.len());

        AuditReport {
            run_id,
            started_at,
            users_rows: snapshot.accounts.len(),
            trades_rows: snapshot.trades.len(),
            findings,
        }
    }
}

impl Default for Auditor {
    fn default() -> Self {
        Self::new(ReferenceData::default())
    }
}
