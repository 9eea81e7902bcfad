//! 통합 테스트
//!
//! DB 없이 메모리 스냅샷으로 전체 감사 흐름을 검증합니다.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::Rng;
use xaudit::audit::{Severity, TableName};
use xaudit::db::{AccountRecord, TradeRecord};
use xaudit::{AuditReport, Auditor, ReferenceData, ReportFormat, ReportSink, Snapshot, WriterSink};

fn t0() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(10, 0, 0))
        .unwrap()
}

fn audit_clock() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap()
}

fn account(login: &str, server: &str, currency: &str, enable: i64) -> AccountRecord {
    AccountRecord {
        login_hash: Some(login.to_string()),
        server_hash: Some(server.to_string()),
        country_hash: Some("KR".to_string()),
        currency: Some(currency.to_string()),
        enable: Some(enable),
        extra_columns: None,
    }
}

fn trade(ticket: &str, login: &str, server: &str) -> TradeRecord {
    TradeRecord {
        login_hash: Some(login.to_string()),
        ticket_hash: Some(ticket.to_string()),
        server_hash: Some(server.to_string()),
        symbol: Some("EURUSD".to_string()),
        digits: Some(5),
        cmd: Some(0),
        volume: Some(1.0),
        open_time: Some(t0()),
        open_price: Some("1.08450".to_string()),
        close_time: Some(t0() + Duration::hours(1)),
        contractsize: Some(100000.0),
        extra_columns: None,
    }
}

fn rule_ids(report: &AuditReport, table: TableName) -> Vec<String> {
    report.findings_for(table).map(|f| f.rule_id()).collect()
}

/// 정상 데이터는 검출 0건
#[test]
fn test_end_to_end_clean_scenario() {
    println!("🚀 정상 시나리오 테스트 시작");

    let snapshot = Snapshot::new(
        vec![account("L1", "S1", "USD", 1)],
        vec![trade("T1", "L1", "S1")],
    );
    let report = Auditor::default().run(&snapshot, audit_clock());

    assert!(report.is_clean(), "unexpected findings: {:?}", report.render_text());

    let mut sink = WriterSink::new(Vec::new(), ReportFormat::Text);
    sink.emit(&report).unwrap();
    assert!(sink.into_inner().is_empty());

    println!("✅ 정상 시나리오 테스트 완료");
}

/// cmd ∉ {0,1} 행만 정확히 검출
#[test]
fn test_invalid_cmd_exactness() {
    let mut rng = rand::thread_rng();
    let accounts = vec![account("L1", "S1", "USD", 1)];

    for _ in 0..50 {
        let mut trades = Vec::new();
        let mut expected_invalid = 0;
        for i in 0..rng.gen_range(1..30) {
            let mut t = trade(&format!("T{}", i), "L1", "S1");
            let cmd = rng.gen_range(-2..4);
            if cmd != 0 && cmd != 1 {
                expected_invalid += 1;
            }
            t.cmd = Some(cmd);
            trades.push(t);
        }

        let report = Auditor::default().run(&Snapshot::new(accounts.clone(), trades), audit_clock());
        let invalid_cmd = report
            .findings_for(TableName::Trades)
            .find(|f| f.rule_id() == "unexpected_cmd");

        match invalid_cmd {
            Some(finding) => assert_eq!(finding.matched_rows, expected_invalid),
            None => assert_eq!(expected_invalid, 0),
        }
    }
}

/// 통화 검사는 기준 목록 밖 통화가 하나라도 있을 때만 발생
#[test]
fn test_currency_iff_outside_reference_set() {
    let valid = ["USD", "EUR", "JPY", "GBP", "AUD", "CAD", "CHF", "CNY", "HKD", "NZD"];
    let accounts: Vec<_> = valid
        .iter()
        .enumerate()
        .map(|(i, c)| account(&format!("L{}", i), "S1", c, 1))
        .collect();

    let report = Auditor::default().run(&Snapshot::new(accounts.clone(), vec![]), audit_clock());
    assert!(!rule_ids(&report, TableName::Users).contains(&"unexpected_currency".to_string()));

    let mut with_invalid = accounts;
    with_invalid.push(account("L99", "S1", "KRW", 1));
    let report = Auditor::default().run(&Snapshot::new(with_invalid, vec![]), audit_clock());
    assert!(rule_ids(&report, TableName::Users).contains(&"unexpected_currency".to_string()));
}

/// 해시 식별자 문자 검사
#[test]
fn test_character_validity() {
    for (login, expect_finding) in [("abc123", false), ("abc-123", true), ("abc 123", true)] {
        let snapshot = Snapshot::new(
            vec![account(login, "S1", "USD", 1)],
            vec![trade("T1", login, "S1")],
        );
        let report = Auditor::default().run(&snapshot, audit_clock());

        for table in [TableName::Users, TableName::Trades] {
            let flagged = rule_ids(&report, table).contains(&"unexpected_character".to_string());
            assert_eq!(flagged, expect_finding, "login {:?} on {}", login, table);
        }
    }
}

/// close_time < open_time 검출
#[test]
fn test_temporal_order() {
    let mut reversed = trade("T2", "L1", "S1");
    reversed.open_time = Some(t0());
    reversed.close_time = Some(t0() - Duration::hours(1));

    let snapshot = Snapshot::new(
        vec![account("L1", "S1", "USD", 1)],
        vec![trade("T1", "L1", "S1"), reversed],
    );
    let report = Auditor::default().run(&snapshot, audit_clock());

    assert_eq!(rule_ids(&report, TableName::Trades), vec!["invalid_temporal_order"]);
    let finding = &report.findings[0];
    assert_eq!(finding.matched_rows, 1);
    assert_eq!(finding.sample_keys, vec!["T2"]);

    let ordered = Snapshot::new(vec![account("L1", "S1", "USD", 1)], vec![trade("T1", "L1", "S1")]);
    assert!(Auditor::default().run(&ordered, audit_clock()).is_clean());
}

/// 기준 시각 이후 close_time은 정보성 결과
#[test]
fn test_still_open_trade() {
    let mut open = trade("T1", "L1", "S1");
    open.close_time = Some(audit_clock() + Duration::days(1));

    let snapshot = Snapshot::new(vec![account("L1", "S1", "USD", 1)], vec![open]);
    let report = Auditor::default().run(&snapshot, audit_clock());

    assert_eq!(rule_ids(&report, TableName::Trades), vec!["still_open_trade"]);
    assert_eq!(report.count_at_least(Severity::Warning), 0);
}

/// 같은 스냅샷을 두 번 감사해도 결과가 같음
#[test]
fn test_audit_is_idempotent() {
    let snapshot = Snapshot::new(
        vec![
            account("L1", "S1", "USD", 1),
            account("L1", "S1", "USD", 1),
            AccountRecord { currency: None, ..account("L2", "S1", "USD", 0) },
        ],
        vec![
            trade("T1", "L1", "S1"),
            trade("T1", "L1", "S1"),
            TradeRecord { volume: None, ..trade("T3", "L2", "S1") },
        ],
    );

    let auditor = Auditor::default();
    let first = auditor.run(&snapshot, audit_clock());
    let second = auditor.run(&snapshot, audit_clock());

    assert!(!first.is_clean());
    assert_eq!(first.findings, second.findings);
    assert_ne!(first.run_id, second.run_id);
}

/// users에 없는 계정을 참조하는 거래
#[test]
fn test_orphaned_trades() {
    let snapshot = Snapshot::new(
        vec![account("L1", "S1", "USD", 1)],
        vec![
            trade("T1", "L1", "S1"),
            trade("T2", "L2", "S1"),
            trade("T3", "L1", "S2"),
        ],
    );
    let report = Auditor::default().run(&snapshot, audit_clock());

    let orphaned: Vec<_> = report
        .findings_for(TableName::Trades)
        .filter(|f| f.rule_id() == "orphaned_foreign_key")
        .collect();
    assert_eq!(orphaned.len(), 1);
    assert_eq!(orphaned[0].matched_rows, 2);
    assert_eq!(orphaned[0].sample_keys, vec!["T2", "T3"]);
}

/// enable 0/1 충돌
#[test]
fn test_conflicting_enable_flag() {
    let consistent = Snapshot::new(
        vec![account("L1", "S1", "USD", 1), account("L2", "S1", "EUR", 0)],
        vec![],
    );
    assert!(Auditor::default().run(&consistent, audit_clock()).is_clean());

    let conflicting = Snapshot::new(
        vec![account("L1", "S1", "USD", 1), account("L1", "S1", "EUR", 0)],
        vec![],
    );
    let report = Auditor::default().run(&conflicting, audit_clock());
    assert_eq!(rule_ids(&report, TableName::Users), vec!["conflicting_flag"]);
}

/// 주입된 기준 데이터 사용
#[test]
fn test_injected_reference_data() {
    let reference = ReferenceData::new(["KRW"], ["BTCKRW"]);
    let mut t = trade("T1", "L1", "S1");
    t.symbol = Some("BTCKRW".to_string());

    let snapshot = Snapshot::new(vec![account("L1", "S1", "KRW", 1)], vec![t]);
    let report = Auditor::new(reference).run(&snapshot, audit_clock());

    assert!(report.is_clean());
}

/// 널/중복 검출과 텍스트 출력
#[test]
fn test_nulls_and_duplicates_report() {
    let snapshot = Snapshot::new(
        vec![account("L1", "S1", "USD", 1), account("L1", "S1", "USD", 1)],
        vec![TradeRecord { contractsize: None, ..trade("T1", "L1", "S1") }],
    );
    let report = Auditor::default().run(&snapshot, audit_clock());

    assert_eq!(rule_ids(&report, TableName::Users), vec!["duplicate_rows"]);
    assert_eq!(rule_ids(&report, TableName::Trades), vec!["null_values"]);

    let lines = report.render_text();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("The users table contains duplicated data."));
    assert!(lines[1].contains("The trades table contains null values."));
}

/// 타입 없는 나머지 컬럼과 NaN도 널/중복 검사 대상
#[test]
fn test_extra_columns_and_nan_in_table_checks() {
    let with_note = |note: serde_json::Value| AccountRecord {
        extra_columns: Some(serde_json::json!({ "note": note })),
        ..account("L1", "S1", "USD", 1)
    };
    let snapshot = Snapshot::new(
        vec![with_note(serde_json::json!("a")), with_note(serde_json::json!("b"))],
        vec![TradeRecord { volume: Some(f64::NAN), ..trade("T1", "L1", "S1") }],
    );
    let report = Auditor::default().run(&snapshot, audit_clock());

    assert!(rule_ids(&report, TableName::Users).is_empty());
    assert_eq!(rule_ids(&report, TableName::Trades), vec!["null_values"]);

    let snapshot = Snapshot::new(vec![with_note(serde_json::Value::Null)], vec![]);
    let report = Auditor::default().run(&snapshot, audit_clock());

    assert_eq!(rule_ids(&report, TableName::Users), vec!["null_values"]);
    assert!(report.render_text()[0].ends_with("(1 row; e.g. L1/S1)"));
}
