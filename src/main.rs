use anyhow::Context;
use log::{error, info};
use sqlx::postgres::PgPool;

use xaudit::config::{AuditSettings, DatabaseConfig, EnvConfigProvider};
use xaudit::audit::audit_clock;
use xaudit::db;
use xaudit::{AuditReport, Auditor, ReferenceData, ReportSink, WriterSink};

/// 스냅샷 로드 후 감사 실행
async fn run_audit(pool: &PgPool, auditor: &Auditor, settings: &AuditSettings) -> anyhow::Result<AuditReport> {
    // 미청산 판정 기준 시각은 실행당 한 번만
    let started_at = audit_clock();

    let snapshot = db::load_snapshot(pool, &settings.retry)
        .await
        .context("스냅샷 로드 실패")?;

    Ok(auditor.run(&snapshot, started_at))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("xAudit 데이터 품질 감사 시작");

    // 설정 로드 (연결 전에 실패하면 바로 종료)
    let provider = EnvConfigProvider::load();
    let db_config = DatabaseConfig::from_provider(&provider)?;
    let settings = AuditSettings::from_provider(&provider)?;
    let reference = ReferenceData::load(settings.reference_data_path.as_deref())?;
    let auditor = Auditor::new(reference);

    let pool = match db::connect(&db_config).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ 데이터베이스 연결 실패: {}", e);
            println!("An error occurred: {}", e);
            std::process::exit(1);
        }
    };

    let result = run_audit(&pool, &auditor, &settings).await;

    // 결과와 무관하게 연결 해제
    pool.close().await;
    info!("🔌 데이터베이스 연결 해제");

    match result {
        Ok(report) => {
            let mut sink = WriterSink::new(std::io::stdout().lock(), settings.report_format);
            sink.emit(&report).context("리포트 출력 실패")?;
            info!("📋 검출 {}건 (users {}행, trades {}행)",
                  report.findings.len(), report.users_rows, report.trades_rows);
            Ok(())
        }
        Err(e) => {
            error!("❌ 감사 실패: {:#}", e);
            println!("An error occurred: {:#}", e);
            std::process::exit(1);
        }
    }
}
