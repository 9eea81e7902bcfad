pub mod models;
pub mod repository;

use std::future::Future;
use std::time::Duration;
use log::{info, warn};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Error as SqlxError;
use tokio::time::sleep;

use crate::audit::Snapshot;
use crate::config::{DatabaseConfig, RetryConfig};
use crate::error::{AuditError, AuditResult};

pub use models::{AccountRecord, TradeRecord};
pub use repository::{AccountRepository, TradeRepository};

/// PostgreSQL 연결 풀 생성
///
/// 감사 한 번에 연결 하나면 충분하므로 풀 크기를 작게 유지합니다.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, SqlxError> {
    info!("🗄️  데이터베이스 연결 중... ({}:{}/{})", config.host, config.port, config.database);

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&config.connection_url())
        .await?;

    info!("✅ 데이터베이스 연결 완료");

    Ok(pool)
}

/// users, trades 전체 스냅샷 로드
///
/// 두 테이블을 동시에 읽고, 둘 다 성공해야만 스냅샷을 반환합니다.
/// 한쪽이라도 재시도 후 실패하면 부분 스냅샷 없이 에러를 반환합니다.
pub async fn load_snapshot(pool: &PgPool, retry: &RetryConfig) -> AuditResult<Snapshot> {
    let account_repo = AccountRepository::new(pool.clone());
    let trade_repo = TradeRepository::new(pool.clone());

    let (accounts, trades) = tokio::try_join!(
        with_retry("users", retry, || account_repo.find_all()),
        with_retry("trades", retry, || trade_repo.find_all()),
    )?;

    info!("📥 users {}행, trades {}행 로드 완료", accounts.len(), trades.len());

    Ok(Snapshot::new(accounts, trades))
}

/// 지수 백오프 재시도
pub async fn with_retry<T, F, Fut>(table: &str, retry: &RetryConfig, mut op: F) -> AuditResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SqlxError>>,
{
    let max_attempts = retry.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < max_attempts => {
                let delay = retry.delay_ms(attempt - 1);
                warn!("⚠️ {} 테이블 로드 실패 ({}/{}), {}ms 후 재시도: {}",
                      table, attempt, max_attempts, delay, e);
                sleep(Duration::from_millis(delay)).await;
            }
            Err(e) => {
                return Err(AuditError::Load {
                    table: table.to_string(),
                    attempts: attempt,
                    source: e,
                });
            }
        }
    }
}
