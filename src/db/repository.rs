use super::models::{AccountRecord, TradeRecord};
use sqlx::postgres::PgPool;
use sqlx::Error as SqlxError;

/// users 테이블 저장소 (읽기 전용)
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 전체 계정 조회
    ///
    /// 스키마마다 정수 폭이 다를 수 있어 모델 타입으로 캐스팅해서 읽습니다.
    /// 그 외 컬럼은 행 전체를 jsonb로 바꿔 `extra_columns`에 담습니다.
    pub async fn find_all(&self) -> Result<Vec<AccountRecord>, SqlxError> {
        let accounts = sqlx::query_as::<_, AccountRecord>(
            "SELECT login_hash::text AS login_hash,
                    server_hash::text AS server_hash,
                    country_hash::text AS country_hash,
                    currency::text AS currency,
                    enable::bigint AS enable,
                    to_jsonb(u) - ARRAY['login_hash', 'server_hash', 'country_hash',
                                        'currency', 'enable'] AS extra_columns
             FROM users u"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }
}

/// trades 테이블 저장소 (읽기 전용)
pub struct TradeRepository {
    pool: PgPool,
}

impl TradeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 전체 체결 내역 조회
    pub async fn find_all(&self) -> Result<Vec<TradeRecord>, SqlxError> {
        let trades = sqlx::query_as::<_, TradeRecord>(
            "SELECT login_hash::text AS login_hash,
                    ticket_hash::text AS ticket_hash,
                    server_hash::text AS server_hash,
                    symbol::text AS symbol,
                    digits::bigint AS digits,
                    cmd::bigint AS cmd,
                    volume::double precision AS volume,
                    open_time::timestamp AS open_time,
                    open_price::text AS open_price,
                    close_time::timestamp AS close_time,
                    contractsize::double precision AS contractsize,
                    to_jsonb(t) - ARRAY['login_hash', 'ticket_hash', 'server_hash', 'symbol',
                                        'digits', 'cmd', 'volume', 'open_time', 'open_price',
                                        'close_time', 'contractsize'] AS extra_columns
             FROM trades t"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(trades)
    }
}
