//! 기준 데이터 (유효 통화 / 유효 심볼)
//!
//! 멤버십 검사용 허용 목록입니다. 전역 상수가 아니라 감사기에 주입되는 값이며,
//! JSON 파일로 교체할 수 있어 재빌드 없이 갱신됩니다.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{AuditError, AuditResult};

/// 기본 유효 통화 목록
pub const DEFAULT_CURRENCIES: &[&str] = &[
    "USD", "EUR", "JPY", "GBP", "AUD", "CAD", "CHF", "CNY", "HKD", "NZD",
];

/// 기본 유효 심볼 목록
pub const DEFAULT_SYMBOLS: &[&str] = &[
    "EURUSD", "XAUUSD", "EURGBP", "USDJPY", "GBPCAD", "EURCHF",
    "NZDUSD", "XTIUSD", "AUDUSD", "CADCHF", "EURCAD", "AUDNZD",
    "XBRUSD", "XAGUSD", "NZDJPY", "USDCHF", "GBPUSD", "AUDJPY",
    "GBPAUD", "EURJPY", "US30", "GBPJPY", "USDCAD", "EURAUD", "GBPNZD",
    "GBPCHF", "NZDCAD", "AUDSGD", "USDSGD", "CHFJPY", "AUDCAD",
    "EURNZD", "USDNOK", "NZDCHF", "CHCUSD", "NAS100", "USIDX", "GER30",
    "COFFEE", "XPTUSD", "CADJPY", "BTCUSD", "HK50", "EURSGD", "AUDCHF",
    "EURCNH", "US500", "NZDSEK", "AUDCNH", "NZDSGD", "GBPSGD",
    "USDZAR", "JPN225", "HSCHKD", "USDSEK", "USDCNH", "AUS200",
    "FRA40", "VIX", "USDMXN", "SGDJPY", "UK100", "USDCZK", "USD,CHF",
    "EURHKD", "GBPSEK", "BCHUSD", "ETHUSD", "EURNOK", "USDRUB",
    "USDDKK",
];

/// 기준 데이터
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    pub currencies: HashSet<String>,
    pub symbols: HashSet<String>,
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCIES.iter().copied(), DEFAULT_SYMBOLS.iter().copied())
    }
}

impl ReferenceData {
    pub fn new<C, S>(currencies: C, symbols: S) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            currencies: currencies.into_iter().map(Into::into).collect(),
            symbols: symbols.into_iter().map(Into::into).collect(),
        }
    }

    /// JSON 파일에서 로드
    ///
    /// 형식: `{"currencies": ["USD", ...], "symbols": ["EURUSD", ...]}`
    pub fn from_file(path: impl AsRef<Path>) -> AuditResult<Self> {
        let path = path.as_ref();
        let to_error = |reason: String| AuditError::ReferenceData {
            path: path.display().to_string(),
            reason,
        };

        let content = fs::read_to_string(path).map_err(|e| to_error(e.to_string()))?;
        let reference: Self = serde_json::from_str(&content).map_err(|e| to_error(e.to_string()))?;

        info!("📂 기준 데이터 로드: {} (통화 {}개, 심볼 {}개)",
              path.display(), reference.currencies.len(), reference.symbols.len());

        Ok(reference)
    }

    /// 경로가 있으면 파일에서, 없으면 기본값
    pub fn load(path: Option<&str>) -> AuditResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn is_valid_currency(&self, currency: &str) -> bool {
        self.currencies.contains(currency)
    }

    pub fn is_valid_symbol(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }
}
