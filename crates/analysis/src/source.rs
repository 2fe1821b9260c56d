use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use stocklens_core::cache::port::{Cache, CacheExt};
use stocklens_core::market::entity::PricePoint;
use stocklens_core::market::error::MarketError;
use stocklens_core::market::port::MarketData;
use stocklens_core::store::error::StoreError;
use stocklens_core::store::port::QuoteStore;
use tracing::{debug, warn};

fn storage_error(e: StoreError) -> MarketError {
    MarketError::Storage(e.to_string())
}

/// # Summary
/// 基于 `QuoteStore` 的行情数据源，可选地在前面叠加一层 TTL 缓存。
///
/// # Invariants
/// - 只缓存历史 K 线；实时报价每次都直接读取存储。
/// - 缓存读写失败只记录告警，不影响结果。
pub struct StoreMarketData {
    store: Arc<dyn QuoteStore>,
    cache: Option<Arc<dyn Cache>>,
    // 历史数据缓存的存活时间
    ttl: Duration,
}

impl StoreMarketData {
    pub fn new(store: Arc<dyn QuoteStore>) -> Self {
        Self {
            store,
            cache: None,
            ttl: Duration::ZERO,
        }
    }

    /// 挂载缓存，`ttl` 为历史数据的存活时间。
    pub fn with_cache(mut self, cache: Arc<dyn Cache>, ttl: Duration) -> Self {
        self.cache = Some(cache);
        self.ttl = ttl;
        self
    }

    fn history_key(code: &str, limit: usize) -> String {
        format!("history:{code}:{limit}")
    }
}

#[async_trait]
impl MarketData for StoreMarketData {
    /// # Summary
    /// 读取最近 `limit` 根 K 线。
    ///
    /// # Logic
    /// 1. 命中缓存则直接返回。
    /// 2. 否则读取存储，并把非空结果写回缓存。
    async fn recent_history(
        &self,
        code: &str,
        limit: usize,
    ) -> Result<Vec<PricePoint>, MarketError> {
        let key = Self::history_key(code, limit);

        if let Some(cache) = &self.cache {
            match cache.get::<Vec<PricePoint>>(&key).await {
                Ok(Some(points)) => {
                    debug!(code, limit, "history cache hit");
                    return Ok(points);
                }
                Ok(None) => {}
                Err(e) => warn!(code, error = %e, "history cache read failed"),
            }
        }

        let points = self
            .store
            .load_history(code, limit)
            .await
            .map_err(storage_error)?;

        if let Some(cache) = &self.cache {
            if !points.is_empty() {
                if let Err(e) = cache.set(&key, &points, Some(self.ttl)).await {
                    warn!(code, error = %e, "history cache write failed");
                }
            }
        }

        Ok(points)
    }

    async fn latest_price(&self, code: &str) -> Result<Option<f64>, MarketError> {
        let quote = self
            .store
            .load_realtime(code)
            .await
            .map_err(storage_error)?;
        Ok(quote.map(|q| q.latest_price))
    }
}
