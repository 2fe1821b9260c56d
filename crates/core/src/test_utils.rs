//! 测试替身，仅在 `test-utils` feature 下编译。

use crate::market::entity::{PricePoint, RealtimeQuote};
use crate::market::error::MarketError;
use crate::market::port::MarketData;
use crate::store::error::StoreError;
use crate::store::port::QuoteStore;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// # Summary
/// 内存版行情数据源。
///
/// # Invariants
/// - 写入的序列原样保存，调用方需保证升序。
/// - `history_calls` 记录 `recent_history` 的调用次数，供缓存测试断言。
#[derive(Default)]
pub struct InMemoryMarketData {
    history: DashMap<String, Vec<PricePoint>>,
    prices: DashMap<String, f64>,
    history_calls: AtomicUsize,
}

impl InMemoryMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(self, code: &str, points: Vec<PricePoint>) -> Self {
        self.history.insert(code.to_string(), points);
        self
    }

    pub fn with_price(self, code: &str, price: f64) -> Self {
        self.prices.insert(code.to_string(), price);
        self
    }

    pub fn history_calls(&self) -> usize {
        self.history_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketData for InMemoryMarketData {
    async fn recent_history(
        &self,
        code: &str,
        limit: usize,
    ) -> Result<Vec<PricePoint>, MarketError> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        let points = self
            .history
            .get(code)
            .map(|v| v.value().clone())
            .unwrap_or_default();
        let skip = points.len().saturating_sub(limit);
        Ok(points.into_iter().skip(skip).collect())
    }

    async fn latest_price(&self, code: &str) -> Result<Option<f64>, MarketError> {
        Ok(self.prices.get(code).map(|p| *p.value()))
    }
}

/// 始终失败的行情数据源，用于验证错误传播。
pub struct FailingMarketData;

#[async_trait]
impl MarketData for FailingMarketData {
    async fn recent_history(
        &self,
        _code: &str,
        _limit: usize,
    ) -> Result<Vec<PricePoint>, MarketError> {
        Err(MarketError::Storage("connection refused".to_string()))
    }

    async fn latest_price(&self, _code: &str) -> Result<Option<f64>, MarketError> {
        Err(MarketError::Storage("connection refused".to_string()))
    }
}

/// 内存版行情存储。
#[derive(Default)]
pub struct InMemoryQuoteStore {
    history: DashMap<String, Vec<PricePoint>>,
    realtime: DashMap<String, RealtimeQuote>,
    load_calls: AtomicUsize,
}

impl InMemoryQuoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_calls(&self) -> usize {
        self.load_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuoteStore for InMemoryQuoteStore {
    async fn save_history(&self, code: &str, points: &[PricePoint]) -> Result<(), StoreError> {
        let mut entry = self.history.entry(code.to_string()).or_default();
        for point in points {
            entry.retain(|p| p.date != point.date);
            entry.push(point.clone());
        }
        entry.sort_by_key(|p| p.date);
        Ok(())
    }

    async fn load_history(&self, code: &str, limit: usize) -> Result<Vec<PricePoint>, StoreError> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);
        let points = self
            .history
            .get(code)
            .map(|v| v.value().clone())
            .unwrap_or_default();
        let skip = points.len().saturating_sub(limit);
        Ok(points.into_iter().skip(skip).collect())
    }

    async fn save_realtime(&self, quote: &RealtimeQuote) -> Result<(), StoreError> {
        self.realtime.insert(quote.code.clone(), quote.clone());
        Ok(())
    }

    async fn load_realtime(&self, code: &str) -> Result<Option<RealtimeQuote>, StoreError> {
        Ok(self.realtime.get(code).map(|q| q.value().clone()))
    }
}
