use crate::market::entity::PricePoint;
use crate::market::error::MarketError;
use async_trait::async_trait;

/// # Summary
/// 行情数据读取接口，是分析引擎唯一的 I/O 来源。
///
/// # Invariants
/// - `recent_history` 返回的序列必须按日期升序排列。
/// - 实现者不得修改已返回给调用方的数据。
#[async_trait]
pub trait MarketData: Send + Sync {
    /// # Summary
    /// 获取指定证券最近的日 K 线。
    ///
    /// # Logic
    /// 1. 按日期倒序取最近 `limit` 根。
    /// 2. 翻转为升序后返回。
    ///
    /// # Arguments
    /// * `code`: 证券代码。
    /// * `limit`: 最多返回的 K 线数量。
    ///
    /// # Returns
    /// 成功返回升序 K 线列表 (可能为空)，失败返回 `MarketError`。
    async fn recent_history(&self, code: &str, limit: usize)
    -> Result<Vec<PricePoint>, MarketError>;

    /// # Summary
    /// 获取指定证券的最新成交价。
    ///
    /// # Returns
    /// 若存在实时报价则返回价格，否则返回 None。
    async fn latest_price(&self, code: &str) -> Result<Option<f64>, MarketError>;
}
