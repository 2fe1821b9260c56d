use super::error::StoreError;
use crate::market::entity::{PricePoint, RealtimeQuote};
use async_trait::async_trait;

/// # Summary
/// 行情存储接口，负责日 K 线与实时报价的持久化与读取。
///
/// 写入方是外部采集层，读取方是分析引擎与 HTTP 层。
///
/// # Invariants
/// - 同一证券同一交易日只保留一条 K 线，重复写入以后者为准。
/// - 读取结果按日期升序排列。
#[async_trait]
pub trait QuoteStore: Send + Sync {
    /// # Summary
    /// 批量保存日 K 线。
    ///
    /// # Logic
    /// 1. 在单个事务中逐条执行 Upsert。
    ///
    /// # Arguments
    /// * `code`: 证券代码。
    /// * `points`: 待保存的数据列表。
    ///
    /// # Returns
    /// 成功返回 Ok，失败返回 `StoreError`。
    async fn save_history(&self, code: &str, points: &[PricePoint]) -> Result<(), StoreError>;

    /// # Summary
    /// 读取最近 `limit` 根日 K 线。
    ///
    /// # Logic
    /// 1. 按日期倒序查询并截取 `limit` 条。
    /// 2. 翻转为升序。
    ///
    /// # Arguments
    /// * `code`: 证券代码。
    /// * `limit`: 最大条数。
    ///
    /// # Returns
    /// 返回升序 K 线列表，无数据时返回空列表。
    async fn load_history(&self, code: &str, limit: usize) -> Result<Vec<PricePoint>, StoreError>;

    /// 保存或覆盖实时报价快照。
    async fn save_realtime(&self, quote: &RealtimeQuote) -> Result<(), StoreError>;

    /// 读取实时报价快照，不存在时返回 None。
    async fn load_realtime(&self, code: &str) -> Result<Option<RealtimeQuote>, StoreError>;
}
