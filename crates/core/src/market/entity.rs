use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// # Summary
/// 单根日 K 线数据实体，记录一个交易日的行情。
///
/// # Invariants
/// - `high >= max(open, close)`，`low <= min(open, close)`。
/// - 价格为正数，`volume` 与 `amount` 非负。
/// - 序列按 `date` 升序排列，允许存在非交易日缺口。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PricePoint {
    // 交易日
    #[schema(value_type = String, example = "2026-03-02")]
    pub date: NaiveDate,
    // 开盘价
    pub open: f64,
    // 最高价
    pub high: f64,
    // 最低价
    pub low: f64,
    // 收盘价
    pub close: f64,
    // 成交量
    pub volume: f64,
    // 成交额
    pub amount: f64,
}

/// # Summary
/// 实时报价快照，由外部采集层写入。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RealtimeQuote {
    // 证券代码
    pub code: String,
    // 最新成交价
    pub latest_price: f64,
    // 快照时间
    pub updated_at: DateTime<Utc>,
}
