use crate::analysis::entity::{AnalysisOptions, AnalysisReport};
use crate::analysis::error::AnalysisError;
use async_trait::async_trait;

/// # Summary
/// 个股技术分析服务契约，HTTP 层只依赖此接口。
///
/// # Invariants
/// - 相同的历史数据与参数必须产出相同的报告 (`analysis_time` 除外)。
/// - 实现者之间不共享可变状态，可被任意并发调用。
#[async_trait]
pub trait AnalysisPort: Send + Sync {
    /// # Summary
    /// 对指定证券执行一次完整分析。
    ///
    /// # Logic
    /// 1. 读取最近的历史 K 线。
    /// 2. 解析当前价 (显式参数 → 实时报价 → 最后收盘价)。
    /// 3. 依次计算指标、关键价位、价格预测与交易建议。
    ///
    /// # Arguments
    /// * `code`: 证券代码。
    /// * `options`: 当前价与预测天数等可选参数。
    ///
    /// # Returns
    /// 成功返回分析报告，历史数据不可得时返回 `AnalysisError`。
    async fn analyze(
        &self,
        code: &str,
        options: AnalysisOptions,
    ) -> Result<AnalysisReport, AnalysisError>;
}
