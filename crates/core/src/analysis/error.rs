use thiserror::Error;

/// # Summary
/// 分析域错误枚举。
///
/// 指标、价位、预测与建议的计算错误全部在组件内部降级为中性默认值，
/// 能够抵达调用方的只有历史数据获取失败。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
#[derive(Error, Debug)]
pub enum AnalysisError {
    // 数据源不可用
    #[error("analysis failed: {0}")]
    UpstreamUnavailable(String),
    // 数据源正常但没有该证券的历史数据
    #[error("analysis failed: no historical data for {0}")]
    NoHistory(String),
}
