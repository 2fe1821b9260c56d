use thiserror::Error;

/// # Summary
/// 行情数据域错误枚举，目前只有底层存储读取失败一种来源。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
#[derive(Error, Debug)]
pub enum MarketError {
    // 底层存储读取失败
    #[error("Storage error: {0}")]
    Storage(String),
}
