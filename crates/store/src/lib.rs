//! # `stocklens-store` - 持久化实现
//!
//! 以单个 SQLite 文件 (`quotes.db`) 保存日 K 线与实时报价快照，实现 `QuoteStore` 端口。

pub mod config;
pub mod quotes;
