//! # `stocklens-cache` - 缓存实现
//!
//! 提供 `stocklens_core::cache::port::Cache` 的进程内实现，由调用方显式构造并注入。

pub mod mem;
