//! # `stocklens-core` - 领域核心
//!
//! 定义行情、分析、存储与缓存四个领域的实体、错误与端口 (Port)。
//! 本 crate 不包含任何具体实现，下游 crate 通过实现这里的 trait 完成依赖注入。

pub mod common;
pub mod config;

pub mod market {
    pub mod entity;
    pub mod error;
    pub mod port;
}

pub mod analysis {
    pub mod entity;
    pub mod error;
    pub mod port;
}

pub mod store {
    pub mod error;
    pub mod port;
}

pub mod cache {
    pub mod error;
    pub mod port;
}

#[cfg(feature = "test-utils")]
pub mod test_utils;
