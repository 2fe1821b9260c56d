//! # `stocklens-api` - HTTP API 网关
//!
//! 本 crate 是 StockLens 技术分析服务的 HTTP/REST 入口。
//! 使用 `axum` 构建路由与控制器，通过 `utoipa` 自动生成 OpenAPI 3.0 Swagger 文档。
//!
//! ## 架构职责
//! - 校验证券代码与查询参数
//! - 调用下层 `AnalysisPort` 与 `QuoteStore` 完成分析与行情查询
//! - 将领域模型包装为统一的 `{success, data, error}` 响应

pub mod error;
pub mod routes;
pub mod server;
pub mod types;
