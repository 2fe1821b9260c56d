//! # API 服务启动器
//!
//! 组装 axum 路由、挂载 Swagger UI、配置 CORS 与请求追踪并绑定 TCP 端口对外提供服务。
//! 本模块不直接启动 `main()`, 而是由 `crates/app` 的 DI 容器持有并调用。

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_swagger_ui::SwaggerUi;

use stocklens_core::analysis::port::AnalysisPort;
use stocklens_core::store::port::QuoteStore;

use crate::routes::{analysis, health, market};

// ============================================================
//  共享应用状态
// ============================================================

/// 全局应用状态，通过 axum 的 `State` 提取器注入到每个 Handler 中。
///
/// # Invariants
/// - 所有依赖在服务启动前由 DI 容器注入，生命周期与进程等同。
#[derive(Clone)]
pub struct AppState {
    /// 分析服务端口
    pub analysis: Arc<dyn AnalysisPort>,
    /// 行情存储 (用于原始 K 线查询)
    pub quote_store: Arc<dyn QuoteStore>,
}

// ============================================================
//  OpenAPI 文档定义
// ============================================================

/// 全局 OpenAPI 文档结构
#[derive(OpenApi)]
#[openapi(
    info(
        title = "StockLens 技术分析 API",
        version = "0.1.0",
        description = "个股技术分析服务：振荡指标、支撑/阻力位、趋势预测与交易建议。",
        license(name = "MIT")
    ),
    tags(
        (name = "分析 (Analysis)", description = "技术指标、价格预测、交易建议与关键价位"),
        (name = "行情 (Market)", description = "原始日 K 线查询"),
        (name = "系统 (System)", description = "存活检查")
    )
)]
pub struct ApiDoc;

// ============================================================
//  服务构建与启动
// ============================================================

/// # Summary
/// 构建完整的 axum 应用路由树。
///
/// # Logic
/// 1. 注册分析、行情与系统路由，并收集 OpenAPI 文档。
/// 2. 挂载 Swagger UI。
/// 3. 应用 CORS 与请求追踪中间件。
pub fn build_router(state: AppState) -> Router {
    let api_router = OpenApiRouter::new()
        .routes(routes!(analysis::get_stock_analysis))
        .routes(routes!(analysis::get_technical_indicators))
        .routes(routes!(analysis::get_price_prediction))
        .routes(routes!(analysis::get_trading_recommendation))
        .routes(routes!(analysis::get_key_levels))
        .routes(routes!(analysis::get_analysis_summary))
        .routes(routes!(market::get_history))
        .routes(routes!(health::health));

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(api_router)
        .with_state(state)
        .split_for_parts();

    // 开发阶段允许所有来源
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// 在已绑定的监听器上提供服务，直到进程退出。
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    axum::serve(listener, build_router(state)).await
}

/// 绑定地址并启动 HTTP 服务。
///
/// # Arguments
/// * `state` - 由外部 DI 容器注入的共享状态
/// * `bind_addr` - 监听的地址与端口，如 `"0.0.0.0:8080"`
pub async fn start_server(
    state: AppState,
    bind_addr: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("StockLens API Server listening on {}", bind_addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui/", bind_addr);

    serve(listener, state).await?;
    Ok(())
}
