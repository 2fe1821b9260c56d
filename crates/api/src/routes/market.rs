//! # 行情路由控制器
//!
//! 直接从 `QuoteStore` 读取原始日 K 线，不经过分析引擎。

use axum::Json;
use axum::extract::{Path, Query, State};
use stocklens_core::market::entity::PricePoint;

use crate::error::ApiError;
use crate::routes::analysis::parse_code;
use crate::server::AppState;
use crate::types::{ApiResponse, DEFAULT_HISTORY_LIMIT, HistoryQuery, MAX_HISTORY_LIMIT};

/// 获取最近的日 K 线
///
/// 按日期升序返回最近 `limit` 根 K 线，缺省 60，上限 1000。
#[utoipa::path(
    get,
    path = "/api/v1/market/history/{code}",
    tag = "行情 (Market)",
    params(
        ("code" = String, Path, description = "证券代码"),
        ("limit" = Option<usize>, Query, description = "返回条数 (1-1000)")
    ),
    responses(
        (status = 200, description = "成功获取历史 K 线", body = ApiResponse<Vec<PricePoint>>),
        (status = 400, description = "参数错误")
    )
)]
pub async fn get_history(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ApiResponse<Vec<PricePoint>>>, ApiError> {
    let code = parse_code(&code)?;
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    if !(1..=MAX_HISTORY_LIMIT).contains(&limit) {
        return Err(ApiError::BadRequest(format!(
            "limit must be between 1 and {MAX_HISTORY_LIMIT}, got {limit}"
        )));
    }

    let points = state.quote_store.load_history(code.as_str(), limit).await?;
    Ok(Json(ApiResponse::ok(points)))
}
