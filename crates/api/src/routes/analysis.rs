//! # 技术分析路由控制器
//!
//! 实现 `/api/v1/analysis/*/{code}` 路径下的 REST 接口。
//! 每个接口都执行一次完整分析，再截取报告中对应的部分返回。

use axum::Json;
use axum::extract::{Path, Query, State};
use stocklens_core::analysis::entity::{
    AnalysisOptions, AnalysisReport, LevelSet, Prediction, Recommendation, TechnicalIndicators,
};
use stocklens_core::common::StockCode;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{
    AnalysisSummaryResponse, ApiResponse, MAX_PREDICTION_DAYS, PredictionQuery,
};

/// 校验并规范化路径中的证券代码
pub(crate) fn parse_code(raw: &str) -> Result<StockCode, ApiError> {
    raw.parse::<StockCode>().map_err(ApiError::BadRequest)
}

/// 校验显式传入的预测天数；未传入时交给分析服务使用配置的默认值
fn parse_days(days: Option<u32>) -> Result<Option<u32>, ApiError> {
    let Some(days) = days else {
        return Ok(None);
    };
    if (1..=MAX_PREDICTION_DAYS).contains(&days) {
        Ok(Some(days))
    } else {
        Err(ApiError::BadRequest(format!(
            "days must be between 1 and {MAX_PREDICTION_DAYS}, got {days}"
        )))
    }
}

async fn run_analysis(
    state: &AppState,
    raw_code: &str,
    options: AnalysisOptions,
) -> Result<(StockCode, AnalysisReport), ApiError> {
    let code = parse_code(raw_code)?;
    let report = state.analysis.analyze(code.as_str(), options).await?;
    Ok((code, report))
}

/// 获取完整分析报告
///
/// 包含技术指标、价格预测、交易建议与关键价位。
#[utoipa::path(
    get,
    path = "/api/v1/analysis/stock/{code}",
    tag = "分析 (Analysis)",
    params(
        ("code" = String, Path, description = "证券代码，如 600519 或 000001.SZ")
    ),
    responses(
        (status = 200, description = "分析成功", body = ApiResponse<AnalysisReport>),
        (status = 400, description = "证券代码格式错误"),
        (status = 404, description = "没有历史数据"),
        (status = 503, description = "数据源不可用")
    )
)]
pub async fn get_stock_analysis(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<AnalysisReport>>, ApiError> {
    let (_, report) = run_analysis(&state, &code, AnalysisOptions::default()).await?;
    Ok(Json(ApiResponse::ok(report)))
}

/// 获取技术指标及其信号
#[utoipa::path(
    get,
    path = "/api/v1/analysis/technical/{code}",
    tag = "分析 (Analysis)",
    params(
        ("code" = String, Path, description = "证券代码")
    ),
    responses(
        (status = 200, description = "成功获取技术指标", body = ApiResponse<TechnicalIndicators>),
        (status = 400, description = "证券代码格式错误"),
        (status = 404, description = "没有历史数据")
    )
)]
pub async fn get_technical_indicators(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<TechnicalIndicators>>, ApiError> {
    let (_, report) = run_analysis(&state, &code, AnalysisOptions::default()).await?;
    Ok(Json(ApiResponse::ok(report.technical_indicators)))
}

/// 获取价格预测
///
/// `days` 为预测天数，取值 1-365，缺省使用服务配置的 `horizon_days`。
#[utoipa::path(
    get,
    path = "/api/v1/analysis/prediction/{code}",
    tag = "分析 (Analysis)",
    params(
        ("code" = String, Path, description = "证券代码"),
        ("days" = Option<u32>, Query, description = "预测天数 (1-365)，缺省取服务配置")
    ),
    responses(
        (status = 200, description = "成功获取价格预测", body = ApiResponse<Prediction>),
        (status = 400, description = "参数错误"),
        (status = 404, description = "没有历史数据")
    )
)]
pub async fn get_price_prediction(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(query): Query<PredictionQuery>,
) -> Result<Json<ApiResponse<Prediction>>, ApiError> {
    let days = parse_days(query.days)?;
    let options = AnalysisOptions {
        current_price: None,
        horizon_days: days,
    };
    let (_, report) = run_analysis(&state, &code, options).await?;
    Ok(Json(ApiResponse::ok(report.price_prediction)))
}

/// 获取交易建议
#[utoipa::path(
    get,
    path = "/api/v1/analysis/recommendation/{code}",
    tag = "分析 (Analysis)",
    params(
        ("code" = String, Path, description = "证券代码")
    ),
    responses(
        (status = 200, description = "成功获取交易建议", body = ApiResponse<Recommendation>),
        (status = 400, description = "证券代码格式错误"),
        (status = 404, description = "没有历史数据")
    )
)]
pub async fn get_trading_recommendation(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<Recommendation>>, ApiError> {
    let (_, report) = run_analysis(&state, &code, AnalysisOptions::default()).await?;
    Ok(Json(ApiResponse::ok(report.trading_recommendation)))
}

/// 获取支撑位与阻力位
#[utoipa::path(
    get,
    path = "/api/v1/analysis/levels/{code}",
    tag = "分析 (Analysis)",
    params(
        ("code" = String, Path, description = "证券代码")
    ),
    responses(
        (status = 200, description = "成功获取关键价位", body = ApiResponse<LevelSet>),
        (status = 400, description = "证券代码格式错误"),
        (status = 404, description = "没有历史数据")
    )
)]
pub async fn get_key_levels(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<LevelSet>>, ApiError> {
    let (_, report) = run_analysis(&state, &code, AnalysisOptions::default()).await?;
    Ok(Json(ApiResponse::ok(report.key_levels)))
}

/// 获取分析摘要
///
/// 只保留预测、建议的核心字段和三个振荡指标的信号标签。
#[utoipa::path(
    get,
    path = "/api/v1/analysis/summary/{code}",
    tag = "分析 (Analysis)",
    params(
        ("code" = String, Path, description = "证券代码")
    ),
    responses(
        (status = 200, description = "成功获取分析摘要", body = ApiResponse<AnalysisSummaryResponse>),
        (status = 400, description = "证券代码格式错误"),
        (status = 404, description = "没有历史数据")
    )
)]
pub async fn get_analysis_summary(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<AnalysisSummaryResponse>>, ApiError> {
    let (code, report) = run_analysis(&state, &code, AnalysisOptions::default()).await?;
    Ok(Json(ApiResponse::ok(AnalysisSummaryResponse::from_report(
        code, &report,
    ))))
}
