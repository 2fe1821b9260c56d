//! # DTO (Data Transfer Object) 层
//!
//! 分析报告本身的领域类型已派生 `ToSchema`，可直接作为响应载荷；
//! 这里只定义网关专有的查询参数、摘要视图与统一响应包装器。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stocklens_core::analysis::entity::{Action, AnalysisReport, RiskLevel, Signal};
use utoipa::ToSchema;

/// 预测天数的上限
pub const MAX_PREDICTION_DAYS: u32 = 365;
/// 历史 K 线查询的默认条数
pub const DEFAULT_HISTORY_LIMIT: usize = 60;
/// 历史 K 线查询的最大条数
pub const MAX_HISTORY_LIMIT: usize = 1000;

// ============================================================
//  查询参数
// ============================================================

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PredictionQuery {
    /// 预测天数 (1-365)
    pub days: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct HistoryQuery {
    /// 返回最近的 K 线条数 (1-1000)
    pub limit: Option<usize>,
}

// ============================================================
//  分析摘要 DTO
// ============================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PredictionSummary {
    #[schema(example = 25.25)]
    pub target_price: f64,
    #[schema(example = 26.27)]
    pub change_percent: f64,
    #[schema(example = 70.0)]
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecommendationSummary {
    pub action: Action,
    pub risk_level: RiskLevel,
    #[schema(example = 75)]
    pub strength: u8,
}

/// 三个振荡指标的信号标签
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TechnicalSummary {
    pub rsi: Signal,
    pub macd: Signal,
    pub kdj: Signal,
}

/// 分析摘要，对应 `/summary` 接口
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalysisSummaryResponse {
    #[schema(example = "600519")]
    pub code: String,
    #[schema(example = 1680.5)]
    pub current_price: f64,
    pub prediction: PredictionSummary,
    pub recommendation: RecommendationSummary,
    pub technical_summary: TechnicalSummary,
    pub analysis_time: DateTime<Utc>,
}

impl AnalysisSummaryResponse {
    pub fn from_report(code: impl Into<String>, report: &AnalysisReport) -> Self {
        Self {
            code: code.into(),
            current_price: report.current_price,
            prediction: PredictionSummary {
                target_price: report.price_prediction.target_price,
                change_percent: report.price_prediction.change_percent,
                confidence: report.price_prediction.confidence,
            },
            recommendation: RecommendationSummary {
                action: report.trading_recommendation.action,
                risk_level: report.trading_recommendation.risk_level,
                strength: report.trading_recommendation.strength,
            },
            technical_summary: TechnicalSummary {
                rsi: report.technical_indicators.rsi.signal,
                macd: report.technical_indicators.macd.signal,
                kdj: report.technical_indicators.kdj.signal,
            },
            analysis_time: report.analysis_time,
        }
    }
}

// ============================================================
//  系统 DTO
// ============================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    #[schema(example = "0.1.0")]
    pub version: String,
}

// ============================================================
//  通用响应 DTO
// ============================================================

/// 统一 API 响应包装器
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T: Serialize + ToSchema> {
    /// 是否成功
    pub success: bool,
    /// 数据载荷 (成功时)
    pub data: Option<T>,
    /// 错误信息 (失败时)
    pub error: Option<String>,
}

impl<T: Serialize + ToSchema> ApiResponse<T> {
    /// 构建成功响应
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// 构建失败响应 (不含泛型载荷)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 固定为 false
    pub success: bool,
    /// 固定为 null，与成功响应保持同一结构
    #[schema(value_type = Option<Object>)]
    pub data: Option<serde_json::Value>,
    /// 错误描述信息
    pub error: String,
}

impl ApiErrorResponse {
    /// 从错误信息构建
    pub fn from_msg(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: msg.into(),
        }
    }
}
