use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============================================================
//  指标
// ============================================================

/// MACD 指标最新值
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct MacdValue {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// KDJ 指标最新值
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct KdjValue {
    pub k: f64,
    pub d: f64,
    pub j: f64,
}

impl KdjValue {
    /// 数据不足时的中性值 (K = D = J = 50)
    pub const NEUTRAL: KdjValue = KdjValue {
        k: 50.0,
        d: 50.0,
        j: 50.0,
    };
}

/// # Summary
/// 布林带最新值。
///
/// # Invariants
/// - 数据不足时三条轨道均为 0，此时 `is_available()` 返回 false。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl BollingerBands {
    pub fn is_available(&self) -> bool {
        self.middle > 0.0
    }
}

/// # Summary
/// 单次分析计算出的全部振荡指标。
///
/// # Invariants
/// - `rsi` 位于 [0, 100]。
/// - 每次调用重新计算，不持久化。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct IndicatorSet {
    pub rsi: f64,
    pub macd: MacdValue,
    pub kdj: KdjValue,
    pub bollinger: BollingerBands,
}

/// 指标展示信号标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Oversold,
    Overbought,
    Bullish,
    Bearish,
    Neutral,
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Signal::Oversold => "oversold",
            Signal::Overbought => "overbought",
            Signal::Bullish => "bullish",
            Signal::Bearish => "bearish",
            Signal::Neutral => "neutral",
        };
        write!(f, "{}", label)
    }
}

/// 带信号标签的单值指标
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct IndicatorReading {
    pub value: f64,
    pub signal: Signal,
}

/// 带信号标签的布林带
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BollingerReading {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
    pub signal: Signal,
}

/// 面向展示的技术指标视图
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TechnicalIndicators {
    pub rsi: IndicatorReading,
    pub macd: IndicatorReading,
    pub kdj: IndicatorReading,
    pub bollinger_bands: BollingerReading,
}

// ============================================================
//  关键价位
// ============================================================

/// 价位候选的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LevelOrigin {
    Extremum,
    Fibonacci,
    MovingAverage,
    Psychological,
    Bollinger,
}

/// 价位方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LevelSide {
    Support,
    Resistance,
}

/// # Summary
/// 单个价位生成器产出的原始候选，仅存活于一次分析调用内。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LevelCandidate {
    pub price: f64,
    pub origin: LevelOrigin,
}

impl LevelCandidate {
    pub fn new(price: f64, origin: LevelOrigin) -> Self {
        Self { price, origin }
    }
}

/// # Summary
/// 最终支撑位与阻力位。
///
/// # Invariants
/// - `support_levels` 严格递减，且每个值都小于 `current_price`。
/// - `resistance_levels` 严格递增，且每个值都大于 `current_price`。
/// - 每个列表长度不超过 3。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LevelSet {
    pub resistance_levels: Vec<f64>,
    pub support_levels: Vec<f64>,
    pub current_price: f64,
}

impl LevelSet {
    pub fn empty(current_price: f64) -> Self {
        Self {
            resistance_levels: Vec::new(),
            support_levels: Vec::new(),
            current_price,
        }
    }
}

// ============================================================
//  预测与建议
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct PredictionRange {
    pub min: f64,
    pub max: f64,
}

/// # Summary
/// 趋势外推得到的价格预测。
///
/// # Invariants
/// - `confidence` 位于 [0, 100]。
/// - 数据不足时所有字段为 0。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct Prediction {
    pub target_price: f64,
    pub change_percent: f64,
    pub prediction_range: PredictionRange,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Buy,
    Sell,
    Hold,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Buy => write!(f, "buy"),
            Action::Sell => write!(f, "sell"),
            Action::Hold => write!(f, "hold"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

/// # Summary
/// 交易建议。
///
/// # Invariants
/// - `strength` 位于 [0, 100]。
/// - `reasons` 按信号评估顺序排列。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Recommendation {
    pub action: Action,
    pub reasons: Vec<String>,
    pub risk_level: RiskLevel,
    pub strength: u8,
}

// ============================================================
//  报告
// ============================================================

/// # Summary
/// 单次分析请求的完整结果。
///
/// # Invariants
/// - 每次请求新建，构造后不再修改，不在请求之间共享。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisReport {
    pub technical_indicators: TechnicalIndicators,
    pub price_prediction: Prediction,
    pub trading_recommendation: Recommendation,
    pub key_levels: LevelSet,
    // 原始指标数值
    pub indicators: IndicatorSet,
    pub current_price: f64,
    pub analysis_time: DateTime<Utc>,
}

/// 分析请求的可选参数
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisOptions {
    // 显式指定当前价，优先于实时报价
    pub current_price: Option<f64>,
    // 预测天数，缺省使用配置值
    pub horizon_days: Option<u32>,
}
