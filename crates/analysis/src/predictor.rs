//! 基于线性回归的趋势预测。

use stocklens_core::analysis::entity::{MacdValue, Prediction, PredictionRange};
use stocklens_core::config::AnalysisConfig;

use crate::indicators::{RSI_OVERBOUGHT, RSI_OVERSOLD, macd, rsi};
use crate::series::{PriceSeries, len_f64, population_std, round_dp};

/// 置信度基准值
const BASE_CONFIDENCE: f64 = 50.0;

/// # Summary
/// 对 `(下标, 收盘价)` 做最小二乘直线拟合。
///
/// # Returns
/// `(slope, intercept)`；少于两个点时返回 None。
pub fn linear_fit(values: &[f64]) -> Option<(f64, f64)> {
    if values.len() < 2 {
        return None;
    }
    let n = len_f64(values.len());
    let mean_x = (n - 1.0) / 2.0;
    let mean_y = values.iter().sum::<f64>() / n;

    let (mut cov, mut var) = (0.0, 0.0);
    for (i, &y) in values.iter().enumerate() {
        let dx = len_f64(i) - mean_x;
        cov += dx * (y - mean_y);
        var += dx * dx;
    }
    let slope = cov / var;
    Some((slope, mean_y - slope * mean_x))
}

/// 日收益率序列，前一日收盘价为 0 的位置被跳过。
pub fn daily_returns(closes: &[f64]) -> Vec<f64> {
    closes
        .windows(2)
        .filter(|pair| pair[0] != 0.0)
        .map(|pair| (pair[1] - pair[0]) / pair[0])
        .collect()
}

/// # Summary
/// 根据指标一致性计算预测置信度。
///
/// # Logic
/// 1. 基准 50。
/// 2. RSI 在 [30, 70] 内 +10，否则 −5。
/// 3. MACD 与柱同为正 +15，同为负 −10。
/// 4. 斜率为正 +10，否则 (含 0) −10。
/// 5. 限制在 [0, 100]。
pub fn confidence(rsi: f64, macd: &MacdValue, slope: f64) -> f64 {
    let mut score = BASE_CONFIDENCE;

    if (RSI_OVERSOLD..=RSI_OVERBOUGHT).contains(&rsi) {
        score += 10.0;
    } else {
        score -= 5.0;
    }

    if macd.macd > 0.0 && macd.histogram > 0.0 {
        score += 15.0;
    } else if macd.macd < 0.0 && macd.histogram < 0.0 {
        score -= 10.0;
    }

    if slope > 0.0 {
        score += 10.0;
    } else {
        score -= 10.0;
    }

    score.clamp(0.0, 100.0)
}

/// # Summary
/// 预测 `horizon_days` 天后的价格。
///
/// # Logic
/// 1. 收盘价少于 `min_history` 时返回全零预测。
/// 2. 拟合直线，`target = slope·(n + days) + intercept`。
/// 3. 涨跌幅相对最后收盘价计算。
/// 4. 波动率 = 日收益率总体标准差 × √days，区间为 `target·(1 ∓ 波动率)`。
/// 5. 价格与涨跌幅保留 2 位小数，置信度保留 1 位小数。
///
/// # Arguments
/// * `series`: 升序的历史 K 线。
/// * `horizon_days`: 预测天数。
/// * `config`: 指标周期与最小历史长度。
pub fn predict(series: &PriceSeries, horizon_days: u32, config: &AnalysisConfig) -> Prediction {
    let closes = &series.closes;
    if closes.len() < config.min_history.max(2) {
        return Prediction::default();
    }
    let Some((slope, intercept)) = linear_fit(closes) else {
        return Prediction::default();
    };
    let Some(last_close) = series.last_close() else {
        return Prediction::default();
    };

    let days = f64::from(horizon_days);
    let target = slope * (len_f64(closes.len()) + days) + intercept;
    let change_percent = if last_close != 0.0 {
        (target - last_close) / last_close * 100.0
    } else {
        0.0
    };

    let volatility = population_std(&daily_returns(closes)).unwrap_or(0.0) * days.sqrt();

    let rsi_value = rsi(closes, config.rsi_period);
    let macd_value = macd(
        closes,
        config.macd_fast,
        config.macd_slow,
        config.macd_signal,
    );

    if !target.is_finite() || !volatility.is_finite() {
        return Prediction::default();
    }

    Prediction {
        target_price: round_dp(target, 2),
        change_percent: round_dp(change_percent, 2),
        prediction_range: PredictionRange {
            min: round_dp(target * (1.0 - volatility), 2),
            max: round_dp(target * (1.0 + volatility), 2),
        },
        confidence: round_dp(confidence(rsi_value, &macd_value, slope), 1),
    }
}
