//! 振荡指标库：RSI、MACD、KDJ、布林带。
//!
//! 每个指标都有自己的最小数据长度，数据不足时返回文档约定的中性值，从不报错。

use stocklens_core::analysis::entity::{
    BollingerBands, BollingerReading, IndicatorReading, IndicatorSet, KdjValue, MacdValue, Signal,
    TechnicalIndicators,
};
use stocklens_core::config::AnalysisConfig;

use crate::series::{PriceSeries, len_f64, mean, population_std, round_dp, tail};

/// 数据不足或无波动时的 RSI 中性值
pub const NEUTRAL_RSI: f64 = 50.0;

/// RSI 超卖阈值
pub const RSI_OVERSOLD: f64 = 30.0;
/// RSI 超买阈值
pub const RSI_OVERBOUGHT: f64 = 70.0;
/// KDJ-J 超卖阈值
pub const KDJ_OVERSOLD: f64 = 20.0;
/// KDJ-J 超买阈值
pub const KDJ_OVERBOUGHT: f64 = 80.0;

/// # Summary
/// 指数移动平均序列。
///
/// # Logic
/// `ema[0] = values[0]`，`ema[i] = α·values[i] + (1−α)·ema[i−1]`，`α = 2/(period+1)`。
///
/// # Returns
/// 与输入等长的序列，输入为空时返回空序列。
pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    let Some((&first, rest)) = values.split_first() else {
        return Vec::new();
    };
    let alpha = 2.0 / (len_f64(period) + 1.0);
    let mut result = Vec::with_capacity(values.len());
    let mut current = first;
    result.push(current);
    for &value in rest {
        current = alpha * value + (1.0 - alpha) * current;
        result.push(current);
    }
    result
}

/// 最后 `period` 个值的简单移动平均，数据不足时返回 None。
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    mean(tail(values, period))
}

/// # Summary
/// 相对强弱指数。
///
/// # Logic
/// 1. 取最后 `period` 个收盘价差分，分别求平均涨幅与平均跌幅。
/// 2. 平均跌幅为 0 时返回 100；涨跌幅同时为 0 (完全无波动) 时返回中性值 50。
/// 3. 否则 `100 − 100/(1 + 涨幅/跌幅)`，保留 2 位小数。
///
/// # Returns
/// 位于 [0, 100] 的 RSI；`closes.len() < period + 1` 时返回 50。
pub fn rsi(closes: &[f64], period: usize) -> f64 {
    if period == 0 || closes.len() < period + 1 {
        return NEUTRAL_RSI;
    }

    let (gain, loss) = tail(closes, period + 1)
        .windows(2)
        .fold((0.0, 0.0), |(gain, loss), pair| {
            let delta = pair[1] - pair[0];
            if delta > 0.0 {
                (gain + delta, loss)
            } else {
                (gain, loss - delta)
            }
        });
    let avg_gain = gain / len_f64(period);
    let avg_loss = loss / len_f64(period);

    if avg_loss == 0.0 {
        return if avg_gain == 0.0 { NEUTRAL_RSI } else { 100.0 };
    }

    let value = 100.0 - 100.0 / (1.0 + avg_gain / avg_loss);
    if value.is_finite() {
        round_dp(value.clamp(0.0, 100.0), 2)
    } else {
        NEUTRAL_RSI
    }
}

/// # Summary
/// MACD 指标最新值。
///
/// # Logic
/// 1. MACD 线 = EMA(fast) − EMA(slow)。
/// 2. 信号线 = MACD 线的 EMA(signal)。
/// 3. 柱 = MACD − 信号线，三者保留 4 位小数。
///
/// # Returns
/// `closes.len() < slow` 时返回全 0。
pub fn macd(closes: &[f64], fast: usize, slow: usize, signal: usize) -> MacdValue {
    if slow == 0 || closes.len() < slow {
        return MacdValue::default();
    }

    let macd_line: Vec<f64> = ema(closes, fast)
        .iter()
        .zip(ema(closes, slow).iter())
        .map(|(f, s)| f - s)
        .collect();
    let signal_line = ema(&macd_line, signal);

    match (macd_line.last(), signal_line.last()) {
        (Some(&m), Some(&s)) if m.is_finite() && s.is_finite() => MacdValue {
            macd: round_dp(m, 4),
            signal: round_dp(s, 4),
            histogram: round_dp(m - s, 4),
        },
        _ => MacdValue::default(),
    }
}

/// # Summary
/// KDJ 随机指标最新值。
///
/// # Logic
/// 1. 对每个长度为 `period` 的滚动窗口计算 RSV。
/// 2. 窗口最高价等于最低价时 RSV 无定义，跳过该窗口。
/// 3. `K = 2/3·K + 1/3·RSV`，`D = 2/3·D + 1/3·K`，初值 50；`J = 3K − 2D`。
///
/// # Returns
/// 保留 2 位小数；`closes.len() < period` 时返回 K = D = J = 50。
pub fn kdj(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> KdjValue {
    let n = closes.len().min(highs.len()).min(lows.len());
    if period == 0 || n < period {
        return KdjValue::NEUTRAL;
    }

    let mut k = 50.0;
    let mut d = 50.0;
    for end in period..=n {
        let start = end - period;
        let highest = highs[start..end]
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let lowest = lows[start..end].iter().copied().fold(f64::INFINITY, f64::min);
        let range = highest - lowest;
        if range <= 0.0 || !range.is_finite() {
            continue;
        }
        let rsv = 100.0 * (closes[end - 1] - lowest) / range;
        if !rsv.is_finite() {
            continue;
        }
        k = (2.0 / 3.0) * k + (1.0 / 3.0) * rsv;
        d = (2.0 / 3.0) * d + (1.0 / 3.0) * k;
    }

    KdjValue {
        k: round_dp(k, 2),
        d: round_dp(d, 2),
        j: round_dp(3.0 * k - 2.0 * d, 2),
    }
}

/// # Summary
/// 布林带最新值。
///
/// # Logic
/// 中轨 = 最后 `period` 个收盘价均值，带宽 = `k` × 总体标准差，保留 2 位小数。
///
/// # Returns
/// 数据不足时返回全 0。
pub fn bollinger(closes: &[f64], period: usize, k: f64) -> BollingerBands {
    if period == 0 || closes.len() < period {
        return BollingerBands::default();
    }
    let window = tail(closes, period);
    match (mean(window), population_std(window)) {
        (Some(middle), Some(std)) if middle.is_finite() && std.is_finite() => BollingerBands {
            upper: round_dp(middle + k * std, 2),
            middle: round_dp(middle, 2),
            lower: round_dp(middle - k * std, 2),
        },
        _ => BollingerBands::default(),
    }
}

/// 按配置周期计算全部指标。
pub fn compute_indicators(series: &PriceSeries, config: &AnalysisConfig) -> IndicatorSet {
    IndicatorSet {
        rsi: rsi(&series.closes, config.rsi_period),
        macd: macd(
            &series.closes,
            config.macd_fast,
            config.macd_slow,
            config.macd_signal,
        ),
        kdj: kdj(&series.highs, &series.lows, &series.closes, config.kdj_period),
        bollinger: bollinger(&series.closes, config.bollinger_period, config.bollinger_k),
    }
}

pub fn rsi_signal(rsi: f64) -> Signal {
    if rsi < RSI_OVERSOLD {
        Signal::Oversold
    } else if rsi > RSI_OVERBOUGHT {
        Signal::Overbought
    } else {
        Signal::Neutral
    }
}

pub fn macd_signal(macd: &MacdValue) -> Signal {
    if macd.macd > 0.0 && macd.histogram > 0.0 {
        Signal::Bullish
    } else if macd.macd < 0.0 && macd.histogram < 0.0 {
        Signal::Bearish
    } else {
        Signal::Neutral
    }
}

pub fn kdj_signal(kdj: &KdjValue) -> Signal {
    if kdj.j < KDJ_OVERSOLD {
        Signal::Oversold
    } else if kdj.j > KDJ_OVERBOUGHT {
        Signal::Overbought
    } else {
        Signal::Neutral
    }
}

/// 价格跌破下轨看多、突破上轨看空；布林带不可用时为中性。
pub fn bollinger_signal(bands: &BollingerBands, price: f64) -> Signal {
    if !bands.is_available() {
        Signal::Neutral
    } else if price < bands.lower {
        Signal::Bullish
    } else if price > bands.upper {
        Signal::Bearish
    } else {
        Signal::Neutral
    }
}

/// # Summary
/// 为指标附加展示用信号标签。
///
/// # Arguments
/// * `indicators`: 指标数值。
/// * `last_close`: 最后一根 K 线的收盘价，用于布林带信号。
pub fn summarize(indicators: &IndicatorSet, last_close: f64) -> TechnicalIndicators {
    TechnicalIndicators {
        rsi: IndicatorReading {
            value: indicators.rsi,
            signal: rsi_signal(indicators.rsi),
        },
        macd: IndicatorReading {
            value: indicators.macd.macd,
            signal: macd_signal(&indicators.macd),
        },
        kdj: IndicatorReading {
            value: indicators.kdj.j,
            signal: kdj_signal(&indicators.kdj),
        },
        bollinger_bands: BollingerReading {
            upper: indicators.bollinger.upper,
            middle: indicators.bollinger.middle,
            lower: indicators.bollinger.lower,
            signal: bollinger_signal(&indicators.bollinger, last_close),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ema_recurrence() {
        let values = [10.0, 11.0, 12.0];
        let result = ema(&values, 3);
        assert_eq!(result.len(), 3);
        assert_eq!(result[0], 10.0);
        assert!((result[1] - 10.5).abs() < 1e-12);
        assert!((result[2] - 11.25).abs() < 1e-12);
        assert!(ema(&[], 3).is_empty());
    }

    #[test]
    fn test_sma() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(sma(&values, 2), Some(3.5));
        assert_eq!(sma(&values, 5), None);
        assert_eq!(sma(&values, 0), None);
    }

    #[test]
    fn test_signal_labels() {
        assert_eq!(rsi_signal(29.99), Signal::Oversold);
        assert_eq!(rsi_signal(70.0), Signal::Neutral);
        assert_eq!(rsi_signal(70.01), Signal::Overbought);
        let bands = BollingerBands::default();
        assert_eq!(bollinger_signal(&bands, 10.0), Signal::Neutral);
    }
}
