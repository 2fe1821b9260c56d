//! 关键价位候选生成器。
//!
//! 五个生成器彼此独立，各自只负责产出候选；最终的方向校验、合并与截断统一交给
//! [`crate::filter`]。斐波那契与心理价位的公式本身带有方向，因此在生成阶段就只产出同侧值。

use stocklens_core::analysis::entity::{LevelCandidate, LevelOrigin, LevelSet, LevelSide};
use stocklens_core::config::AnalysisConfig;
use tracing::debug;

use crate::filter::{filter_levels, is_on_side};
use crate::indicators::{bollinger, sma};
use crate::series::{PriceSeries, mean, round_dp, tail};

/// # Summary
/// 成交量加权的局部极值点。
///
/// # Logic
/// 1. 以半宽 `extrema_half_width` 滑动窗口扫描：阻力侧取最高价序列中不小于窗口内任何值的点，
///    支撑侧取最低价序列中不大于窗口内任何值的点。
/// 2. 只保留位于当前价正确一侧的点。
/// 3. `成交量 / 平均成交量` 必须严格大于 `volume_weight_threshold`；平均成交量为 0 时权重视为 1。
/// 4. 以未取整的原始价格与已接受的同类极值比较，距离小于 `extrema_dedup_pct × 当前价` 的点被抑制。
///
/// # Returns
/// 按时间顺序排列的极值候选 (已保留 2 位小数)。
pub fn extrema_levels(
    series: &PriceSeries,
    current_price: f64,
    side: LevelSide,
    config: &AnalysisConfig,
) -> Vec<LevelCandidate> {
    let values = match side {
        LevelSide::Support => &series.lows,
        LevelSide::Resistance => &series.highs,
    };
    let half = config.extrema_half_width;
    let n = values.len().min(series.volumes.len());
    if n < 2 * half + 1 {
        return Vec::new();
    }

    let avg_volume = mean(&series.volumes[..n]).unwrap_or(0.0);
    let dedup_distance = current_price * config.extrema_dedup_pct;
    let mut accepted: Vec<f64> = Vec::new();

    for i in half..n - half {
        let value = values[i];
        let window = &values[i - half..=i + half];
        let is_extremum = match side {
            LevelSide::Support => window.iter().all(|&v| value <= v),
            LevelSide::Resistance => window.iter().all(|&v| value >= v),
        };
        if !is_extremum || !is_on_side(value, current_price, side) {
            continue;
        }

        let volume_weight = if avg_volume > 0.0 {
            series.volumes[i] / avg_volume
        } else {
            1.0
        };
        if volume_weight <= config.volume_weight_threshold {
            continue;
        }

        if accepted
            .iter()
            .any(|&existing| (value - existing).abs() < dedup_distance)
        {
            continue;
        }
        accepted.push(round_dp(value, 2));
    }

    accepted
        .into_iter()
        .map(|price| LevelCandidate::new(price, LevelOrigin::Extremum))
        .collect()
}

/// # Summary
/// 斐波那契回撤位。
///
/// # Logic
/// 1. 取最近 `fib_lookback` 根 K 线的最高价与最低价。
/// 2. 振幅小于 `fib_min_spread_pct × 当前价` 时视为噪音，不产出任何值。
/// 3. 支撑位 = 高点 − 振幅 × 比例，必须严格位于 (低点, 当前价)。
/// 4. 阻力位 = 低点 + 振幅 × 比例，必须严格位于 (当前价, 高点)。
pub fn fibonacci_levels(
    series: &PriceSeries,
    current_price: f64,
    side: LevelSide,
    config: &AnalysisConfig,
) -> Vec<LevelCandidate> {
    let lookback = config.fib_lookback;
    if lookback == 0 || series.len() < lookback {
        return Vec::new();
    }

    let high = tail(&series.highs, lookback)
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let low = tail(&series.lows, lookback)
        .iter()
        .copied()
        .fold(f64::INFINITY, f64::min);
    let spread = high - low;
    if !(spread >= current_price * config.fib_min_spread_pct) {
        return Vec::new();
    }

    config
        .fib_ratios
        .iter()
        .filter_map(|&ratio| {
            let (level, valid) = match side {
                LevelSide::Support => {
                    let level = high - spread * ratio;
                    (level, low < level && level < current_price)
                }
                LevelSide::Resistance => {
                    let level = low + spread * ratio;
                    (level, current_price < level && level < high)
                }
            };
            valid.then(|| LevelCandidate::new(round_dp(level, 2), LevelOrigin::Fibonacci))
        })
        .collect()
}

/// # Summary
/// 邻近的简单移动平均线。
///
/// # Logic
/// 对每个有足够数据的 `ma_periods` 周期计算 SMA；位于当前价正确一侧、
/// 且距离不超过 `ma_max_distance_pct × 当前价` 的均线成为候选。
pub fn moving_average_levels(
    series: &PriceSeries,
    current_price: f64,
    side: LevelSide,
    config: &AnalysisConfig,
) -> Vec<LevelCandidate> {
    let max_distance = current_price * config.ma_max_distance_pct;
    config
        .ma_periods
        .iter()
        .filter_map(|&period| sma(&series.closes, period))
        .filter(|&ma| is_on_side(ma, current_price, side) && (ma - current_price).abs() <= max_distance)
        .map(|ma| LevelCandidate::new(round_dp(ma, 2), LevelOrigin::MovingAverage))
        .collect()
}

/// # Summary
/// 整数与半整数心理价位。
///
/// # Logic
/// 1. 取当前价的整数部分作为基准。
/// 2. 支撑侧从基准向下、阻力侧从基准向上，各走 `psychological_steps` 个整数步，
///    每步产出一个半整数与一个整数。
/// 3. 只保留严格位于当前价正确一侧 (且大于 0) 的值。
///
/// # Returns
/// 由近及远排列的候选。
pub fn psychological_levels(
    current_price: f64,
    side: LevelSide,
    config: &AnalysisConfig,
) -> Vec<LevelCandidate> {
    if !current_price.is_finite() || current_price <= 0.0 {
        return Vec::new();
    }

    let base = current_price.floor();
    let mut levels = Vec::new();
    for step in 0..config.psychological_steps {
        let offset = f64::from(step);
        let pair = match side {
            LevelSide::Support => [base - offset + 0.5, base - offset],
            LevelSide::Resistance => [base + offset + 0.5, base + offset + 1.0],
        };
        for level in pair {
            if is_on_side(level, current_price, side) {
                levels.push(LevelCandidate::new(level, LevelOrigin::Psychological));
            }
        }
    }
    levels
}

/// # Summary
/// 布林带上下轨。
///
/// 下轨作为支撑候选、上轨作为阻力候选；带宽为 0 (价格完全无波动) 或数据不足时不产出。
pub fn bollinger_levels(
    series: &PriceSeries,
    current_price: f64,
    side: LevelSide,
    config: &AnalysisConfig,
) -> Vec<LevelCandidate> {
    let bands = bollinger(&series.closes, config.bollinger_period, config.bollinger_k);
    if !bands.is_available() || bands.upper <= bands.lower {
        return Vec::new();
    }
    let level = match side {
        LevelSide::Support => bands.lower,
        LevelSide::Resistance => bands.upper,
    };
    if is_on_side(level, current_price, side) {
        vec![LevelCandidate::new(level, LevelOrigin::Bollinger)]
    } else {
        Vec::new()
    }
}

/// 依次运行五个生成器，返回同一方向的全部候选。
pub fn collect_candidates(
    series: &PriceSeries,
    current_price: f64,
    side: LevelSide,
    config: &AnalysisConfig,
) -> Vec<LevelCandidate> {
    let mut candidates = extrema_levels(series, current_price, side, config);
    candidates.extend(fibonacci_levels(series, current_price, side, config));
    candidates.extend(moving_average_levels(series, current_price, side, config));
    candidates.extend(psychological_levels(current_price, side, config));
    candidates.extend(bollinger_levels(series, current_price, side, config));
    candidates
}

/// # Summary
/// 计算最终的支撑位与阻力位。
///
/// # Logic
/// 1. 历史数据少于 `min_history` 或当前价无效时返回空列表。
/// 2. 分别收集支撑、阻力候选并经过滤器收敛。
pub fn key_levels(series: &PriceSeries, current_price: f64, config: &AnalysisConfig) -> LevelSet {
    if series.len() < config.min_history || !current_price.is_finite() || current_price <= 0.0 {
        return LevelSet::empty(current_price);
    }

    let support_candidates = collect_candidates(series, current_price, LevelSide::Support, config);
    let resistance_candidates =
        collect_candidates(series, current_price, LevelSide::Resistance, config);
    debug!(
        support = support_candidates.len(),
        resistance = resistance_candidates.len(),
        "collected level candidates"
    );

    LevelSet {
        support_levels: filter_levels(&support_candidates, current_price, LevelSide::Support, config),
        resistance_levels: filter_levels(
            &resistance_candidates,
            current_price,
            LevelSide::Resistance,
            config,
        ),
        current_price,
    }
}
