//! K 线列视图与数值工具。

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use stocklens_core::market::entity::PricePoint;

/// # Summary
/// 将 `PricePoint` 序列拆分为按列存放的只读数组，供各组件共享。
///
/// # Invariants
/// - 四列长度相同，顺序与输入序列一致 (升序)。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    pub highs: Vec<f64>,
    pub lows: Vec<f64>,
    pub closes: Vec<f64>,
    pub volumes: Vec<f64>,
}

impl PriceSeries {
    pub fn from_points(points: &[PricePoint]) -> Self {
        Self {
            highs: points.iter().map(|p| p.high).collect(),
            lows: points.iter().map(|p| p.low).collect(),
            closes: points.iter().map(|p| p.close).collect(),
            volumes: points.iter().map(|p| p.volume).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    pub fn last_close(&self) -> Option<f64> {
        self.closes.last().copied()
    }
}

/// # Summary
/// 按十进制语义四舍五入到 `dp` 位小数 (银行家舍入)。
///
/// # Logic
/// 1. 以 `f64` 的精确二进制值构造 `Decimal`。
/// 2. 在十进制下舍入后转回 `f64`。
///
/// 非有限值或超出 `Decimal` 表示范围的值原样返回。
pub fn round_dp(value: f64, dp: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// 将长度转换为浮点数，用于求均值等统计运算。
#[allow(clippy::cast_precision_loss)]
pub fn len_f64(n: usize) -> f64 {
    n as f64
}

/// 取序列最后 `n` 个元素，不足时返回全部。
pub fn tail(values: &[f64], n: usize) -> &[f64] {
    &values[values.len().saturating_sub(n)..]
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / len_f64(values.len()))
}

/// 总体标准差 (除以 N)。
pub fn population_std(values: &[f64]) -> Option<f64> {
    let avg = mean(values)?;
    let variance =
        values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / len_f64(values.len());
    Some(variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_dp_is_decimal() {
        assert_eq!(round_dp(10.004, 2), 10.0);
        assert_eq!(round_dp(10.006, 2), 10.01);
        assert_eq!(round_dp(-0.12346, 4), -0.1235);
        assert_eq!(round_dp(0.125, 2), 0.12);
        assert!(round_dp(f64::NAN, 2).is_nan());
    }

    #[test]
    fn test_population_std() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&values), Some(5.0));
        assert_eq!(population_std(&values), Some(2.0));
        assert_eq!(population_std(&[]), None);
    }

    #[test]
    fn test_tail() {
        let values = [1.0, 2.0, 3.0];
        assert_eq!(tail(&values, 2), &[2.0, 3.0]);
        assert_eq!(tail(&values, 5), &[1.0, 2.0, 3.0]);
    }
}
