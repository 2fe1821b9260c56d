#![allow(dead_code)]

use chrono::{Days, NaiveDate};
use stocklens_core::market::entity::PricePoint;

/// 以收盘价序列构造日 K 线，高低价在收盘价上下浮动 `spread`。
pub fn bars_from_closes(closes: &[f64], spread: f64) -> Vec<PricePoint> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PricePoint {
            date: start + Days::new(i as u64),
            open: close,
            high: close + spread,
            low: close - spread,
            close,
            volume: 1_000_000.0,
            amount: close * 1_000_000.0,
        })
        .collect()
}

pub fn flat_bars(n: usize, price: f64) -> Vec<PricePoint> {
    bars_from_closes(&vec![price; n], 0.0)
}

/// 从 `from` 线性上涨到 `to` 的 `n` 根 K 线。
pub fn rising_bars(n: usize, from: f64, to: f64) -> Vec<PricePoint> {
    let step = (to - from) / (n - 1) as f64;
    let closes: Vec<f64> = (0..n).map(|i| from + step * i as f64).collect();
    bars_from_closes(&closes, 0.1)
}

/// 围绕 `base` 波动的确定性序列，成交量随位置变化。
pub fn wavy_bars(n: usize, base: f64, amplitude: f64, seed: u32) -> Vec<PricePoint> {
    let phase = f64::from(seed) * 0.7;
    let closes: Vec<f64> = (0..n)
        .map(|i| {
            let t = i as f64;
            base + amplitude * (t / 4.0 + phase).sin() + amplitude * 0.3 * (t / 1.7).cos()
        })
        .collect();
    let mut bars = bars_from_closes(&closes, amplitude * 0.2);
    for (i, bar) in bars.iter_mut().enumerate() {
        bar.volume = 500_000.0 + 400_000.0 * ((i as f64 + phase) / 3.0).sin().abs();
    }
    bars
}
