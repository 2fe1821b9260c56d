mod common;

use common::{bars_from_closes, flat_bars, rising_bars, wavy_bars};
use stocklens_analysis::indicators::{
    bollinger, compute_indicators, kdj, macd, macd_signal, rsi, summarize,
};
use stocklens_analysis::series::PriceSeries;
use stocklens_core::analysis::entity::{KdjValue, MacdValue, Signal};
use stocklens_core::config::AnalysisConfig;

#[test]
fn test_rsi_defaults_and_extremes() {
    // 数据不足
    assert_eq!(rsi(&[10.0; 14], 14), 50.0);
    // 完全无波动
    assert_eq!(rsi(&[10.0; 30], 14), 50.0);

    let rising: Vec<f64> = (0..30).map(|i| 10.0 + f64::from(i)).collect();
    assert_eq!(rsi(&rising, 14), 100.0);

    let falling: Vec<f64> = (0..30).map(|i| 50.0 - f64::from(i)).collect();
    assert_eq!(rsi(&falling, 14), 0.0);
}

#[test]
fn test_rsi_uses_trailing_window_only() {
    // 早期的大幅下跌不在最后 14 个差分之内
    let mut closes = vec![100.0, 10.0];
    closes.extend((0..15).map(|i| 10.0 + f64::from(i)));
    assert_eq!(rsi(&closes, 14), 100.0);
}

#[test]
fn test_rsi_stays_in_bounds() {
    for seed in 0..10 {
        let series = PriceSeries::from_points(&wavy_bars(60, 20.0, 3.0, seed));
        let value = rsi(&series.closes, 14);
        assert!((0.0..=100.0).contains(&value), "rsi {value}");
    }
}

#[test]
fn test_macd_short_history_is_zero() {
    let closes = [10.0; 25];
    assert_eq!(macd(&closes, 12, 26, 9), MacdValue::default());
}

#[test]
fn test_macd_on_rising_prices_is_bullish() {
    let series = PriceSeries::from_points(&rising_bars(60, 10.0, 20.0));
    let value = macd(&series.closes, 12, 26, 9);

    assert!(value.macd > 0.0);
    assert!(value.histogram > 0.0);
    assert_eq!(macd_signal(&value), Signal::Bullish);
}

#[test]
fn test_kdj_defaults() {
    let highs = [11.0; 8];
    let lows = [9.0; 8];
    let closes = [10.0; 8];
    assert_eq!(kdj(&highs, &lows, &closes, 9), KdjValue::NEUTRAL);

    // 所有窗口都无波动时保持初值
    let series = PriceSeries::from_points(&flat_bars(30, 10.0));
    let value = kdj(&series.highs, &series.lows, &series.closes, 9);
    assert_eq!(value, KdjValue::NEUTRAL);
}

#[test]
fn test_kdj_tracks_close_position_in_range() {
    let series = PriceSeries::from_points(&rising_bars(60, 10.0, 20.0));
    let value = kdj(&series.highs, &series.lows, &series.closes, 9);
    assert!(value.k > 80.0);
    assert!(value.j > 80.0);

    let closes: Vec<f64> = (0..60).map(|i| 30.0 - f64::from(i) * 0.2).collect();
    let falling = PriceSeries::from_points(&bars_from_closes(&closes, 0.05));
    let value = kdj(&falling.highs, &falling.lows, &falling.closes, 9);
    assert!(value.j < 20.0);
}

#[test]
fn test_bollinger_collapses_on_flat_prices() {
    let series = PriceSeries::from_points(&flat_bars(60, 10.0));
    let bands = bollinger(&series.closes, 20, 2.0);
    assert_eq!(bands.upper, 10.0);
    assert_eq!(bands.middle, 10.0);
    assert_eq!(bands.lower, 10.0);

    let short = bollinger(&[10.0; 19], 20, 2.0);
    assert_eq!(short.middle, 0.0);
    assert!(!short.is_available());
}

#[test]
fn test_bollinger_band_width() {
    // 总体标准差为 2
    let closes = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    let bands = bollinger(&closes, 8, 2.0);
    assert_eq!(bands.middle, 5.0);
    assert_eq!(bands.upper, 9.0);
    assert_eq!(bands.lower, 1.0);
}

#[test]
fn test_summary_labels_for_flat_history() {
    let config = AnalysisConfig::default();
    let series = PriceSeries::from_points(&flat_bars(60, 10.0));
    let indicators = compute_indicators(&series, &config);
    assert_eq!(indicators.rsi, 50.0);

    let summary = summarize(&indicators, 10.0);
    assert_eq!(summary.rsi.signal, Signal::Neutral);
    assert_eq!(summary.macd.signal, Signal::Neutral);
    assert_eq!(summary.kdj.signal, Signal::Neutral);
    assert_eq!(summary.bollinger_bands.signal, Signal::Neutral);
    assert_eq!(summary.bollinger_bands.middle, 10.0);
}

#[test]
fn test_indicators_do_not_mutate_input() {
    let config = AnalysisConfig::default();
    let series = PriceSeries::from_points(&wavy_bars(60, 20.0, 2.0, 3));
    let before = series.clone();
    let first = compute_indicators(&series, &config);
    let second = compute_indicators(&series, &config);
    assert_eq!(series, before);
    assert_eq!(first, second);
}
