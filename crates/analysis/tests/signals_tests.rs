mod common;

use common::{flat_bars, rising_bars, wavy_bars};
use stocklens_analysis::predictor::predict;
use stocklens_analysis::recommendation::{INSUFFICIENT_HISTORY_REASON, recommend};
use stocklens_analysis::series::PriceSeries;
use stocklens_core::analysis::entity::{
    Action, BollingerBands, IndicatorSet, KdjValue, MacdValue, Prediction, RiskLevel,
};
use stocklens_core::config::AnalysisConfig;

fn neutral_indicators() -> IndicatorSet {
    IndicatorSet {
        rsi: 50.0,
        macd: MacdValue::default(),
        kdj: KdjValue::NEUTRAL,
        bollinger: BollingerBands {
            upper: 11.0,
            middle: 10.0,
            lower: 9.0,
        },
    }
}

// ============================================================
//  预测
// ============================================================

#[test]
fn test_prediction_on_rising_prices() {
    let config = AnalysisConfig::default();
    let series = PriceSeries::from_points(&rising_bars(60, 10.0, 20.0));

    let prediction = predict(&series, 30, &config);

    assert_eq!(prediction.target_price, 25.25);
    assert_eq!(prediction.change_percent, 26.27);
    assert!(prediction.prediction_range.min <= prediction.target_price);
    assert!(prediction.prediction_range.max >= prediction.target_price);
    // RSI 100 (−5)，MACD 多头 (+15)，斜率为正 (+10)
    assert_eq!(prediction.confidence, 70.0);
}

#[test]
fn test_prediction_on_flat_prices() {
    let config = AnalysisConfig::default();
    let series = PriceSeries::from_points(&flat_bars(60, 10.0));

    let prediction = predict(&series, 30, &config);

    assert_eq!(prediction.target_price, 10.0);
    assert_eq!(prediction.change_percent, 0.0);
    assert_eq!(prediction.prediction_range.min, 10.0);
    assert_eq!(prediction.prediction_range.max, 10.0);
    // RSI 中性 +10，MACD 为 0 不调整，零斜率按非上涨 −10
    assert_eq!(prediction.confidence, 50.0);
}

#[test]
fn test_prediction_short_history_is_zeroed() {
    let config = AnalysisConfig::default();
    let series = PriceSeries::from_points(&rising_bars(19, 10.0, 20.0));

    assert_eq!(predict(&series, 30, &config), Prediction::default());
}

#[test]
fn test_prediction_horizon_moves_target() {
    let config = AnalysisConfig::default();
    let series = PriceSeries::from_points(&rising_bars(60, 10.0, 20.0));

    let near = predict(&series, 5, &config);
    let far = predict(&series, 90, &config);
    assert!(far.target_price > near.target_price);

    let near_width = near.prediction_range.max - near.prediction_range.min;
    let far_width = far.prediction_range.max - far.prediction_range.min;
    assert!(far_width > near_width);
}

#[test]
fn test_prediction_confidence_in_bounds() {
    let config = AnalysisConfig::default();
    for seed in 0..10 {
        let series = PriceSeries::from_points(&wavy_bars(60, 15.0, 2.5, seed));
        let prediction = predict(&series, 30, &config);
        assert!((0.0..=100.0).contains(&prediction.confidence));
    }
}

// ============================================================
//  交易建议
// ============================================================

#[test]
fn test_short_history_holds() {
    let config = AnalysisConfig::default();
    let series = PriceSeries::from_points(&flat_bars(5, 10.0));

    let recommendation = recommend(&series, &neutral_indicators(), 10.0, &config);

    assert_eq!(recommendation.action, Action::Hold);
    assert_eq!(recommendation.strength, 0);
    assert_eq!(recommendation.risk_level, RiskLevel::High);
    assert_eq!(recommendation.reasons, vec![INSUFFICIENT_HISTORY_REASON]);
}

#[test]
fn test_neutral_signals_hold() {
    let config = AnalysisConfig::default();
    let series = PriceSeries::from_points(&flat_bars(60, 10.0));

    let recommendation = recommend(&series, &neutral_indicators(), 10.0, &config);

    assert_eq!(recommendation.action, Action::Hold);
    assert_eq!(recommendation.strength, 50);
    assert_eq!(recommendation.risk_level, RiskLevel::High);
    assert!(recommendation.reasons.is_empty());
}

#[test]
fn test_three_bullish_signals_buy() {
    let config = AnalysisConfig::default();
    let series = PriceSeries::from_points(&flat_bars(60, 10.0));
    let indicators = IndicatorSet {
        rsi: 20.0,
        kdj: KdjValue {
            k: 15.0,
            d: 20.0,
            j: 5.0,
        },
        ..neutral_indicators()
    };

    // 价格跌破下轨：第三个看多信号
    let recommendation = recommend(&series, &indicators, 8.5, &config);

    assert_eq!(recommendation.action, Action::Buy);
    assert_eq!(recommendation.strength, 75);
    assert_eq!(recommendation.risk_level, RiskLevel::Medium);
    assert_eq!(recommendation.reasons.len(), 3);
}

#[test]
fn test_volume_expansion_counts_as_bullish() {
    let config = AnalysisConfig::default();
    let mut bars = flat_bars(60, 10.0);
    for bar in bars.iter_mut().skip(55) {
        bar.volume *= 3.0;
    }
    let series = PriceSeries::from_points(&bars);
    let indicators = IndicatorSet {
        rsi: 20.0,
        kdj: KdjValue {
            k: 15.0,
            d: 20.0,
            j: 5.0,
        },
        ..neutral_indicators()
    };

    let recommendation = recommend(&series, &indicators, 8.5, &config);

    assert_eq!(recommendation.action, Action::Buy);
    assert_eq!(recommendation.strength, 100);
    assert_eq!(recommendation.risk_level, RiskLevel::Low);
    assert_eq!(recommendation.reasons.len(), 4);
}

#[test]
fn test_bearish_majority_sells() {
    let config = AnalysisConfig::default();
    let series = PriceSeries::from_points(&flat_bars(60, 10.0));
    let indicators = IndicatorSet {
        rsi: 85.0,
        macd: MacdValue {
            macd: -0.5,
            signal: -0.2,
            histogram: -0.3,
        },
        kdj: KdjValue {
            k: 85.0,
            d: 80.0,
            j: 95.0,
        },
        ..neutral_indicators()
    };

    let recommendation = recommend(&series, &indicators, 11.5, &config);

    assert_eq!(recommendation.action, Action::Sell);
    assert_eq!(recommendation.strength, 100);
    assert_eq!(recommendation.risk_level, RiskLevel::Low);
    assert_eq!(recommendation.reasons.len(), 4);
}

#[test]
fn test_split_signals_hold() {
    let config = AnalysisConfig::default();
    let series = PriceSeries::from_points(&flat_bars(60, 10.0));
    let indicators = IndicatorSet {
        rsi: 20.0,
        macd: MacdValue {
            macd: -0.5,
            signal: -0.2,
            histogram: -0.3,
        },
        kdj: KdjValue {
            k: 15.0,
            d: 20.0,
            j: 5.0,
        },
        ..neutral_indicators()
    };

    // 价格突破上轨：看多 2，看空 2
    let recommendation = recommend(&series, &indicators, 11.5, &config);

    assert_eq!(recommendation.action, Action::Hold);
    assert_eq!(recommendation.strength, 50);
    assert_eq!(recommendation.reasons.len(), 4);
}

#[test]
fn test_unavailable_bands_are_neutral() {
    let config = AnalysisConfig::default();
    let series = PriceSeries::from_points(&flat_bars(60, 10.0));
    let indicators = IndicatorSet {
        bollinger: BollingerBands::default(),
        ..neutral_indicators()
    };

    let recommendation = recommend(&series, &indicators, 10.0, &config);

    assert!(recommendation.reasons.is_empty());
}
