//! 多信号计票的交易建议。

use stocklens_core::analysis::entity::{Action, IndicatorSet, Recommendation, RiskLevel, Signal};
use stocklens_core::config::AnalysisConfig;

use crate::indicators::{bollinger_signal, kdj_signal, macd_signal, rsi_signal};
use crate::series::{PriceSeries, mean, tail};

/// 形成买卖建议所需的最少同向信号数
const MIN_AGREEING_SIGNALS: u32 = 3;
/// 每个同向信号贡献的强度
const STRENGTH_PER_SIGNAL: u32 = 25;
/// 无明确方向时的强度
const HOLD_STRENGTH: u8 = 50;
const SHORT_VOLUME_WINDOW: usize = 5;
const LONG_VOLUME_WINDOW: usize = 20;

pub const INSUFFICIENT_HISTORY_REASON: &str = "insufficient history";

/// 单次评估的信号计数
#[derive(Debug, Default)]
struct Tally {
    bullish: u32,
    bearish: u32,
    reasons: Vec<String>,
}

impl Tally {
    fn bullish(&mut self, reason: &str) {
        self.bullish += 1;
        self.reasons.push(reason.to_string());
    }

    fn bearish(&mut self, reason: &str) {
        self.bearish += 1;
        self.reasons.push(reason.to_string());
    }
}

/// 按强度划分风险等级。
pub fn risk_level(strength: u8) -> RiskLevel {
    if strength >= 80 {
        RiskLevel::Low
    } else if strength >= 60 {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

/// 近 5 日均量是否高于近 20 日均量。
pub fn volume_expanding(volumes: &[f64]) -> bool {
    if volumes.len() < SHORT_VOLUME_WINDOW {
        return false;
    }
    match (
        mean(tail(volumes, SHORT_VOLUME_WINDOW)),
        mean(tail(volumes, LONG_VOLUME_WINDOW)),
    ) {
        (Some(short), Some(long)) => short > long,
        _ => false,
    }
}

/// # Summary
/// 根据五个信号生成交易建议。
///
/// # Logic
/// 1. 历史不足 `min_history` 时直接给出 hold / 强度 0 / 高风险。
/// 2. 依次评估 RSI、MACD、KDJ、布林带 (以 `current_price` 比较) 和成交量，
///    每个非中性信号附带一条原因。
/// 3. 看多数多于看空数且不少于 3 时 buy，反之 sell，否则 hold。
/// 4. 强度 = min(100, 优势方信号数 × 25)，hold 为 50。
pub fn recommend(
    series: &PriceSeries,
    indicators: &IndicatorSet,
    current_price: f64,
    config: &AnalysisConfig,
) -> Recommendation {
    if series.len() < config.min_history {
        return Recommendation {
            action: Action::Hold,
            reasons: vec![INSUFFICIENT_HISTORY_REASON.to_string()],
            risk_level: RiskLevel::High,
            strength: 0,
        };
    }

    let mut tally = Tally::default();

    match rsi_signal(indicators.rsi) {
        Signal::Oversold => tally.bullish("RSI oversold, rebound likely"),
        Signal::Overbought => tally.bearish("RSI overbought, pullback risk"),
        _ => {}
    }

    match macd_signal(&indicators.macd) {
        Signal::Bullish => tally.bullish("MACD above zero with rising histogram, uptrend"),
        Signal::Bearish => tally.bearish("MACD below zero with falling histogram, downtrend"),
        _ => {}
    }

    match kdj_signal(&indicators.kdj) {
        Signal::Oversold => tally.bullish("KDJ oversold, rebound signal"),
        Signal::Overbought => tally.bearish("KDJ overbought, pullback signal"),
        _ => {}
    }

    match bollinger_signal(&indicators.bollinger, current_price) {
        Signal::Bullish => tally.bullish("price below the lower Bollinger band, rebound likely"),
        Signal::Bearish => tally.bearish("price above the upper Bollinger band, pullback likely"),
        _ => {}
    }

    if volume_expanding(&series.volumes) {
        tally.bullish("volume expanding, supports the advance");
    }

    let (action, dominant) = if tally.bullish > tally.bearish && tally.bullish >= MIN_AGREEING_SIGNALS
    {
        (Action::Buy, Some(tally.bullish))
    } else if tally.bearish > tally.bullish && tally.bearish >= MIN_AGREEING_SIGNALS {
        (Action::Sell, Some(tally.bearish))
    } else {
        (Action::Hold, None)
    };

    let strength = dominant.map_or(HOLD_STRENGTH, |count| {
        u8::try_from((count * STRENGTH_PER_SIGNAL).min(100)).unwrap_or(100)
    });

    Recommendation {
        action,
        reasons: tally.reasons,
        risk_level: risk_level(strength),
        strength,
    }
}
