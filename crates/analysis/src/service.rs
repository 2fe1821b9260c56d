use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use stocklens_core::analysis::entity::{AnalysisOptions, AnalysisReport};
use stocklens_core::analysis::error::AnalysisError;
use stocklens_core::analysis::port::AnalysisPort;
use stocklens_core::common::time::TimeProvider;
use stocklens_core::config::AnalysisConfig;
use stocklens_core::market::entity::PricePoint;
use stocklens_core::market::port::MarketData;
use tracing::{debug, info, warn};

use crate::indicators::{compute_indicators, summarize};
use crate::levels::key_levels;
use crate::predictor::predict;
use crate::recommendation::recommend;
use crate::series::PriceSeries;

/// # Summary
/// 由已有历史数据构建完整分析报告，不做任何 I/O。
///
/// # Logic
/// 1. 将历史拆分为列视图。
/// 2. 计算指标，并以最后收盘价生成展示信号。
/// 3. 以 `current_price` 计算关键价位与交易建议。
/// 4. 以 `horizon_days` 外推价格预测。
///
/// # Arguments
/// * `history`: 升序 K 线，调用方保证非空。
/// * `current_price`: 已解析的当前价。
/// * `horizon_days`: 预测天数。
/// * `config`: 分析参数。
/// * `now`: 报告时间戳。
pub fn build_report(
    history: &[PricePoint],
    current_price: f64,
    horizon_days: u32,
    config: &AnalysisConfig,
    now: DateTime<Utc>,
) -> AnalysisReport {
    let series = PriceSeries::from_points(history);
    let indicators = compute_indicators(&series, config);
    let last_close = series.last_close().unwrap_or(current_price);

    AnalysisReport {
        technical_indicators: summarize(&indicators, last_close),
        price_prediction: predict(&series, horizon_days, config),
        trading_recommendation: recommend(&series, &indicators, current_price, config),
        key_levels: key_levels(&series, current_price, config),
        indicators,
        current_price,
        analysis_time: now,
    }
}

fn valid_price(price: f64) -> Option<f64> {
    (price.is_finite() && price > 0.0).then_some(price)
}

/// # Summary
/// 分析编排服务，`AnalysisPort` 的默认实现。
///
/// # Invariants
/// - 只持有只读依赖，可在请求间安全共享。
/// - 报告时间取自注入的 `TimeProvider`。
pub struct AnalysisService {
    market: Arc<dyn MarketData>,
    clock: Arc<dyn TimeProvider>,
    config: AnalysisConfig,
}

impl AnalysisService {
    pub fn new(
        market: Arc<dyn MarketData>,
        clock: Arc<dyn TimeProvider>,
        config: AnalysisConfig,
    ) -> Self {
        Self {
            market,
            clock,
            config,
        }
    }

    /// # Summary
    /// 解析当前价。
    ///
    /// # Logic
    /// 1. 显式传入的正数价格优先。
    /// 2. 其次为实时报价；读取失败只记录告警。
    /// 3. 最后回退到历史最后收盘价。
    async fn resolve_price(&self, code: &str, explicit: Option<f64>, last_close: f64) -> f64 {
        if let Some(price) = explicit.and_then(valid_price) {
            return price;
        }
        match self.market.latest_price(code).await {
            Ok(Some(price)) => {
                if let Some(price) = valid_price(price) {
                    return price;
                }
                warn!(code, price, "ignoring invalid live quote");
            }
            Ok(None) => debug!(code, "no live quote, using last close"),
            Err(e) => warn!(code, error = %e, "live quote unavailable, using last close"),
        }
        last_close
    }
}

#[async_trait]
impl AnalysisPort for AnalysisService {
    async fn analyze(
        &self,
        code: &str,
        options: AnalysisOptions,
    ) -> Result<AnalysisReport, AnalysisError> {
        let history = self
            .market
            .recent_history(code, self.config.history_window)
            .await
            .map_err(|e| AnalysisError::UpstreamUnavailable(e.to_string()))?;

        let Some(last) = history.last() else {
            return Err(AnalysisError::NoHistory(code.to_string()));
        };
        let current_price = self
            .resolve_price(code, options.current_price, last.close)
            .await;
        let horizon_days = options
            .horizon_days
            .unwrap_or(self.config.horizon_days);

        let report = build_report(
            &history,
            current_price,
            horizon_days,
            &self.config,
            self.clock.now(),
        );
        info!(
            code,
            bars = history.len(),
            current_price,
            action = %report.trading_recommendation.action,
            "analysis completed"
        );
        Ok(report)
    }
}
