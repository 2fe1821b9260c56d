//! 关键价位过滤器。
//!
//! 把五类生成器的候选合并为最终价位列表，方向约束在这里被强制执行，
//! 即使候选集合中混入了方向错误或大量重复的值也不会泄漏到输出。

use stocklens_core::analysis::entity::{LevelCandidate, LevelSide};
use stocklens_core::config::AnalysisConfig;

use crate::series::round_dp;

/// 候选价格是否位于当前价的正确一侧。
pub fn is_on_side(price: f64, current_price: f64, side: LevelSide) -> bool {
    match side {
        LevelSide::Support => price > 0.0 && price < current_price,
        LevelSide::Resistance => price > current_price,
    }
}

/// # Summary
/// 将单一方向的候选集合收敛为最终价位列表。
///
/// # Logic
/// 1. 保留 2 位小数后精确去重，丢弃非有限值。
/// 2. 方向过滤：支撑位必须在 (0, 当前价) 内，阻力位必须大于当前价。
/// 3. 排序：支撑位降序、阻力位升序，离当前价最近的在前。
/// 4. 距离过滤：与任一已接受价位的距离小于 `level_min_distance_pct × 当前价` 的候选被合并掉。
/// 5. 先截断到 `level_pre_cap`，再截断到 `max_levels`。
///
/// # Arguments
/// * `candidates`: 所有生成器产出的同向候选。
/// * `current_price`: 当前价。
/// * `side`: 支撑或阻力。
/// * `config`: 阈值配置。
///
/// # Returns
/// 严格单调、彼此间距足够的价位列表，长度不超过 `max_levels`。
pub fn filter_levels(
    candidates: &[LevelCandidate],
    current_price: f64,
    side: LevelSide,
    config: &AnalysisConfig,
) -> Vec<f64> {
    let mut prices: Vec<f64> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let price = round_dp(candidate.price, 2);
        if price.is_finite() && !prices.contains(&price) {
            prices.push(price);
        }
    }

    prices.retain(|&price| is_on_side(price, current_price, side));

    match side {
        LevelSide::Support => prices.sort_by(|a, b| b.total_cmp(a)),
        LevelSide::Resistance => prices.sort_by(|a, b| a.total_cmp(b)),
    }

    let min_distance = current_price * config.level_min_distance_pct;
    let mut accepted: Vec<f64> = Vec::new();
    for price in prices {
        if accepted
            .iter()
            .all(|&existing| (price - existing).abs() >= min_distance)
        {
            accepted.push(price);
        }
    }

    accepted.truncate(config.level_pre_cap);
    accepted.truncate(config.max_levels);
    accepted
}
