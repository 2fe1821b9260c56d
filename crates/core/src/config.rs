use serde::{Deserialize, Serialize};

/// 全局应用配置
///
/// 所有分段均带默认值，配置文件或环境变量只需覆盖关心的字段。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub analysis: AnalysisConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// 监听地址，形如 `0.0.0.0:8080`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub data_dir: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
        }
    }
}

/// 历史行情缓存配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    // 是否启用历史数据缓存
    pub enabled: bool,
    // 缓存条目存活秒数
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: 300,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    // 默认日志过滤规则，可被 RUST_LOG 覆盖
    pub level: String,
    // 滚动日志目录，为空时只输出到终端
    pub dir: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
        }
    }
}

/// # Summary
/// 技术分析引擎参数。
///
/// 指标周期与各类经验阈值全部以具名字段暴露，默认值即生产取值。
///
/// # Invariants
/// - 所有周期必须大于 0，`macd_fast < macd_slow`。
/// - 百分比阈值以小数表示 (0.015 即 1.5%)。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub kdj_period: usize,
    pub bollinger_period: usize,
    pub bollinger_k: f64,
    pub ma_periods: Vec<usize>,
    pub fib_ratios: Vec<f64>,

    // 单次分析读取的历史 K 线数量
    pub history_window: usize,
    // 关键价位、预测与交易建议所需的最少 K 线数量
    pub min_history: usize,
    // 默认预测天数
    pub horizon_days: u32,

    // 极值检测窗口半宽
    pub extrema_half_width: usize,
    // 极值点成交量权重下限 (严格大于)
    pub volume_weight_threshold: f64,
    // 同类极值点的去重距离 (相对当前价)
    pub extrema_dedup_pct: f64,
    // 斐波那契回撤的回看 K 线数
    pub fib_lookback: usize,
    // 斐波那契回撤所需的最小振幅 (相对当前价)
    pub fib_min_spread_pct: f64,
    // 均线价位与当前价的最大距离 (相对当前价)
    pub ma_max_distance_pct: f64,
    // 心理价位向上/向下搜索的整数步数
    pub psychological_steps: u32,
    // 最终价位之间的最小距离 (相对当前价)
    pub level_min_distance_pct: f64,
    // 距离过滤后的稳定截断数
    pub level_pre_cap: usize,
    // 每个方向输出的价位上限
    pub max_levels: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            kdj_period: 9,
            bollinger_period: 20,
            bollinger_k: 2.0,
            ma_periods: vec![5, 10, 20, 30, 60],
            fib_ratios: vec![0.236, 0.382, 0.5, 0.618, 0.786],
            history_window: 60,
            min_history: 20,
            horizon_days: 30,
            extrema_half_width: 3,
            volume_weight_threshold: 0.8,
            extrema_dedup_pct: 0.02,
            fib_lookback: 20,
            fib_min_spread_pct: 0.05,
            ma_max_distance_pct: 0.15,
            psychological_steps: 15,
            level_min_distance_pct: 0.015,
            level_pre_cap: 5,
            max_levels: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.database.data_dir, "data");
        assert_eq!(config.cache.ttl_secs, 300);
        assert_eq!(config.analysis.ma_periods, vec![5, 10, 20, 30, 60]);
        assert_eq!(config.analysis.level_min_distance_pct, 0.015);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let json = r#"{ "server": { "port": 9000 }, "analysis": { "rsi_period": 6 } }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.analysis.rsi_period, 6);
        assert_eq!(config.analysis.macd_slow, 26);
        assert!(config.cache.enabled);
    }
}
