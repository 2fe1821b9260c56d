//! # `stocklens-analysis` - 技术分析引擎
//!
//! 输入一段升序日 K 线与当前价，输出振荡指标、支撑/阻力位、趋势预测与交易建议。
//!
//! ## 组件
//! - [`indicators`]: RSI / MACD / KDJ / 布林带
//! - [`levels`]: 五类关键价位候选生成器
//! - [`filter`]: 候选去重、方向校验、距离合并与截断
//! - [`predictor`]: 线性回归趋势预测
//! - [`recommendation`]: 信号计票与交易建议
//! - [`service`]: 编排以上组件并组装报告
//! - [`source`]: 基于存储与缓存的行情数据源
//!
//! 除 `service` 与 `source` 外均为无状态纯函数，不修改输入。

pub mod filter;
pub mod indicators;
pub mod levels;
pub mod predictor;
pub mod recommendation;
pub mod series;
pub mod service;
pub mod source;
