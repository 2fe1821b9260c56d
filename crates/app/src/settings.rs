use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use stocklens_core::config::AppConfig;

/// 配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "STOCKLENS_CONFIG";
/// 未指定路径时尝试读取的配置文件 (按扩展名匹配 config.toml 等)
const DEFAULT_CONFIG_FILE: &str = "config";
/// 环境变量前缀，例如 `STOCKLENS__SERVER__PORT=9000`
const ENV_PREFIX: &str = "STOCKLENS";

/// # Summary
/// 加载应用配置。
///
/// # Logic
/// 1. 读取配置文件：显式路径必须存在，缺省的 `config.toml` 可以不存在。
/// 2. 叠加 `STOCKLENS__` 前缀的环境变量，层级分隔符为 `__`。
/// 3. 未出现的字段由 `AppConfig` 上的 `#[serde(default)]` 补齐。
///
/// # Arguments
/// * `path`: 显式指定的配置文件路径。
pub fn load(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("analysis.ma_periods")
                .with_list_parse_key("analysis.fib_ratios"),
        )
        .build()?
        .try_deserialize()
}
