mod settings;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use stocklens_analysis::service::AnalysisService;
use stocklens_analysis::source::StoreMarketData;
use stocklens_api::server::{AppState, start_server};
use stocklens_cache::mem::MemCache;
use stocklens_core::common::time::RealTimeProvider;
use stocklens_core::config::{AppConfig, LogConfig};
use stocklens_store::quotes::SqliteQuoteStore;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// 过期缓存条目的清理间隔
const CACHE_PURGE_INTERVAL: Duration = Duration::from_secs(60);

/// # Summary
/// 初始化全局日志。
///
/// # Logic
/// 1. 过滤规则优先取 `RUST_LOG`，否则使用配置中的级别。
/// 2. 始终输出到终端；配置了目录时额外写入按天滚动的日志文件。
///
/// # Returns
/// 文件写入器的守卫，必须持有到进程退出，否则缓冲日志会丢失。
fn init_logging(config: &LogConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let (file_layer, guard) = match &config.dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "stocklens.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    guard
}

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责实例化所有具体实现组件并通过 Arc<dyn Trait> 注入到分析服务与 HTTP 层。
///
/// # Logic
/// 1. 加载配置并初始化全局日志。
/// 2. 实例化基础设施层（Store、Cache）。
/// 3. 实例化行情数据源与分析服务。
/// 4. 启动 HTTP 服务，收到 Ctrl-C 后退出。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 加载配置与日志
    let config_path = std::env::var_os(settings::CONFIG_PATH_ENV).map(PathBuf::from);
    let config: AppConfig = settings::load(config_path.as_deref())?;
    let _log_guard = init_logging(&config.log);
    info!("StockLens starting...");

    // 2. 实例化基础设施层
    stocklens_store::config::set_root_dir(PathBuf::from(&config.database.data_dir));
    let store = Arc::new(SqliteQuoteStore::new().await?);

    let mut market = StoreMarketData::new(store.clone());
    if config.cache.enabled {
        let cache = Arc::new(MemCache::new());
        market = market.with_cache(cache.clone(), Duration::from_secs(config.cache.ttl_secs));

        // 周期性清理过期条目，防止冷门证券的历史数据长期占用内存
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(CACHE_PURGE_INTERVAL);
            loop {
                ticker.tick().await;
                let purged = cache.purge_expired();
                if purged > 0 {
                    debug!(purged, "expired cache entries removed");
                }
            }
        });
        info!(ttl_secs = config.cache.ttl_secs, "history cache enabled");
    }

    // 3. 构造应用服务层（注入 Core Trait 抽象）
    let analysis = AnalysisService::new(
        Arc::new(market),
        Arc::new(RealTimeProvider),
        config.analysis.clone(),
    );

    let state = AppState {
        analysis: Arc::new(analysis),
        quote_store: store,
    };

    // 4. 启动服务，等待外部退出信号
    let bind_addr = config.server.bind_addr();
    tokio::select! {
        result = start_server(state, &bind_addr) => result?,
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("Shutdown signal received. Exiting...");
        }
    }

    Ok(())
}
