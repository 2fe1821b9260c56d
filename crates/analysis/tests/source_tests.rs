mod common;

use chrono::Utc;
use common::flat_bars;
use std::sync::Arc;
use std::time::Duration;
use stocklens_analysis::source::StoreMarketData;
use stocklens_cache::mem::MemCache;
use stocklens_core::market::entity::RealtimeQuote;
use stocklens_core::market::port::MarketData;
use stocklens_core::store::port::QuoteStore;
use stocklens_core::test_utils::InMemoryQuoteStore;

async fn seeded_store() -> anyhow::Result<Arc<InMemoryQuoteStore>> {
    let store = Arc::new(InMemoryQuoteStore::new());
    store.save_history("600519", &flat_bars(80, 10.0)).await?;
    Ok(store)
}

#[tokio::test]
async fn test_history_is_served_from_cache() -> anyhow::Result<()> {
    let store = seeded_store().await?;
    let source = StoreMarketData::new(store.clone())
        .with_cache(Arc::new(MemCache::new()), Duration::from_secs(60));

    let first = source.recent_history("600519", 60).await?;
    let second = source.recent_history("600519", 60).await?;

    assert_eq!(first.len(), 60);
    assert_eq!(first, second);
    assert_eq!(store.load_calls(), 1);

    // 不同的 limit 使用不同的缓存键
    let shorter = source.recent_history("600519", 20).await?;
    assert_eq!(shorter.len(), 20);
    assert_eq!(store.load_calls(), 2);
    Ok(())
}

#[tokio::test]
async fn test_cache_entries_expire() -> anyhow::Result<()> {
    let store = seeded_store().await?;
    let source = StoreMarketData::new(store.clone())
        .with_cache(Arc::new(MemCache::new()), Duration::from_millis(20));

    source.recent_history("600519", 60).await?;
    tokio::time::sleep(Duration::from_millis(50)).await;
    source.recent_history("600519", 60).await?;

    assert_eq!(store.load_calls(), 2);
    Ok(())
}

#[tokio::test]
async fn test_without_cache_reads_store_every_time() -> anyhow::Result<()> {
    let store = seeded_store().await?;
    let source = StoreMarketData::new(store.clone());

    source.recent_history("600519", 60).await?;
    source.recent_history("600519", 60).await?;

    assert_eq!(store.load_calls(), 2);
    Ok(())
}

#[tokio::test]
async fn test_empty_history_is_not_cached() -> anyhow::Result<()> {
    let store = Arc::new(InMemoryQuoteStore::new());
    let source = StoreMarketData::new(store.clone())
        .with_cache(Arc::new(MemCache::new()), Duration::from_secs(60));

    assert!(source.recent_history("NEW", 60).await?.is_empty());
    store.save_history("NEW", &flat_bars(30, 5.0)).await?;
    assert_eq!(source.recent_history("NEW", 60).await?.len(), 30);
    Ok(())
}

#[tokio::test]
async fn test_latest_price_is_never_cached() -> anyhow::Result<()> {
    let store = seeded_store().await?;
    let source = StoreMarketData::new(store.clone())
        .with_cache(Arc::new(MemCache::new()), Duration::from_secs(60));

    assert_eq!(source.latest_price("600519").await?, None);

    let mut quote = RealtimeQuote {
        code: "600519".to_string(),
        latest_price: 10.2,
        updated_at: Utc::now(),
    };
    store.save_realtime(&quote).await?;
    assert_eq!(source.latest_price("600519").await?, Some(10.2));

    quote.latest_price = 10.4;
    store.save_realtime(&quote).await?;
    assert_eq!(source.latest_price("600519").await?, Some(10.4));
    Ok(())
}
