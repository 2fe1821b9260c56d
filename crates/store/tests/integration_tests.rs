use chrono::{Days, NaiveDate, TimeZone, Utc};
use stocklens_core::market::entity::{PricePoint, RealtimeQuote};
use stocklens_core::store::port::QuoteStore;
use stocklens_store::quotes::SqliteQuoteStore;
use tempfile::tempdir;

fn bars(n: u64, base: f64) -> Vec<PricePoint> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    (0..n)
        .map(|i| {
            let close = base + i as f64 * 0.1;
            PricePoint {
                date: start + Days::new(i),
                open: close - 0.05,
                high: close + 0.2,
                low: close - 0.2,
                close,
                volume: 1_000.0 + i as f64,
                amount: close * 1_000.0,
            }
        })
        .collect()
}

#[tokio::test]
async fn test_history_round_trip_is_ascending() {
    let tmp_dir = tempdir().expect("Failed to create temp dir");
    let store = SqliteQuoteStore::open_at(tmp_dir.path())
        .await
        .expect("Failed to create quote store");

    let points = bars(30, 10.0);
    store.save_history("600519", &points).await.unwrap();

    // 取最近 10 根，结果仍为升序
    let recent = store.load_history("600519", 10).await.unwrap();
    assert_eq!(recent, points[20..].to_vec());
    assert!(recent.windows(2).all(|w| w[0].date < w[1].date));

    // limit 超过总数时返回全部
    let all = store.load_history("600519", 100).await.unwrap();
    assert_eq!(all.len(), 30);

    // 其他证券无数据
    assert!(store.load_history("000001", 10).await.unwrap().is_empty());
    assert!(tmp_dir.path().join("quotes.db").exists());
}

#[tokio::test]
async fn test_history_upsert_replaces_same_day() {
    let tmp_dir = tempdir().expect("Failed to create temp dir");
    let store = SqliteQuoteStore::open_at(tmp_dir.path()).await.unwrap();

    let mut points = bars(5, 10.0);
    store.save_history("AAPL", &points).await.unwrap();

    points[4].close = 99.0;
    store.save_history("AAPL", &points[4..]).await.unwrap();

    let loaded = store.load_history("AAPL", 10).await.unwrap();
    assert_eq!(loaded.len(), 5);
    assert_eq!(loaded[4].close, 99.0);
}

#[tokio::test]
async fn test_realtime_quote_overwrite() {
    let tmp_dir = tempdir().expect("Failed to create temp dir");
    let store = SqliteQuoteStore::open_at(tmp_dir.path()).await.unwrap();

    assert!(store.load_realtime("600519").await.unwrap().is_none());

    let mut quote = RealtimeQuote {
        code: "600519".to_string(),
        latest_price: 1680.5,
        updated_at: Utc.with_ymd_and_hms(2025, 3, 14, 2, 0, 0).unwrap(),
    };
    store.save_realtime(&quote).await.unwrap();
    assert_eq!(store.load_realtime("600519").await.unwrap(), Some(quote.clone()));

    quote.latest_price = 1691.0;
    quote.updated_at = Utc.with_ymd_and_hms(2025, 3, 14, 3, 0, 0).unwrap();
    store.save_realtime(&quote).await.unwrap();
    assert_eq!(store.load_realtime("600519").await.unwrap(), Some(quote));
}

#[tokio::test]
async fn test_reopen_keeps_data() {
    let tmp_dir = tempdir().expect("Failed to create temp dir");
    {
        let store = SqliteQuoteStore::open_at(tmp_dir.path()).await.unwrap();
        store.save_history("MSFT", &bars(3, 300.0)).await.unwrap();
    }

    let reopened = SqliteQuoteStore::open_at(tmp_dir.path()).await.unwrap();
    assert_eq!(reopened.load_history("MSFT", 10).await.unwrap().len(), 3);
}
