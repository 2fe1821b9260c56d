use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::fs;
use std::path::Path;
use stocklens_core::market::entity::{PricePoint, RealtimeQuote};
use stocklens_core::store::error::StoreError;
use stocklens_core::store::port::QuoteStore;
use tracing::{debug, info};

/// 行情数据库文件名
const QUOTES_DB: &str = "quotes.db";

type HistoryRow = (NaiveDate, f64, f64, f64, f64, f64, f64);

fn db_error(e: sqlx::Error) -> StoreError {
    StoreError::Database(e.to_string())
}

/// QuoteStore 的 SQLite 实现。
///
/// # Summary
/// 在单个 SQLite 数据库 (`quotes.db`) 中保存所有证券的日 K 线与实时报价。
///
/// # Invariants
/// * 数据库结构在存储实例创建时初始化。
/// * `historical_quotes` 以 `(code, date)` 为主键，重复写入以后者为准。
/// * 所有操作均通过共享的 `SqlitePool` 执行。
pub struct SqliteQuoteStore {
    pool: SqlitePool,
}

impl SqliteQuoteStore {
    /// 在全局配置的数据根目录下创建存储，见 [`crate::config::set_root_dir`]。
    pub async fn new() -> Result<Self, StoreError> {
        Self::open_at(&crate::config::get_root_dir()).await
    }

    /// 创建新的 SqliteQuoteStore 并初始化表结构。
    ///
    /// # Logic
    /// 1. 确保根目录存在。
    /// 2. 配置 SQLite 连接选项，开启 `create_if_missing`。
    /// 3. 连接到数据库并执行 DDL。
    ///
    /// # Arguments
    /// * `root` - 数据库文件所在目录。
    pub async fn open_at(root: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(root).map_err(|e| StoreError::InitError(e.to_string()))?;

        let db_path = root.join(QUOTES_DB);
        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(|e| StoreError::InitError(e.to_string()))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS historical_quotes (
                code TEXT NOT NULL,
                date DATE NOT NULL,
                open REAL NOT NULL,
                high REAL NOT NULL,
                low REAL NOT NULL,
                close REAL NOT NULL,
                volume REAL NOT NULL,
                amount REAL NOT NULL,
                PRIMARY KEY (code, date)
            );

            CREATE TABLE IF NOT EXISTS realtime_quotes (
                code TEXT PRIMARY KEY,
                latest_price REAL NOT NULL,
                updated_at DATETIME NOT NULL
            );
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| StoreError::InitError(e.to_string()))?;

        info!(path = %db_path.display(), "quote store ready");
        Ok(Self { pool })
    }
}

#[async_trait]
impl QuoteStore for SqliteQuoteStore {
    async fn save_history(&self, code: &str, points: &[PricePoint]) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        for point in points {
            sqlx::query(
                r#"
                INSERT INTO historical_quotes (code, date, open, high, low, close, volume, amount)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT(code, date) DO UPDATE SET
                    open = excluded.open,
                    high = excluded.high,
                    low = excluded.low,
                    close = excluded.close,
                    volume = excluded.volume,
                    amount = excluded.amount
                "#,
            )
            .bind(code)
            .bind(point.date)
            .bind(point.open)
            .bind(point.high)
            .bind(point.low)
            .bind(point.close)
            .bind(point.volume)
            .bind(point.amount)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;
        }

        tx.commit().await.map_err(db_error)?;
        debug!(code, count = points.len(), "saved history");
        Ok(())
    }

    async fn load_history(&self, code: &str, limit: usize) -> Result<Vec<PricePoint>, StoreError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let rows = sqlx::query_as::<_, HistoryRow>(
            r#"
            SELECT date, open, high, low, close, volume, amount
            FROM historical_quotes
            WHERE code = ?
            ORDER BY date DESC
            LIMIT ?
            "#,
        )
        .bind(code)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows
            .into_iter()
            .rev()
            .map(|r| PricePoint {
                date: r.0,
                open: r.1,
                high: r.2,
                low: r.3,
                close: r.4,
                volume: r.5,
                amount: r.6,
            })
            .collect())
    }

    async fn save_realtime(&self, quote: &RealtimeQuote) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO realtime_quotes (code, latest_price, updated_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&quote.code)
        .bind(quote.latest_price)
        .bind(quote.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(())
    }

    async fn load_realtime(&self, code: &str) -> Result<Option<RealtimeQuote>, StoreError> {
        let row = sqlx::query_as::<_, (String, f64, DateTime<Utc>)>(
            "SELECT code, latest_price, updated_at FROM realtime_quotes WHERE code = ?",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.map(|(code, latest_price, updated_at)| RealtimeQuote {
            code,
            latest_price,
            updated_at,
        }))
    }
}
