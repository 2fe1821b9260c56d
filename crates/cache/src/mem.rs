use async_trait::async_trait;
use dashmap::DashMap;
use std::time::{Duration, Instant};
use stocklens_core::cache::error::CacheError;
use stocklens_core::cache::port::Cache;
use tracing::debug;

/// 缓存条目，`expires_at` 为 None 表示永不过期
struct Entry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// # Summary
/// 基于 DashMap 的内存 TTL 缓存。
///
/// # Invariants
/// - 所有操作均通过并发哈希表 `DashMap` 执行，保证多线程安全。
/// - 过期条目对读取不可见，并在读取时惰性删除；`purge_expired` 可主动清理。
/// - 不做容量限制。
pub struct MemCache {
    // 线程安全的 KV 存储容器
    storage: DashMap<String, Entry>,
}

impl MemCache {
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// 当前条目数 (含尚未清理的过期条目)
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// # Summary
    /// 删除所有已过期条目。
    ///
    /// # Returns
    /// 被删除的条目数。
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.storage.len();
        self.storage.retain(|_, entry| !entry.is_expired(now));
        let purged = before.saturating_sub(self.storage.len());
        if purged > 0 {
            debug!(purged, "purged expired cache entries");
        }
        purged
    }
}

impl Default for MemCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for MemCache {
    /// # Summary
    /// 设置原始字节数据。
    ///
    /// # Logic
    /// 计算过期时刻后插入哈希表，同名 Key 直接覆盖。
    /// `ttl` 过大导致时刻溢出时按永不过期处理。
    async fn set_raw(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Option<Duration>,
    ) -> Result<(), CacheError> {
        let expires_at = ttl.and_then(|ttl| Instant::now().checked_add(ttl));
        self.storage
            .insert(key.to_string(), Entry { value, expires_at });
        Ok(())
    }

    /// # Summary
    /// 获取原始字节数据。
    ///
    /// # Logic
    /// 1. 条目存在且未过期时返回克隆。
    /// 2. 条目已过期时删除并返回 None。
    async fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let now = Instant::now();
        let expired = match self.storage.get(key) {
            Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.value.clone())),
            Some(_) => true,
            None => false,
        };
        if expired {
            self.storage
                .remove_if(key, |_, entry| entry.is_expired(now));
        }
        Ok(None)
    }

    async fn del(&self, key: &str) -> Result<(), CacheError> {
        self.storage.remove(key);
        Ok(())
    }
}
