//! In-process rate limit store

use std::sync::Arc;

use dashmap::DashMap;
use kernel::error::app_error::AppResult;

use super::{RateLimitPolicy, RateLimitStore, WindowRecord};

/// DashMap-backed store; the shard lock held by `entry` serializes hits per key.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRateLimitStore {
    windows: Arc<DashMap<String, WindowRecord>>,
}

impl InMemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop records whose window opened `horizon_ms` or more ago.
    ///
    /// Returns the number of records removed.
    pub fn evict_stale(&self, now_ms: i64, horizon_ms: i64) -> usize {
        let before = self.windows.len();
        self.windows
            .retain(|_, record| now_ms.saturating_sub(record.window_start_ms) < horizon_ms);
        before.saturating_sub(self.windows.len())
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

impl RateLimitStore for InMemoryRateLimitStore {
    async fn hit(
        &self,
        key: &str,
        policy: &RateLimitPolicy,
        now_ms: i64,
    ) -> AppResult<WindowRecord> {
        let mut record = self
            .windows
            .entry(key.to_owned())
            .or_insert_with(|| WindowRecord::open(now_ms));
        Ok(record.hit(policy, now_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> RateLimitPolicy {
        RateLimitPolicy::new(3, 10_000)
    }

    #[tokio::test]
    async fn test_counts_per_key() {
        let store = InMemoryRateLimitStore::new();

        assert_eq!(store.hit("a", &policy(), 0).await.unwrap().count, 1);
        assert_eq!(store.hit("a", &policy(), 1).await.unwrap().count, 2);
        assert_eq!(store.hit("b", &policy(), 2).await.unwrap().count, 1);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_first_hit_after_expiry_resets() {
        let store = InMemoryRateLimitStore::new();
        for now in 0..5 {
            store.hit("k", &policy(), now).await.unwrap();
        }

        let record = store.hit("k", &policy(), 10_000).await.unwrap();
        assert_eq!(record.count, 1);
        assert_eq!(record.window_start_ms, 10_000);
    }

    #[tokio::test]
    async fn test_evict_stale() {
        let store = InMemoryRateLimitStore::new();
        store.hit("old", &policy(), 0).await.unwrap();
        store.hit("new", &policy(), 50_000).await.unwrap();

        let removed = store.evict_stale(60_000, 30_000);

        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.hit("new", &policy(), 55_000).await.unwrap().count, 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_hits_get_distinct_counts() {
        const N: u32 = 200;
        let store = InMemoryRateLimitStore::new();
        let policy = RateLimitPolicy::new(10, 60_000);

        let handles: Vec<_> = (0..N)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.hit("shared", &policy, 1_000).await.unwrap().count })
            })
            .collect();

        let mut counts = Vec::with_capacity(N as usize);
        for handle in handles {
            counts.push(handle.await.unwrap());
        }
        counts.sort_unstable();

        assert_eq!(counts, (1..=N).collect::<Vec<_>>());
    }
}
