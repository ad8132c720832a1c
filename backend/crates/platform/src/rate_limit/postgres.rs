//! PostgreSQL rate limit store
//!
//! Counters survive restarts and are shared by every API instance that
//! points at the same database.

use kernel::error::app_error::AppResult;
use sqlx::PgPool;

use super::{RateLimitPolicy, RateLimitStore, WindowRecord};

#[derive(Clone)]
pub struct PgRateLimitStore {
    pool: PgPool,
}

impl PgRateLimitStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Delete windows opened `horizon_ms` or more before `now_ms`
    pub async fn cleanup_expired(&self, now_ms: i64, horizon_ms: i64) -> AppResult<u64> {
        let deleted = sqlx::query("DELETE FROM rate_limit_windows WHERE window_start_ms <= $1")
            .bind(now_ms.saturating_sub(horizon_ms))
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::debug!(rate_limits = deleted, "Cleaned up expired rate limit windows");
        Ok(deleted)
    }
}

impl RateLimitStore for PgRateLimitStore {
    async fn hit(
        &self,
        key: &str,
        policy: &RateLimitPolicy,
        now_ms: i64,
    ) -> AppResult<WindowRecord> {
        // Both CASE arms read the pre-update row, under the row lock
        let (hit_count, window_start_ms) = sqlx::query_as::<_, (i32, i64)>(
            r#"
            INSERT INTO rate_limit_windows (rate_limit_key, hit_count, window_start_ms)
            VALUES ($1, 1, $2)
            ON CONFLICT (rate_limit_key) DO UPDATE SET
                hit_count = CASE
                    WHEN $2 - rate_limit_windows.window_start_ms >= $3 THEN 1
                    ELSE rate_limit_windows.hit_count + 1
                END,
                window_start_ms = CASE
                    WHEN $2 - rate_limit_windows.window_start_ms >= $3 THEN $2
                    ELSE rate_limit_windows.window_start_ms
                END
            RETURNING hit_count, window_start_ms
            "#,
        )
        .bind(key)
        .bind(now_ms)
        .bind(policy.ttl_ms())
        .fetch_one(&self.pool)
        .await?;

        Ok(WindowRecord {
            count: u32::try_from(hit_count).unwrap_or(u32::MAX),
            window_start_ms,
        })
    }
}
