//! Rate Limiting Infrastructure
//!
//! Fixed-window counters keyed by client identity and route.
//!
//! - [`RateLimitPolicy`]: ceiling and window length for one scope
//! - [`WindowRecord`]: the per-key counter, reset once its window expires
//! - [`RateLimitDecision`]: allow/deny plus the `X-RateLimit-*` headers
//! - [`RateLimitStore`]: keyed storage with an atomic reset-and-increment
//!
//! Stores live in [`memory`] and (with the `sqlx` feature) [`postgres`];
//! the axum layer lives in [`middleware`].

pub mod memory;
pub mod middleware;
#[cfg(feature = "sqlx")]
pub mod postgres;

use std::time::Duration;

use axum::http::{HeaderMap, HeaderName, HeaderValue, header};
use chrono::{DateTime, SecondsFormat, Utc};
use kernel::error::app_error::AppResult;

pub use memory::InMemoryRateLimitStore;
pub use middleware::{RateLimitState, RateLimiter, enforce_rate_limit};
#[cfg(feature = "sqlx")]
pub use postgres::PgRateLimitStore;

pub const X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
pub const X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
pub const X_RATELIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");

/// 15 minutes
pub const DEFAULT_TTL_MS: u64 = 900_000;

// ============================================================================
// Policy
// ============================================================================

/// Rate limit configuration for one scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    /// Maximum requests allowed in the window
    pub limit: u32,
    /// Time window duration
    pub ttl: Duration,
}

impl RateLimitPolicy {
    pub fn new(limit: u32, ttl_ms: u64) -> Self {
        Self {
            limit,
            ttl: Duration::from_millis(ttl_ms),
        }
    }

    pub fn ttl_ms(&self) -> i64 {
        i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX)
    }
}

// ============================================================================
// Window record
// ============================================================================

/// Hit counter for a single identity key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowRecord {
    pub count: u32,
    pub window_start_ms: i64,
}

impl WindowRecord {
    /// Empty window opened at `now_ms`
    pub fn open(now_ms: i64) -> Self {
        Self {
            count: 0,
            window_start_ms: now_ms,
        }
    }

    pub fn is_expired(&self, policy: &RateLimitPolicy, now_ms: i64) -> bool {
        now_ms.saturating_sub(self.window_start_ms) >= policy.ttl_ms()
    }

    /// Reset if the window has expired, then count one hit.
    ///
    /// Returns the record as it stands after the hit.
    pub fn hit(&mut self, policy: &RateLimitPolicy, now_ms: i64) -> Self {
        if self.is_expired(policy, now_ms) {
            *self = Self::open(now_ms);
        }
        self.count = self.count.saturating_add(1);
        *self
    }

    pub fn expires_at_ms(&self, policy: &RateLimitPolicy) -> i64 {
        self.window_start_ms.saturating_add(policy.ttl_ms())
    }
}

// ============================================================================
// Decision
// ============================================================================

/// Outcome of one rate-limited request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub limit: u32,
    pub count: u32,
    pub remaining: u32,
    pub reset_at_ms: i64,
    /// Seconds until the window resets; only set on deny
    pub retry_after_secs: Option<u64>,
}

impl RateLimitDecision {
    /// Judge a post-increment record against its policy.
    pub fn evaluate(record: &WindowRecord, policy: &RateLimitPolicy, now_ms: i64) -> Self {
        let allowed = record.count <= policy.limit;
        let reset_at_ms = record.expires_at_ms(policy);

        let retry_after_secs = (!allowed).then(|| {
            let wait_ms = reset_at_ms.saturating_sub(now_ms).max(0) as u64;
            wait_ms.div_ceil(1000).max(1)
        });

        Self {
            allowed,
            limit: policy.limit,
            count: record.count,
            remaining: policy.limit.saturating_sub(record.count),
            reset_at_ms,
            retry_after_secs,
        }
    }

    /// RFC 3339 UTC timestamp with millisecond precision
    pub fn reset_at_rfc3339(&self) -> String {
        DateTime::<Utc>::from_timestamp_millis(self.reset_at_ms)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Write `X-RateLimit-*` (and `Retry-After` on deny) into `headers`.
    pub fn apply_headers(&self, headers: &mut HeaderMap) {
        headers.insert(X_RATELIMIT_LIMIT, HeaderValue::from(self.limit));
        headers.insert(X_RATELIMIT_REMAINING, HeaderValue::from(self.remaining));
        if let Ok(reset) = HeaderValue::from_str(&self.reset_at_rfc3339()) {
            headers.insert(X_RATELIMIT_RESET, reset);
        }
        if let Some(secs) = self.retry_after_secs {
            headers.insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }
    }
}

// ============================================================================
// Scopes
// ============================================================================

/// A named policy, e.g. `auth` or `read`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitScope {
    pub name: &'static str,
    pub policy: RateLimitPolicy,
}

impl RateLimitScope {
    pub const fn new(name: &'static str, policy: RateLimitPolicy) -> Self {
        Self { name, policy }
    }

    /// Identity key: `scope:METHOD route|client`
    pub fn key(&self, method: &str, route: &str, client: &str) -> String {
        format!("{}:{} {}|{}", self.name, method, route, client)
    }
}

/// Per-scope policies for the whole API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitSettings {
    /// Routes without an override
    pub global: RateLimitPolicy,
    /// Registration and login
    pub auth: RateLimitPolicy,
    /// Grocery writes
    pub grocery: RateLimitPolicy,
    /// Grocery reads
    pub read: RateLimitPolicy,
    /// Key clients by `X-Forwarded-For` instead of the peer address
    pub trust_proxy: bool,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            global: RateLimitPolicy::new(100, DEFAULT_TTL_MS),
            auth: RateLimitPolicy::new(5, DEFAULT_TTL_MS),
            grocery: RateLimitPolicy::new(50, DEFAULT_TTL_MS),
            read: RateLimitPolicy::new(200, DEFAULT_TTL_MS),
            trust_proxy: false,
        }
    }
}

impl RateLimitSettings {
    pub fn global_scope(&self) -> RateLimitScope {
        RateLimitScope::new("global", self.global)
    }

    pub fn auth_scope(&self) -> RateLimitScope {
        RateLimitScope::new("auth", self.auth)
    }

    pub fn grocery_scope(&self) -> RateLimitScope {
        RateLimitScope::new("grocery", self.grocery)
    }

    pub fn read_scope(&self) -> RateLimitScope {
        RateLimitScope::new("read", self.read)
    }

    /// Longest window of any scope; records older than this are dead.
    pub fn longest_ttl_ms(&self) -> i64 {
        [self.global, self.auth, self.grocery, self.read]
            .iter()
            .map(RateLimitPolicy::ttl_ms)
            .max()
            .unwrap_or(0)
    }
}

// ============================================================================
// Store
// ============================================================================

/// Trait for rate limit storage backends
///
/// `hit` must perform expiry check, reset and increment atomically per key.
#[trait_variant::make(RateLimitStore: Send)]
pub trait LocalRateLimitStore {
    /// Count one hit for `key` and return the record after the increment
    async fn hit(&self, key: &str, policy: &RateLimitPolicy, now_ms: i64)
    -> AppResult<WindowRecord>;
}
