//! Process configuration
//!
//! Everything comes from environment variables (a `.env` file is loaded
//! first by `main`). Bad values abort startup.

use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use auth::application::config::{DEFAULT_TOKEN_TTL, parse_token_ttl};
use axum::http::HeaderValue;
use platform::rate_limit::{RateLimitPolicy, RateLimitSettings};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Which backend holds rate limit counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitBackend {
    /// Per-process, lost on restart
    Memory,
    /// Shared by every instance using the same database
    Postgres,
}

#[derive(Debug)]
pub struct ApiConfig {
    pub database_url: String,
    pub port: u16,
    pub max_connections: u32,
    pub auth: AuthConfig,
    pub rate_limit_backend: RateLimitBackend,
    pub rate_limits: RateLimitSettings,
    /// `None` allows any origin
    pub cors_origins: Option<Vec<HeaderValue>>,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;

        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;

        let rate_limit_backend = match lookup("RATE_LIMIT_STORE").as_deref().map(str::trim) {
            None | Some("") | Some("memory") => RateLimitBackend::Memory,
            Some("postgres") => RateLimitBackend::Postgres,
            Some(other) => bail!("RATE_LIMIT_STORE must be `memory` or `postgres`, got `{other}`"),
        };

        let defaults = RateLimitSettings::default();
        let rate_limits = RateLimitSettings {
            global: policy(&lookup, "THROTTLE", defaults.global)?,
            auth: policy(&lookup, "THROTTLE_AUTH", defaults.auth)?,
            grocery: policy(&lookup, "THROTTLE_GROCERY", defaults.grocery)?,
            read: policy(&lookup, "THROTTLE_READ", defaults.read)?,
            // Only behind a proxy that overwrites X-Forwarded-For
            trust_proxy: parse_or(&lookup, "TRUST_PROXY", defaults.trust_proxy)?,
        };

        let cors_origins = lookup("CORS_ORIGINS")
            .filter(|value| !value.trim().is_empty())
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(|origin| {
                        origin
                            .parse::<HeaderValue>()
                            .with_context(|| format!("invalid CORS origin `{origin}`"))
                    })
                    .collect::<anyhow::Result<Vec<_>>>()
            })
            .transpose()?;

        Ok(Self {
            database_url,
            port,
            max_connections,
            auth: auth_config(&lookup)?,
            rate_limit_backend,
            rate_limits,
            cors_origins,
        })
    }
}

fn auth_config<F>(lookup: &F) -> anyhow::Result<AuthConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let config = match lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
        Some(secret) => AuthConfig::new(secret.into_bytes()),
        None if cfg!(debug_assertions) => {
            tracing::warn!("JWT_SECRET not set, using a random secret for this process");
            AuthConfig::development()
        }
        None => bail!("JWT_SECRET must be set in production"),
    };

    let token_ttl = match lookup("JWT_EXPIRES_IN") {
        Some(raw) => parse_token_ttl(&raw)
            .with_context(|| format!("JWT_EXPIRES_IN `{raw}` is not a valid duration"))?,
        None => DEFAULT_TOKEN_TTL,
    };
    let config = config.with_token_ttl(token_ttl);

    Ok(match lookup("PASSWORD_PEPPER").filter(|s| !s.is_empty()) {
        Some(pepper) => config.with_pepper(pepper.into_bytes()),
        None => config,
    })
}

/// `<prefix>_TTL` (milliseconds) and `<prefix>_LIMIT`; zero is rejected
fn policy<F>(lookup: &F, prefix: &str, default: RateLimitPolicy) -> anyhow::Result<RateLimitPolicy>
where
    F: Fn(&str) -> Option<String>,
{
    let ttl_key = format!("{prefix}_TTL");
    let limit_key = format!("{prefix}_LIMIT");

    let ttl_ms: u64 = parse_or(lookup, &ttl_key, default.ttl_ms().unsigned_abs())?;
    let limit: u32 = parse_or(lookup, &limit_key, default.limit)?;

    if ttl_ms == 0 {
        bail!("{ttl_key} must be greater than 0");
    }
    if limit == 0 {
        bail!("{limit_key} must be greater than 0");
    }

    Ok(RateLimitPolicy {
        limit,
        ttl: Duration::from_millis(ttl_ms),
    })
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has invalid value `{raw}`")),
        None => Ok(default),
    }
}
