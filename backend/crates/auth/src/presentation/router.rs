//! Auth Router

use axum::{Router, middleware::from_fn_with_state, routing::post};
use platform::rate_limit::{RateLimitStore, RateLimiter, enforce_rate_limit};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router<S>(
    repo: Arc<PgAuthRepository>,
    config: Arc<AuthConfig>,
    limiter: &RateLimiter<S>,
) -> Router
where
    S: RateLimitStore + Send + Sync + 'static,
{
    auth_router_generic(repo, config, limiter)
}

/// Create a generic Auth router for any repository implementation
///
/// Both routes share the `auth` rate limit scope.
pub fn auth_router_generic<R, S>(
    repo: Arc<R>,
    config: Arc<AuthConfig>,
    limiter: &RateLimiter<S>,
) -> Router
where
    R: UserRepository + Send + Sync + 'static,
    S: RateLimitStore + Send + Sync + 'static,
{
    let state = AuthAppState { repo, config };

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route_layer(from_fn_with_state(limiter.auth(), enforce_rate_limit::<S>))
        .with_state(state)
}
