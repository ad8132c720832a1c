//! Grocery Router
//!
//! Reads and writes sit behind different rate limit scopes (`read` and
//! `grocery`). The limiter runs before the bearer check, so unauthenticated
//! floods are counted too.

use auth::domain::repository::UserRepository;
use auth::middleware::{AuthMiddlewareState, require_bearer};
use auth::{AuthConfig, PgAuthRepository};
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, patch, post},
};
use platform::rate_limit::{RateLimitStore, RateLimiter, enforce_rate_limit};
use std::sync::Arc;

use crate::domain::repository::GroceryRepository;
use crate::infra::postgres::PgGroceryRepository;
use crate::presentation::handlers::{self, GroceryAppState};

/// Create the Grocery router with PostgreSQL repositories
pub fn grocery_router<S>(
    repo: Arc<PgGroceryRepository>,
    users: Arc<PgAuthRepository>,
    config: Arc<AuthConfig>,
    limiter: &RateLimiter<S>,
) -> Router
where
    S: RateLimitStore + Send + Sync + 'static,
{
    grocery_router_generic(repo, AuthMiddlewareState::new(users, config), limiter)
}

/// Create a generic Grocery router for any repository implementation
pub fn grocery_router_generic<G, U, S>(
    repo: Arc<G>,
    auth: AuthMiddlewareState<U>,
    limiter: &RateLimiter<S>,
) -> Router
where
    G: GroceryRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    S: RateLimitStore + Send + Sync + 'static,
{
    let state = GroceryAppState { repo };

    // route_layer order: the last one added runs first
    let reads = Router::new()
        .route("/", get(handlers::list_items::<G>))
        .route("/{id}", get(handlers::get_item::<G>))
        .route_layer(from_fn_with_state(auth.clone(), require_bearer::<U>))
        .route_layer(from_fn_with_state(limiter.read(), enforce_rate_limit::<S>));

    let writes = Router::new()
        .route("/", post(handlers::create_item::<G>))
        .route(
            "/{id}",
            patch(handlers::update_item::<G>).delete(handlers::delete_item::<G>),
        )
        .route_layer(from_fn_with_state(auth, require_bearer::<U>))
        .route_layer(from_fn_with_state(limiter.grocery(), enforce_rate_limit::<S>));

    reads.merge(writes).with_state(state)
}
