//! Axum rate limit layer
//!
//! ```ignore
//! let state = RateLimitState::new(store, settings.auth_scope());
//! Router::new()
//!     .route("/login", post(login))
//!     .route_layer(from_fn_with_state(state, enforce_rate_limit::<InMemoryRateLimitStore>));
//! ```

use std::sync::Arc;

use axum::extract::{MatchedPath, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use kernel::error::app_error::AppError;

use super::{RateLimitDecision, RateLimitScope, RateLimitSettings, RateLimitStore};
use crate::client::client_identity;

/// Route label for requests that matched no route
const UNMATCHED_ROUTE: &str = "*";

/// Middleware state: a shared store plus the scope this layer enforces
pub struct RateLimitState<S> {
    pub store: Arc<S>,
    pub scope: RateLimitScope,
    /// Honour `X-Forwarded-For` when building the client identity
    pub trust_proxy: bool,
}

impl<S> RateLimitState<S> {
    pub fn new(store: Arc<S>, scope: RateLimitScope) -> Self {
        Self {
            store,
            scope,
            trust_proxy: false,
        }
    }

    pub fn with_trust_proxy(mut self, trust_proxy: bool) -> Self {
        self.trust_proxy = trust_proxy;
        self
    }
}

impl<S> Clone for RateLimitState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            scope: self.scope,
            trust_proxy: self.trust_proxy,
        }
    }
}

/// One store shared by every scope; hands out per-scope middleware state
pub struct RateLimiter<S> {
    pub store: Arc<S>,
    pub settings: RateLimitSettings,
}

impl<S> RateLimiter<S> {
    pub fn new(store: Arc<S>, settings: RateLimitSettings) -> Self {
        Self { store, settings }
    }

    pub fn scoped(&self, scope: RateLimitScope) -> RateLimitState<S> {
        RateLimitState::new(Arc::clone(&self.store), scope)
            .with_trust_proxy(self.settings.trust_proxy)
    }

    pub fn global(&self) -> RateLimitState<S> {
        self.scoped(self.settings.global_scope())
    }

    pub fn auth(&self) -> RateLimitState<S> {
        self.scoped(self.settings.auth_scope())
    }

    pub fn grocery(&self) -> RateLimitState<S> {
        self.scoped(self.settings.grocery_scope())
    }

    pub fn read(&self) -> RateLimitState<S> {
        self.scoped(self.settings.read_scope())
    }
}

impl<S> Clone for RateLimiter<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            settings: self.settings,
        }
    }
}

/// Count the request against its scope and reject it with 429 once over
/// the limit. Rate limit headers are attached to every response.
pub async fn enforce_rate_limit<S>(
    State(state): State<RateLimitState<S>>,
    req: Request,
    next: Next,
) -> Response
where
    S: RateLimitStore + Send + Sync + 'static,
{
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_owned());
    let client = client_identity(&req, state.trust_proxy);
    let key = state.scope.key(req.method().as_str(), &route, &client);
    let policy = state.scope.policy;
    let now_ms = Utc::now().timestamp_millis();

    let record = match state.store.hit(&key, &policy, now_ms).await {
        Ok(record) => record,
        Err(err) => {
            if err.is_server_error() {
                tracing::error!(scope = state.scope.name, key = %key, error = %err, "Rate limit store failure");
            } else {
                tracing::warn!(scope = state.scope.name, key = %key, error = %err, "Rate limit store rejected hit");
            }
            return err.into_response();
        }
    };

    let decision = RateLimitDecision::evaluate(&record, &policy, now_ms);

    if !decision.allowed {
        tracing::warn!(
            scope = state.scope.name,
            key = %key,
            count = decision.count,
            limit = decision.limit,
            "Rate limit exceeded"
        );
        let mut response = AppError::too_many_requests("Too many requests")
            .with_action("Wait until the rate limit window resets")
            .into_response();
        decision.apply_headers(response.headers_mut());
        return response;
    }

    let mut response = next.run(req).await;
    decision.apply_headers(response.headers_mut());
    response
}
