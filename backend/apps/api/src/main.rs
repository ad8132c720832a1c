//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use auth::{AuthConfig, PgAuthRepository, auth_router};
use axum::{
    Router,
    extract::Request,
    http::{Method, header},
    middleware::from_fn_with_state,
    routing::any,
};
use chrono::Utc;
use grocery::{PgGroceryRepository, grocery_router};
use kernel::error::app_error::AppError;
use platform::rate_limit::{
    InMemoryRateLimitStore, PgRateLimitStore, RateLimitStore, RateLimiter, X_RATELIMIT_LIMIT,
    X_RATELIMIT_REMAINING, X_RATELIMIT_RESET, enforce_rate_limit,
};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ApiConfig, RateLimitBackend};

/// How often expired rate limit windows are swept
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,grocery=info,platform=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let auth_config = Arc::new(config.auth);
    let cors = cors_layer(config.cors_origins);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    if config.rate_limits.trust_proxy {
        tracing::info!("Rate limiting keys clients by X-Forwarded-For");
    }

    match config.rate_limit_backend {
        RateLimitBackend::Memory => {
            let store = Arc::new(InMemoryRateLimitStore::new());
            let limiter = RateLimiter::new(store.clone(), config.rate_limits);
            let horizon_ms = config.rate_limits.longest_ttl_ms();

            tokio::spawn(async move {
                let mut interval = tokio::time::interval(SWEEP_INTERVAL);
                loop {
                    interval.tick().await;
                    let evicted = store.evict_stale(Utc::now().timestamp_millis(), horizon_ms);
                    if evicted > 0 {
                        tracing::debug!(rate_limits = evicted, "Evicted stale rate limit windows");
                    }
                }
            });

            serve(addr, production_app(pool, auth_config, &limiter, cors)).await
        }
        RateLimitBackend::Postgres => {
            let store = Arc::new(PgRateLimitStore::new(pool.clone()));
            let limiter = RateLimiter::new(store.clone(), config.rate_limits);
            let horizon_ms = config.rate_limits.longest_ttl_ms();

            // Errors here should not stop the server
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(SWEEP_INTERVAL);
                loop {
                    interval.tick().await;
                    if let Err(e) = store
                        .cleanup_expired(Utc::now().timestamp_millis(), horizon_ms)
                        .await
                    {
                        tracing::warn!(error = %e, "Rate limit cleanup failed, continuing anyway");
                    }
                }
            });

            serve(addr, production_app(pool, auth_config, &limiter, cors)).await
        }
    }
}

async fn serve(addr: SocketAddr, app: Router) -> anyhow::Result<()> {
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Routers backed by PostgreSQL repositories
fn production_app<S>(
    pool: PgPool,
    auth_config: Arc<AuthConfig>,
    limiter: &RateLimiter<S>,
    cors: CorsLayer,
) -> Router
where
    S: RateLimitStore + Send + Sync + 'static,
{
    let users = Arc::new(PgAuthRepository::new(pool.clone()));
    let items = Arc::new(PgGroceryRepository::new(pool));

    app(
        auth_router(users.clone(), auth_config.clone(), limiter),
        grocery_router(items, users, auth_config, limiter),
        limiter,
    )
    .layer(TraceLayer::new_for_http())
    .layer(cors)
}

/// Mount the domain routers; anything unmatched is a 404 counted against
/// the `global` scope.
fn app<S>(auth_routes: Router, grocery_routes: Router, limiter: &RateLimiter<S>) -> Router
where
    S: RateLimitStore + Send + Sync + 'static,
{
    let fallback = any(not_found).layer(from_fn_with_state(
        limiter.global(),
        enforce_rate_limit::<S>,
    ));

    Router::new()
        .nest("/auth", auth_routes)
        .nest("/grocery", grocery_routes)
        .fallback_service(fallback)
}

async fn not_found(req: Request) -> AppError {
    AppError::not_found(format!("Cannot {} {}", req.method(), req.uri().path()))
}

fn cors_layer(origins: Option<Vec<header::HeaderValue>>) -> CorsLayer {
    let allow_origin = match origins {
        Some(origins) => AllowOrigin::list(origins),
        None => AllowOrigin::any(),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .expose_headers([
            X_RATELIMIT_LIMIT,
            X_RATELIMIT_REMAINING,
            X_RATELIMIT_RESET,
            header::RETRY_AFTER,
        ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::{InMemoryAuthRepository, auth_router_generic, middleware::AuthMiddlewareState};
    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::response::Response;
    use grocery::{InMemoryGroceryRepository, grocery_router_generic};
    use platform::rate_limit::{RateLimitPolicy, RateLimitSettings};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn test_app(global_limit: u32) -> Router {
        let users = Arc::new(InMemoryAuthRepository::new());
        let config = Arc::new(AuthConfig::new(b"api-test-secret".to_vec()));
        let settings = RateLimitSettings {
            global: RateLimitPolicy::new(global_limit, 60_000),
            ..RateLimitSettings::default()
        };
        let limiter = RateLimiter::new(Arc::new(InMemoryRateLimitStore::new()), settings);

        app(
            auth_router_generic(users.clone(), config.clone(), &limiter),
            grocery_router_generic(
                Arc::new(InMemoryGroceryRepository::new()),
                AuthMiddlewareState::new(users, config),
                &limiter,
            ),
            &limiter,
        )
    }

    fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("x-forwarded-for", "192.0.2.10");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_register_then_manage_items() {
        let app = test_app(100);

        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/auth/register",
                None,
                Some(json!({
                    "email": "shopper@example.com",
                    "password": "password123",
                    "firstName": "Ada",
                    "lastName": "Lovelace"
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let session = json_body(response).await;
        let token = session["accessToken"].as_str().unwrap().to_string();
        let user_id = session["user"]["id"].clone();

        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/grocery",
                Some(&token),
                Some(json!({
                    "name": "Whole Milk",
                    "price": 1.49,
                    "quantity": 2,
                    "category": "Dairy"
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let item = json_body(response).await;
        assert_eq!(item["userId"], user_id);

        let response = app
            .oneshot(request("GET", "/grocery", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unmatched_route_uses_global_scope() {
        let app = test_app(1);

        let response = app
            .clone()
            .oneshot(request("GET", "/nope", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[X_RATELIMIT_LIMIT], "1");
        assert_eq!(json_body(response).await["detail"], "Cannot GET /nope");

        let response = app
            .oneshot(request("GET", "/still-nope", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }
}
