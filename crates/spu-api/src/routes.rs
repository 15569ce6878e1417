//! Router setup and server startup.

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use spu_core::config::ApiConfig;
use spu_core::error::SpuError;

use crate::handlers;
use crate::rate_limit::{limit_requests, RateLimiter};
use crate::state::AppState;

/// Largest accepted request body. Larger chat bodies get 413.
pub const MAX_BODY_BYTES: usize = 256 * 1024;

/// Origins allowed when none are configured: the server's own local origin.
fn default_origins(port: u16) -> Vec<String> {
    vec![
        format!("http://127.0.0.1:{}", port),
        format!("http://localhost:{}", port),
    ]
}

fn cors_layer(config: &ApiConfig) -> CorsLayer {
    let configured = if config.allowed_origins.is_empty() {
        default_origins(config.port)
    } else {
        config.allowed_origins.clone()
    };

    let origins: Vec<HeaderValue> = configured
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

/// Create the axum Router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let limiter = RateLimiter::new(state.config.rate_limit_per_sec);

    let chat_routes = Router::new()
        .route("/api/chat", post(handlers::chat))
        .route_layer(middleware::from_fn_with_state(limiter, limit_requests));

    Router::new()
        .route("/health", get(handlers::health))
        .merge(chat_routes)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config))
        .with_state(state)
}

/// Bind to the configured host and port and serve until shutdown.
pub async fn start_server(state: AppState) -> Result<(), SpuError> {
    let addr = format!("{}:{}", state.config.host, state.config.port);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| SpuError::Api(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Starting API server on {}", addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| SpuError::Api(format!("Server error: {}", e)))?;

    Ok(())
}
