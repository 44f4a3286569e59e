/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Health check (open)
 * 2. WebSocket upgrade (token validated inside the handler, before upgrade)
 * 3. API routes (JWT middleware applied as a group)
 *
 * CORS is restricted to the configured frontend origin with credentials
 * enabled, so a wildcard origin is never used.
 */

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::realtime::ws_handler;
use crate::routes::api_routes::configure_api_routes;
use crate::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `state` - Application state containing the stores and event relay
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(state: AppState) -> Router<()> {
    let cors = cors_layer(&state.config.frontend_url);

    Router::new()
        .route("/health", get(health_check))
        .route("/ws", get(ws_handler))
        .merge(configure_api_routes(state.clone()))
        .layer(cors)
        .with_state(state)
}

/// Build a CORS layer pinned to the configured frontend origin
///
/// Falls back to a non-credentialed permissive layer only if the configured
/// origin is not a valid header value, which is logged loudly.
fn cors_layer(frontend_url: &str) -> CorsLayer {
    match frontend_url.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
            ])
            .allow_headers([AUTHORIZATION, CONTENT_TYPE])
            .allow_credentials(true),
        Err(e) => {
            tracing::error!(
                "[Server] Invalid FRONTEND_URL {:?} ({}), CORS restricted to no origins",
                frontend_url,
                e
            );
            CorsLayer::new()
        }
    }
}

/// GET /health - liveness probe
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "success": true,
        "message": "Server is running",
        "timestamp": chrono::Utc::now(),
    }))
}
