//! API 模块
//!
//! 提供 REST API 支持。

pub mod app_state;
pub mod dto;
pub mod handlers;
pub mod routes;

use crate::api::app_state::AppState;
use crate::config::config::ServerConfig;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn create_router(app_state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .merge(routes::chatbot_routes::create_chatbot_router())
        .layer(DefaultBodyLimit::max(server.max_request_size))
        .layer(cors_layer(&server.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Build the CORS layer; `"*"` (or an empty list) allows any origin.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(allowed))
}
