//! HTTP Endpoints
//!
//! JSON API for the yoga mood agent.

use std::time::Duration;

use axum::{
    extract::State,
    http::{HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::chat::{analyze, chat_analyze, voice_chat};
use crate::metrics::metrics_handler;
use crate::practice::{complete_session, get_asana, start_session, update_session};
use crate::state::AppState;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let (cors_layer, timeout) = {
        let config = state.get_config();
        (
            build_cors_layer(&config.server.cors_origins, config.server.cors_enabled),
            Duration::from_secs(config.server.timeout_seconds),
        )
    };

    Router::new()
        // Conversation endpoints
        .route("/api/chat-analyze", post(chat_analyze))
        .route("/api/voice-chat", post(voice_chat))
        .route("/api/analyze-conversation", post(analyze))
        // Practice sessions
        .route("/api/session/start", post(start_session))
        .route("/api/session/:id/update", post(update_session))
        .route("/api/session/:id/complete", post(complete_session))
        .route("/api/asanas/:id", get(get_asana))
        // Diagnostics
        .route("/api/debug/database", get(debug_database))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        // Middleware
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors_layer)
        .with_state(state)
}

const DEFAULT_ORIGIN: &str = "http://localhost:3000";

/// Build CORS layer from configured origins
///
/// - If cors_enabled is false, returns a permissive layer
/// - If no configured origin is usable, defaults to localhost:3000
/// - Otherwise, uses the configured origins
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins");
        return CorsLayer::permissive();
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if parsed_origins.is_empty() {
        tracing::info!("No usable CORS origins configured, defaulting to {}", DEFAULT_ORIGIN);
        return layer.allow_origin(HeaderValue::from_static(DEFAULT_ORIGIN));
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    layer.allow_origin(parsed_origins)
}

/// Health check
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.persistence.ping().await;
    if let Err(e) = &store {
        tracing::warn!(error = %e, "Store health check failed");
    }

    let status = if store.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(serde_json::json!({
            "status": if store.is_ok() { "healthy" } else { "degraded" },
            "version": env!("CARGO_PKG_VERSION"),
            "checks": {
                "store": if store.is_ok() { "ok" } else { "error" },
                "conversations": state.conversations.count(),
            },
        })),
    )
}

/// Catalog and user counts
async fn debug_database(State(state): State<AppState>) -> impl IntoResponse {
    match database_summary(&state).await {
        Ok(summary) => (StatusCode::OK, Json(summary)),
        Err(e) => {
            crate::metrics::record_error("persistence");
            tracing::error!(error = %e, "Database summary failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": e.to_string(),
                    "database_status": "error",
                })),
            )
        }
    }
}

async fn database_summary(
    state: &AppState,
) -> Result<serde_json::Value, yoga_agent_persistence::PersistenceError> {
    let persistence = &state.persistence;
    let asanas = persistence.catalog.count_asanas().await?;
    let sequences = persistence.catalog.list_sequences().await?;
    let users = persistence.users.count().await?;

    let emotions: Vec<String> = sequences.iter().map(|s| s.emotion.clone()).collect();

    Ok(serde_json::json!({
        "asanas": asanas,
        "sequences": sequences.len(),
        "users": users,
        "available_emotions": emotions,
        "database_status": if sequences.is_empty() { "empty" } else { "initialized" },
    }))
}
