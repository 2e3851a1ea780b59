//! Prometheus metrics
//!
//! Counters:
//! - `yoga_agent_requests_total{endpoint}`
//! - `yoga_agent_errors_total{kind}`
//! - `yoga_agent_classifications_total{language,emotion}`

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use yoga_agent_core::{Emotion, Language};

static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the global Prometheus recorder.
///
/// Only the first call installs; later calls return the same handle.
pub fn init_metrics() -> Option<PrometheusHandle> {
    if let Some(handle) = HANDLE.get() {
        return Some(handle.clone());
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(HANDLE.get_or_init(|| handle).clone()),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to install Prometheus recorder");
            None
        }
    }
}

pub fn record_request(endpoint: &'static str) {
    metrics::counter!("yoga_agent_requests_total", "endpoint" => endpoint).increment(1);
}

pub fn record_error(kind: &'static str) {
    metrics::counter!("yoga_agent_errors_total", "kind" => kind).increment(1);
}

pub fn record_classification(language: Language, emotion: Emotion) {
    metrics::counter!(
        "yoga_agent_classifications_total",
        "language" => language.as_str(),
        "emotion" => emotion.as_str()
    )
    .increment(1);
}

/// `GET /metrics`
pub async fn metrics_handler() -> impl IntoResponse {
    match HANDLE.get() {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        ),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            "metrics recorder not installed\n".to_string(),
        ),
    }
}
