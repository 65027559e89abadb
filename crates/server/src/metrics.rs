//! Prometheus metrics

use axum::http::StatusCode;
use axum::response::IntoResponse;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

use bangla_dict_core::RecordSource;

static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the global Prometheus recorder
///
/// Safe to call more than once; later calls return the first handle.
/// Returns `None` when another recorder is already installed.
pub fn init_metrics() -> Option<PrometheusHandle> {
    HANDLE
        .get_or_try_init(|| PrometheusBuilder::new().install_recorder())
        .map_err(|e| tracing::warn!(error = %e, "Failed to install Prometheus recorder"))
        .ok()
        .cloned()
}

pub fn record_request(route: String, status: u16) {
    metrics::counter!(
        "dictionary_http_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
}

pub fn record_translation(source: RecordSource, latency_ms: f64) {
    metrics::counter!("dictionary_translations_total", "source" => source.as_str()).increment(1);
    metrics::histogram!("dictionary_translation_latency_ms", "source" => source.as_str())
        .record(latency_ms);
}

/// `GET /metrics`
pub async fn metrics_handler() -> impl IntoResponse {
    match HANDLE.get() {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            "metrics recorder not installed".to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_request("/api/".to_string(), 200);
        record_translation(RecordSource::Offline, 1.5);
    }
}
