//! Prometheus metrics for the check-in API.
//!
//! HTTP request counts are recorded in middleware, check-in outcomes by the
//! confirmation handler. Both are exposed on `/metrics`.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Clone)]
pub struct ApiMetrics {
    inner: Arc<Inner>,
}

struct Inner {
    registry: Registry,
    http_requests_total: IntCounterVec,
    checkins_total: IntCounterVec,
}

impl ApiMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("labsky_http_requests_total", "Total HTTP requests"),
            &["method", "status"],
        )?;
        let checkins_total = IntCounterVec::new(
            Opts::new("labsky_checkins_total", "Check-in attempts by outcome"),
            &["outcome"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(checkins_total.clone()))?;

        Ok(Self {
            inner: Arc::new(Inner {
                registry,
                http_requests_total,
                checkins_total,
            }),
        })
    }

    pub fn record_request(&self, method: &str, status: u16) {
        let status = status.to_string();
        self.inner
            .http_requests_total
            .with_label_values(&[method, status.as_str()])
            .inc();
    }

    /// `outcome` is `CONFIRMED` or an error code
    pub fn record_checkin(&self, outcome: &str) {
        self.inner.checkins_total.with_label_values(&[outcome]).inc();
    }

    pub fn checkins(&self, outcome: &str) -> u64 {
        self.inner.checkins_total.with_label_values(&[outcome]).get()
    }

    pub fn render(&self) -> Result<String, AppError> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&self.inner.registry.gather(), &mut buffer)
            .map_err(|e| AppError::InternalServerError(format!("metrics encoding failed: {e}")))?;
        String::from_utf8(buffer)
            .map_err(|e| AppError::InternalServerError(format!("metrics are not utf-8: {e}")))
    }
}

pub async fn track_requests(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let response = next.run(req).await;
    state.metrics.record_request(&method, response.status().as_u16());
    response
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, AppError> {
    state.metrics.render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_are_exported() {
        let metrics = ApiMetrics::new().unwrap();
        metrics.record_request("GET", 200);
        metrics.record_checkin("CONFIRMED");
        metrics.record_checkin("CONFIRMED");
        metrics.record_checkin("SEAT_OCCUPIED");

        assert_eq!(metrics.checkins("CONFIRMED"), 2);

        let text = metrics.render().unwrap();
        assert!(text.contains("labsky_http_requests_total{method=\"GET\",status=\"200\"} 1"));
        assert!(text.contains("labsky_checkins_total{outcome=\"SEAT_OCCUPIED\"} 1"));
    }
}
