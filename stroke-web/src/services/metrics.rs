use crate::services::assessment::RiskTier;
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};

/// Prometheus collectors owned by the application state. Each `Application`
/// gets its own registry, so several can coexist in one process (tests).
#[derive(Clone)]
pub struct AppMetrics {
    registry: Registry,
    pub http_requests_total: IntCounterVec,
    pub http_request_duration_seconds: HistogramVec,
    pub risk_assessments_total: IntCounterVec,
}

impl AppMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &["method", "path", "status"],
        )?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds",
            ),
            &["method", "path", "status"],
        )?;

        let risk_assessments_total = IntCounterVec::new(
            Opts::new("risk_assessments_total", "Risk scores computed, by tier"),
            &["tier"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(risk_assessments_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            risk_assessments_total,
        })
    }

    pub fn record_assessment(&self, tier: RiskTier) {
        self.risk_assessments_total
            .with_label_values(&[tier.label()])
            .inc();
    }

    /// Text exposition of every registered collector.
    pub fn render(&self) -> Result<String, anyhow::Error> {
        let mut buffer = Vec::new();
        let encoder = TextEncoder::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_assessments_by_tier() {
        let metrics = AppMetrics::new().unwrap();
        metrics.record_assessment(RiskTier::High);
        metrics.record_assessment(RiskTier::High);

        let text = metrics.render().unwrap();
        assert!(text.contains("risk_assessments_total{tier=\"High\"} 2"));
    }
}
