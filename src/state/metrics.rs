use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry};

pub struct Metrics {
    registry: Registry,

    // Request metrics
    pub requests_total: IntCounter,
    pub requests_failed: IntCounter,
    pub responses_by_status: IntCounterVec,

    // Upstream metrics
    pub upstream_errors_total: IntCounter,
    pub upstream_duration: Histogram,
}

impl Metrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let requests_total = IntCounter::new(
            "paraph_proxy_requests_total",
            "Total number of paraphrase requests",
        )?;
        let requests_failed = IntCounter::new(
            "paraph_proxy_requests_failed",
            "Total number of paraphrase requests answered with an error",
        )?;
        let responses_by_status = IntCounterVec::new(
            Opts::new(
                "paraph_proxy_responses_total",
                "Paraphrase responses by HTTP status",
            ),
            &["status"],
        )?;

        let upstream_errors_total = IntCounter::new(
            "paraph_proxy_upstream_errors_total",
            "Upstream calls that failed or returned a non-success status",
        )?;
        let upstream_duration = Histogram::with_opts(HistogramOpts::new(
            "paraph_proxy_upstream_duration_seconds",
            "Upstream call duration in seconds",
        ))?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(requests_failed.clone()))?;
        registry.register(Box::new(responses_by_status.clone()))?;
        registry.register(Box::new(upstream_errors_total.clone()))?;
        registry.register(Box::new(upstream_duration.clone()))?;

        Ok(Self {
            registry,
            requests_total,
            requests_failed,
            responses_by_status,
            upstream_errors_total,
            upstream_duration,
        })
    }

    /// Records the final status of a paraphrase request.
    pub fn record_response(&self, status: u16) {
        let label = status.to_string();
        self.responses_by_status
            .with_label_values(&[label.as_str()])
            .inc();
        if !(200..300).contains(&status) {
            self.requests_failed.inc();
        }
    }

    pub fn gather_metrics(&self) -> Vec<prometheus::proto::MetricFamily> {
        self.registry.gather()
    }

    /// Renders all metrics in the prometheus text exposition format.
    pub fn render(&self) -> prometheus::Result<String> {
        let encoder = prometheus::TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.gather_metrics(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
