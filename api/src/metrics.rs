use campus_validation::Issue;
use once_cell::sync::Lazy;
use prometheus::{opts, Encoder, HistogramOpts, HistogramVec, IntCounterVec, Registry, TextEncoder};

macro_rules! counter_vec {
    ($name:expr, $help:expr, $labels:expr) => {
        Lazy::new(|| IntCounterVec::new(opts!($name, $help), $labels).unwrap())
    };
}
macro_rules! histogram_vec {
    ($name:expr, $help:expr, $labels:expr) => {
        Lazy::new(|| {
            HistogramVec::new(HistogramOpts::new($name, $help).buckets(LATENCY_BUCKETS.to_vec()), $labels)
                .unwrap()
        })
    };
}

const LATENCY_BUCKETS: [f64; 10] = [0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 1.0];

// ── HTTP ────────────────────────────────────────────────────────────────────
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> =
    counter_vec!("http_requests_total", "Total HTTP requests", &["method", "path", "status"]);
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> =
    histogram_vec!("http_request_duration_seconds", "HTTP request latency", &["method", "path"]);

// ── Validation ──────────────────────────────────────────────────────────────
pub static VALIDATION_REQUESTS_TOTAL: Lazy<IntCounterVec> = counter_vec!(
    "validation_requests_total",
    "Requests checked against an endpoint schema",
    &["endpoint"]
);
pub static VALIDATION_FAILURES_TOTAL: Lazy<IntCounterVec> = counter_vec!(
    "validation_failures_total",
    "Requests rejected by an endpoint schema",
    &["endpoint"]
);
pub static VALIDATION_ISSUES_TOTAL: Lazy<IntCounterVec> =
    counter_vec!("validation_issues_total", "Reported issues by kind", &["kind"]);

pub fn register_all(r: &Registry) -> prometheus::Result<()> {
    r.register(Box::new(HTTP_REQUESTS_TOTAL.clone()))?;
    r.register(Box::new(HTTP_REQUEST_DURATION.clone()))?;
    r.register(Box::new(VALIDATION_REQUESTS_TOTAL.clone()))?;
    r.register(Box::new(VALIDATION_FAILURES_TOTAL.clone()))?;
    r.register(Box::new(VALIDATION_ISSUES_TOTAL.clone()))?;
    Ok(())
}

pub fn gather_metrics(r: &Registry) -> String {
    let encoder = TextEncoder::new();
    let families = r.gather();
    let mut buf = Vec::new();
    encoder.encode(&families, &mut buf).unwrap_or_default();
    String::from_utf8(buf).unwrap_or_default()
}

pub fn observe_http(method: &str, path: &str, status: u16, duration_secs: f64) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();
    HTTP_REQUEST_DURATION
        .with_label_values(&[method, path])
        .observe(duration_secs);
}

/// Counts one validation run and, when it failed, its issues by kind
pub fn observe_validation(endpoint: &str, issues: &[Issue]) {
    VALIDATION_REQUESTS_TOTAL.with_label_values(&[endpoint]).inc();
    if issues.is_empty() {
        return;
    }
    VALIDATION_FAILURES_TOTAL.with_label_values(&[endpoint]).inc();
    for issue in issues {
        VALIDATION_ISSUES_TOTAL
            .with_label_values(&[issue.kind.as_str()])
            .inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_validation::IssueKind;

    #[test]
    fn test_register_all_prefixes_names() {
        let registry = Registry::new_custom(Some("test".into()), None).unwrap();
        register_all(&registry).unwrap();
        observe_validation("metrics.test", &[]);
        observe_http("GET", "/health", 200, 0.002);

        for family in registry.gather() {
            assert!(
                family.get_name().starts_with("test_"),
                "metric {} missing prefix",
                family.get_name()
            );
        }
    }

    #[test]
    fn test_failures_counted_by_endpoint_and_kind() {
        let failures_before = VALIDATION_FAILURES_TOTAL
            .with_label_values(&["metrics.failing"])
            .get();
        let presence_before = VALIDATION_ISSUES_TOTAL
            .with_label_values(&["presence"])
            .get();

        observe_validation(
            "metrics.failing",
            &[
                Issue::presence("body.name", "name"),
                Issue::presence("body.email", "email"),
                Issue::new("body.phone", "Phone number must be exactly 10 digits", IssueKind::Constraint),
            ],
        );

        assert_eq!(
            VALIDATION_FAILURES_TOTAL
                .with_label_values(&["metrics.failing"])
                .get(),
            failures_before + 1
        );
        assert!(
            VALIDATION_ISSUES_TOTAL
                .with_label_values(&["presence"])
                .get()
                >= presence_before + 2
        );
    }

    #[test]
    fn test_gather_renders_text_format() {
        let registry = Registry::new();
        register_all(&registry).unwrap();
        observe_validation("metrics.render", &[]);
        let text = gather_metrics(&registry);
        assert!(text.contains("validation_requests_total"));
        assert!(text.contains("metrics.render"));
    }
}
