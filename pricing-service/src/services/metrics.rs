use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use prometheus::{IntCounterVec, Opts, Registry};
use std::sync::{Once, OnceLock};

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
pub static PROMETHEUS_REGISTRY: OnceLock<Registry> = OnceLock::new();
pub static PRICE_LOOKUPS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

static INIT: Once = Once::new();

/// Install the Prometheus recorder and register custom counters.
///
/// Safe to call more than once; only the first call installs anything.
pub fn init_metrics() {
    INIT.call_once(install);
}

fn install() {
    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    if METRICS_HANDLE.set(handle).is_err() {
        panic!("failed to set metrics handle: already initialized");
    }

    let registry = Registry::new();

    let lookups_counter = IntCounterVec::new(
        Opts::new(
            "price_lookups_total",
            "Total marketplace search calls by marketplace and outcome",
        ),
        &["marketplace", "outcome"],
    )
    .expect("Failed to create price_lookups_total metric");

    registry
        .register(Box::new(lookups_counter.clone()))
        .expect("Failed to register price_lookups_total");

    PROMETHEUS_REGISTRY
        .set(registry)
        .expect("Failed to set prometheus registry");
    PRICE_LOOKUPS_TOTAL
        .set(lookups_counter)
        .expect("Failed to set price_lookups_total");
}

pub fn get_metrics() -> String {
    let mut output = METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string());

    if let Some(registry) = PROMETHEUS_REGISTRY.get() {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let metric_families = registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer).ok();
        if let Ok(custom_metrics) = String::from_utf8(buffer) {
            output.push_str(&custom_metrics);
        }
    }

    output
}

/// Record a marketplace search call.
pub fn record_lookup(marketplace: &str, outcome: &str) {
    if let Some(counter) = PRICE_LOOKUPS_TOTAL.get() {
        counter.with_label_values(&[marketplace, outcome]).inc();
    }
}
