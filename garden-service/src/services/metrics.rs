use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use prometheus::{IntCounterVec, Opts, Registry};
use std::sync::{Once, OnceLock};

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
pub static PROMETHEUS_REGISTRY: OnceLock<Registry> = OnceLock::new();
pub static GARDEN_GENERATIONS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

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

    let generations_counter = IntCounterVec::new(
        Opts::new(
            "garden_generations_total",
            "Total chat generations by mode and outcome",
        ),
        &["mode", "outcome"],
    )
    .expect("Failed to create garden_generations_total metric");

    registry
        .register(Box::new(generations_counter.clone()))
        .expect("Failed to register garden_generations_total");

    PROMETHEUS_REGISTRY
        .set(registry)
        .expect("Failed to set prometheus registry");
    GARDEN_GENERATIONS_TOTAL
        .set(generations_counter)
        .expect("Failed to set garden_generations_total");
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

/// Record a chat generation.
pub fn record_generation(mode: &str, outcome: &str) {
    if let Some(counter) = GARDEN_GENERATIONS_TOTAL.get() {
        counter.with_label_values(&[mode, outcome]).inc();
    }
}
