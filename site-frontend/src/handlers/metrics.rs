use crate::services::metrics::get_metrics;

pub async fn metrics() -> String {
    get_metrics()
}
