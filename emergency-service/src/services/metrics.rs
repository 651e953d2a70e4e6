use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the process-wide Prometheus recorder. Call once from `main`.
pub fn init_metrics() -> Result<(), anyhow::Error> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("failed to install Prometheus recorder: {}", e))?;

    METRICS_HANDLE
        .set(handle)
        .map_err(|_| anyhow::anyhow!("metrics handle already initialized"))
}

pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

pub fn record_registration() {
    counter!("emergency_registrations_total").increment(1);
}

pub fn record_code_generated() {
    counter!("emergency_codes_generated_total").increment(1);
}

/// `outcome` is one of `success`, `expired`, `invalid`, `user_not_found`.
pub fn record_redemption(outcome: &'static str) {
    counter!("emergency_redemptions_total", "outcome" => outcome).increment(1);
}
