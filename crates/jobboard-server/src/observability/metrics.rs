//! Prometheus metrics for jobboard-server

use std::sync::OnceLock;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::Result;
use crate::error::Error;

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
static START_TIME: OnceLock<Instant> = OnceLock::new();

const METRIC_UPTIME: &str = "jobboard_uptime_seconds";
const METRIC_INFO: &str = "jobboard_info";
const METRIC_REQUESTS: &str = "jobboard_requests_total";
const METRIC_AUTH: &str = "jobboard_auth_outcomes_total";
const METRIC_LOGINS: &str = "jobboard_logins_total";
const METRIC_JOBS_CREATED: &str = "jobboard_jobs_created_total";

/// Initialize Prometheus metrics recorder.
pub fn init_metrics() -> Result<()> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| Error::Config(format!("Failed to install metrics recorder: {e}")))?;

    PROMETHEUS_HANDLE.set(handle).ok();
    START_TIME.set(Instant::now()).ok();

    register_metrics();
    tracing::info!("Prometheus metrics initialized");
    Ok(())
}

fn register_metrics() {
    describe_gauge!(METRIC_UPTIME, "Server uptime in seconds");
    describe_gauge!(METRIC_INFO, "Server information (always 1)");
    describe_counter!(METRIC_REQUESTS, "Total HTTP requests by endpoint");
    describe_counter!(
        METRIC_AUTH,
        "Identity resolution outcomes (authenticated, anonymous, rejected)"
    );
    describe_counter!(METRIC_LOGINS, "Login attempts by result");
    describe_counter!(METRIC_JOBS_CREATED, "Jobs created through createJob");

    gauge!(
        METRIC_INFO,
        "version" => env!("CARGO_PKG_VERSION"),
    )
    .set(1.0);
}

/// Render metrics in Prometheus text format.
#[must_use]
pub fn render_metrics() -> String {
    if let Some(start) = START_TIME.get() {
        gauge!(METRIC_UPTIME).set(start.elapsed().as_secs_f64());
    }

    PROMETHEUS_HANDLE
        .get()
        .map(PrometheusHandle::render)
        .unwrap_or_default()
}

/// Record a request to `endpoint`.
pub fn record_request(endpoint: &str) {
    counter!(METRIC_REQUESTS, "endpoint" => endpoint.to_owned()).increment(1);
}

/// Record the outcome of identity resolution for one request.
pub fn record_auth_outcome(outcome: &str) {
    counter!(METRIC_AUTH, "outcome" => outcome.to_owned()).increment(1);
}

/// Record a login attempt.
pub fn record_login(success: bool) {
    let result = if success { "success" } else { "failure" };
    counter!(METRIC_LOGINS, "result" => result.to_owned()).increment(1);
}

/// Record a job created by an authenticated user.
pub fn record_job_created() {
    counter!(METRIC_JOBS_CREATED).increment(1);
}
