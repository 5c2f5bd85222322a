//! Prometheus metrics (lock-free atomics, zero allocation on hot path).

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use crate::error::PublishError;

pub static METRICS: Metrics = Metrics::new();

pub struct Metrics {
    // --- Submissions ---
    pub submissions_total: AtomicU64,
    pub submissions_succeeded: AtomicU64,
    pub submissions_failed: AtomicU64,

    // --- Failures by step ---
    pub failed_initialization: AtomicU64,
    pub failed_upload: AtomicU64,
    pub failed_protocol: AtomicU64,
    pub failed_signature: AtomicU64,
    pub failed_broadcast: AtomicU64,

    // --- Latency (μs, updated via CAS) ---
    pub pipeline_duration_us_sum: AtomicU64,
    pub pipeline_duration_us_max: AtomicU64,
}

impl Metrics {
    const fn new() -> Self {
        Self {
            submissions_total: AtomicU64::new(0),
            submissions_succeeded: AtomicU64::new(0),
            submissions_failed: AtomicU64::new(0),
            failed_initialization: AtomicU64::new(0),
            failed_upload: AtomicU64::new(0),
            failed_protocol: AtomicU64::new(0),
            failed_signature: AtomicU64::new(0),
            failed_broadcast: AtomicU64::new(0),
            pipeline_duration_us_sum: AtomicU64::new(0),
            pipeline_duration_us_max: AtomicU64::new(0),
        }
    }

    /// Count a failure under the step that produced it.
    pub fn record_failure(&self, error: &PublishError) {
        self.submissions_failed.fetch_add(1, Ordering::Relaxed);
        let counter = match error {
            PublishError::Initialization(_) => &self.failed_initialization,
            PublishError::Upload { .. } => &self.failed_upload,
            PublishError::Protocol(_) => &self.failed_protocol,
            PublishError::Signature(_) => &self.failed_signature,
            PublishError::Broadcast { .. } => &self.failed_broadcast,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_pipeline_duration(&self, start: Instant) {
        let us = start.elapsed().as_micros() as u64;
        self.pipeline_duration_us_sum.fetch_add(us, Ordering::Relaxed);
        // CAS loop for max tracking
        let mut cur = self.pipeline_duration_us_max.load(Ordering::Relaxed);
        while us > cur {
            match self.pipeline_duration_us_max.compare_exchange_weak(
                cur,
                us,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(actual) => cur = actual,
            }
        }
    }

    /// Render in Prometheus text exposition format.
    pub fn render(&self, busy: bool) -> String {
        let total = self.submissions_total.load(Ordering::Relaxed);
        let succeeded = self.submissions_succeeded.load(Ordering::Relaxed);
        let failed = self.submissions_failed.load(Ordering::Relaxed);
        let f_init = self.failed_initialization.load(Ordering::Relaxed);
        let f_upload = self.failed_upload.load(Ordering::Relaxed);
        let f_protocol = self.failed_protocol.load(Ordering::Relaxed);
        let f_signature = self.failed_signature.load(Ordering::Relaxed);
        let f_broadcast = self.failed_broadcast.load(Ordering::Relaxed);
        let dur_sum = self.pipeline_duration_us_sum.load(Ordering::Relaxed);
        let dur_max = self.pipeline_duration_us_max.swap(0, Ordering::Relaxed);
        let busy = u8::from(busy);

        // Convert μs to seconds for Prometheus conventions
        let dur_sum_s = dur_sum as f64 / 1_000_000.0;
        let dur_max_s = dur_max as f64 / 1_000_000.0;

        format!(
            "\
# HELP publisher_submissions_total Submissions started.\n\
# TYPE publisher_submissions_total counter\n\
publisher_submissions_total {total}\n\
# HELP publisher_submissions_succeeded_total Submissions relayed successfully.\n\
# TYPE publisher_submissions_succeeded_total counter\n\
publisher_submissions_succeeded_total {succeeded}\n\
# HELP publisher_submissions_failed_total Submissions that failed at any step.\n\
# TYPE publisher_submissions_failed_total counter\n\
publisher_submissions_failed_total {failed}\n\
# HELP publisher_step_failures_total Failures by pipeline step.\n\
# TYPE publisher_step_failures_total counter\n\
publisher_step_failures_total{{step=\"initialization\"}} {f_init}\n\
publisher_step_failures_total{{step=\"upload\"}} {f_upload}\n\
publisher_step_failures_total{{step=\"protocol\"}} {f_protocol}\n\
publisher_step_failures_total{{step=\"signature\"}} {f_signature}\n\
publisher_step_failures_total{{step=\"broadcast\"}} {f_broadcast}\n\
# HELP publisher_pipeline_duration_seconds_sum Total pipeline time (seconds).\n\
# TYPE publisher_pipeline_duration_seconds_sum counter\n\
publisher_pipeline_duration_seconds_sum {dur_sum_s:.6}\n\
# HELP publisher_pipeline_duration_seconds_max Max pipeline time since last scrape (seconds).\n\
# TYPE publisher_pipeline_duration_seconds_max gauge\n\
publisher_pipeline_duration_seconds_max {dur_max_s:.6}\n\
# HELP publisher_busy Whether a submission is in flight.\n\
# TYPE publisher_busy gauge\n\
publisher_busy {busy}\n"
        )
    }
}
