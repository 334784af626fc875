use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Analyze,
    Generate,
}

/// Process-local request counters; reset on restart.
pub struct Metrics {
    // Counters
    total_requests: AtomicUsize,
    successful_requests: AtomicUsize,
    failed_requests: AtomicUsize,
    analyze_requests: AtomicUsize,
    generate_requests: AtomicUsize,

    // Timing (in microseconds)
    total_model_time_us: AtomicU64,

    total_suggestions: AtomicUsize,
}

impl Metrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            total_requests: AtomicUsize::new(0),
            successful_requests: AtomicUsize::new(0),
            failed_requests: AtomicUsize::new(0),
            analyze_requests: AtomicUsize::new(0),
            generate_requests: AtomicUsize::new(0),
            total_model_time_us: AtomicU64::new(0),
            total_suggestions: AtomicUsize::new(0),
        })
    }

    pub fn record_request(&self, endpoint: Endpoint, duration: Duration, success: bool) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        if success {
            self.successful_requests.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed_requests.fetch_add(1, Ordering::Relaxed);
        }

        let per_endpoint = match endpoint {
            Endpoint::Analyze => &self.analyze_requests,
            Endpoint::Generate => &self.generate_requests,
        };
        per_endpoint.fetch_add(1, Ordering::Relaxed);

        self.total_model_time_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn record_suggestions(&self, count: usize) {
        self.total_suggestions.fetch_add(count, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let total_requests = self.total_requests.load(Ordering::Relaxed);
        let total_us = self.total_model_time_us.load(Ordering::Relaxed) as f64;

        MetricsSnapshot {
            total_requests,
            successful_requests: self.successful_requests.load(Ordering::Relaxed),
            failed_requests: self.failed_requests.load(Ordering::Relaxed),
            analyze_requests: self.analyze_requests.load(Ordering::Relaxed),
            generate_requests: self.generate_requests.load(Ordering::Relaxed),
            avg_model_time_ms: if total_requests > 0 {
                total_us / total_requests as f64 / 1000.0 // Convert to ms
            } else {
                0.0
            },
            total_suggestions: self.total_suggestions.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub total_requests: usize,
    pub successful_requests: usize,
    pub failed_requests: usize,
    pub analyze_requests: usize,
    pub generate_requests: usize,
    pub avg_model_time_ms: f64,
    pub total_suggestions: usize,
}

pub struct TimedOperation {
    start: Instant,
}

impl TimedOperation {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
