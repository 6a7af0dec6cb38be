pub mod error_tracking;

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Default)]
pub struct AppMetrics {
    request_count: AtomicU64,
    error_count: AtomicU64,
    latency_total_ms: AtomicU64,
    latency_count: AtomicU64,
}

impl AppMetrics {
    pub fn record_request(&self, status: u16, latency_ms: u64) {
        self.request_count.fetch_add(1, Ordering::Relaxed);
        if status >= 500 {
            self.error_count.fetch_add(1, Ordering::Relaxed);
        }
        self.latency_total_ms
            .fetch_add(latency_ms, Ordering::Relaxed);
        self.latency_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let count = self.request_count.load(Ordering::Relaxed).max(1);
        let avg_latency = self.latency_total_ms.load(Ordering::Relaxed) as f64 / count as f64;

        format!(
            concat!(
                "# TYPE http_requests_total counter\n",
                "http_requests_total {}\n",
                "# TYPE http_error_total counter\n",
                "http_error_total {}\n",
                "# TYPE http_latency_avg_ms gauge\n",
                "http_latency_avg_ms {:.2}\n",
            ),
            self.request_count.load(Ordering::Relaxed),
            self.error_count.load(Ordering::Relaxed),
            avg_latency,
        )
    }
}
