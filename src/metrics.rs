// Performance metrics module
//
// Provides lightweight counters for the generator, the copy action and the UI bridge

use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

static GLOBAL: LazyLock<Metrics> = LazyLock::new(Metrics::new);

/// Process-wide metrics instance.
pub fn global() -> &'static Metrics {
    &GLOBAL
}

/// Application metrics
///
/// Uses atomic operations for thread-safe tracking without locks. The summary
/// is logged on shutdown.
#[derive(Debug)]
pub struct Metrics {
    /// Number of passwords generated
    pub passwords_generated: AtomicU64,

    /// Number of successful clipboard copies
    pub copies: AtomicU64,

    /// Number of clipboard writes that failed
    pub clipboard_failures: AtomicU64,

    /// Number of state broadcasts delivered to at least one subscriber
    pub state_broadcasts: AtomicU64,

    /// Number of UI updates queued
    pub ui_updates: AtomicU64,

    /// Number of UI updates dropped because the channel was full
    pub ui_update_channel_full: AtomicU64,

    start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            passwords_generated: AtomicU64::new(0),
            copies: AtomicU64::new(0),
            clipboard_failures: AtomicU64::new(0),
            state_broadcasts: AtomicU64::new(0),
            ui_updates: AtomicU64::new(0),
            ui_update_channel_full: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_password_generated(&self) {
        self.passwords_generated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_copy(&self) {
        self.copies.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_clipboard_failure(&self) {
        self.clipboard_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_state_broadcast(&self) {
        self.state_broadcasts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_ui_update(&self) {
        self.ui_updates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_ui_channel_full(&self) {
        self.ui_update_channel_full.fetch_add(1, Ordering::Relaxed);
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Fraction of copy attempts that failed, in `[0, 1]`
    pub fn clipboard_failure_rate(&self) -> f64 {
        let failures = self.clipboard_failures.load(Ordering::Relaxed);
        let attempts = failures + self.copies.load(Ordering::Relaxed);
        if attempts > 0 {
            failures as f64 / attempts as f64
        } else {
            0.0
        }
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        tracing::info!("=== Metrics Summary ===");
        tracing::info!("Uptime: {:.2}s", self.uptime().as_secs_f64());
        tracing::info!(
            "Passwords generated: {}",
            self.passwords_generated.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Copies: {}, clipboard failures: {} ({:.0}%)",
            self.copies.load(Ordering::Relaxed),
            self.clipboard_failures.load(Ordering::Relaxed),
            self.clipboard_failure_rate() * 100.0
        );
        tracing::info!(
            "State broadcasts: {}, UI updates: {}, channel full drops: {}",
            self.state_broadcasts.load(Ordering::Relaxed),
            self.ui_updates.load(Ordering::Relaxed),
            self.ui_update_channel_full.load(Ordering::Relaxed)
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new();
        assert_eq!(metrics.passwords_generated.load(Ordering::Relaxed), 0);
        assert_eq!(metrics.copies.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_record_copy_outcomes() {
        let metrics = Metrics::new();

        metrics.record_copy();
        metrics.record_copy();
        metrics.record_copy();
        metrics.record_clipboard_failure();

        assert_eq!(metrics.copies.load(Ordering::Relaxed), 3);
        assert_eq!(metrics.clipboard_failures.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.clipboard_failure_rate(), 0.25);
    }

    #[test]
    fn test_failure_rate_without_copies() {
        let metrics = Metrics::new();
        assert_eq!(metrics.clipboard_failure_rate(), 0.0);
    }

    #[test]
    fn test_uptime() {
        let metrics = Metrics::new();
        thread::sleep(Duration::from_millis(10));
        assert!(metrics.uptime().as_millis() >= 10);
    }

    #[test]
    fn test_state_and_ui_counters() {
        let metrics = Metrics::new();

        metrics.record_password_generated();
        metrics.record_state_broadcast();
        metrics.record_ui_update();
        metrics.record_ui_channel_full();

        assert_eq!(metrics.passwords_generated.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.state_broadcasts.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.ui_updates.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.ui_update_channel_full.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_global_is_shared() {
        let before = global().passwords_generated.load(Ordering::Relaxed);
        global().record_password_generated();
        assert!(global().passwords_generated.load(Ordering::Relaxed) > before);
    }
}
