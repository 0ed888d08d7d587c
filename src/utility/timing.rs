// ============================================
// TIMING UTILITY - Refresh Cycle Measurement
// ============================================
// Usage:
//   1. Scoped: let _timer = Timer::start_with_threshold("cycle", 250);
//   2. Manual: let timer = Timer::silent("cycle"); ... let d = timer.stop();
//   3. Batch:  AggregateTimer::record(d) per cycle, then summary()
// ============================================

use colored::Colorize;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Timer for measuring execution time
pub struct Timer {
    name: String,
    start: Instant,
    threshold_ms: u128,
    silent: bool,
}

impl Timer {
    /// Only warns when execution exceeds threshold (in milliseconds)
    pub fn start_with_threshold(name: impl Into<String>, threshold_ms: u128) -> Self {
        Self {
            name: name.into(),
            start: Instant::now(),
            threshold_ms,
            silent: false,
        }
    }

    /// Never logs; read the duration from stop()
    pub fn silent(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: Instant::now(),
            threshold_ms: 0,
            silent: true,
        }
    }

    /// Stop the timer, log once, and hand back the duration
    pub fn stop(mut self) -> Duration {
        let duration = self.start.elapsed();
        self.log_duration(duration);
        self.silent = true;
        duration
    }

    fn log_duration(&self, duration: Duration) {
        if self.silent {
            return;
        }

        let ms = duration.as_millis();
        if self.threshold_ms > 0 && ms >= self.threshold_ms {
            warn!(timer = %self.name, elapsed_ms = ms, threshold_ms = self.threshold_ms, "Slow operation");
        } else {
            debug!(timer = %self.name, elapsed_ms = ms, "Timing");
        }
    }
}

// Auto-log on drop if not silent
impl Drop for Timer {
    fn drop(&mut self) {
        if !self.silent {
            let duration = self.start.elapsed();
            self.log_duration(duration);
        }
    }
}

// ============================================
// AGGREGATE TIMING FOR REPEATED CYCLES
// ============================================

/// Aggregate timer for tracking multiple operations
pub struct AggregateTimer {
    name: String,
    count: usize,
    total_duration: Duration,
    min_duration: Option<Duration>,
    max_duration: Option<Duration>,
}

impl AggregateTimer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            count: 0,
            total_duration: Duration::ZERO,
            min_duration: None,
            max_duration: None,
        }
    }

    /// Record a single operation duration
    pub fn record(&mut self, duration: Duration) {
        self.count += 1;
        self.total_duration += duration;
        self.min_duration = Some(self.min_duration.map_or(duration, |min| min.min(duration)));
        self.max_duration = Some(self.max_duration.map_or(duration, |max| max.max(duration)));
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn min_duration(&self) -> Option<Duration> {
        self.min_duration
    }

    pub fn max_duration(&self) -> Option<Duration> {
        self.max_duration
    }

    pub fn avg_duration(&self) -> Option<Duration> {
        if self.count == 0 {
            None
        } else {
            Some(self.total_duration / self.count as u32)
        }
    }

    /// Print summary statistics
    pub fn summary(&self) {
        if self.count == 0 {
            println!("📊 {} - No operations recorded", self.name.cyan());
            return;
        }

        println!("\n{}", "=".repeat(60).blue());
        println!("📊 {} - Summary", self.name.cyan().bold());
        println!("{}", "=".repeat(60).blue());
        println!("  • Count: {}", self.count);
        println!("  • Total: {:.2}s", self.total_duration.as_secs_f64());

        if let Some(avg) = self.avg_duration() {
            println!("  • Average: {}ms", avg.as_millis());
        }
        if let Some(min) = self.min_duration {
            println!("  • Min: {}ms", min.as_millis());
        }
        if let Some(max) = self.max_duration {
            println!("  • Max: {}ms", max.as_millis());
        }

        println!("{}", "=".repeat(60).blue());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_timer_stats() {
        let mut agg = AggregateTimer::new("cycles");
        assert_eq!(agg.avg_duration(), None);

        agg.record(Duration::from_millis(10));
        agg.record(Duration::from_millis(30));

        assert_eq!(agg.count(), 2);
        assert_eq!(agg.avg_duration(), Some(Duration::from_millis(20)));
        assert_eq!(agg.min_duration(), Some(Duration::from_millis(10)));
        assert_eq!(agg.max_duration(), Some(Duration::from_millis(30)));
    }

    #[test]
    fn test_silent_timer_stop_returns_duration() {
        let timer = Timer::silent("noop");
        let elapsed = timer.stop();
        assert!(elapsed < Duration::from_secs(5));
    }
}
