//! Latency statistics over per-trial samples.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatencyStats {
    pub count: usize,
    pub ops_per_sec: f64,
    pub mean: Duration,
    pub p50: Duration,
    pub p95: Duration,
    pub p99: Duration,
    pub min: Duration,
    pub max: Duration,
}

impl LatencyStats {
    /// Summarize `samples`. Throughput is computed against `wall_elapsed` when
    /// given, otherwise against the sum of the samples.
    ///
    /// Returns `None` for an empty sample set.
    pub fn from_samples(samples: &[Duration], wall_elapsed: Option<Duration>) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let mut sorted = samples.to_vec();
        sorted.sort_unstable();
        let len = sorted.len();
        let sum: Duration = sorted.iter().sum();
        let elapsed = wall_elapsed.unwrap_or(sum);
        let ops_per_sec = if elapsed.is_zero() {
            0.0
        } else {
            len as f64 / elapsed.as_secs_f64()
        };

        Some(Self {
            count: len,
            ops_per_sec,
            mean: Duration::from_nanos((sum.as_nanos() / len as u128) as u64),
            p50: sorted[len * 50 / 100],
            p95: sorted[(len * 95 / 100).min(len - 1)],
            p99: sorted[(len * 99 / 100).min(len - 1)],
            min: sorted[0],
            max: sorted[len - 1],
        })
    }
}

/// Records per second; zero when nothing measurable elapsed.
pub fn throughput(records: usize, elapsed: Duration) -> f64 {
    if elapsed.is_zero() {
        return 0.0;
    }
    records as f64 / elapsed.as_secs_f64()
}

pub fn duration_ms(d: Duration) -> f64 {
    d.as_nanos() as f64 / 1_000_000.0
}
