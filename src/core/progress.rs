use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use serde::Serialize;

/// Point-in-time view of one transfer. Recomputed per chunk, never
/// persisted. `speed_bytes_per_sec` and `eta_seconds` are `None` rather
/// than infinite or NaN when they cannot be derived yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSnapshot {
    pub bytes_done: u64,
    pub total_bytes: Option<u64>,
    pub elapsed_seconds: f64,
    pub speed_bytes_per_sec: Option<f64>,
    pub eta_seconds: Option<f64>,
}

/// Byte accounting for a single job. The owning worker calls
/// [`ProgressTracker::on_chunk`]; any thread may take a snapshot
/// concurrently, the counter is atomic and the clock is read at snapshot
/// time.
#[derive(Debug)]
pub struct ProgressTracker {
    started: Instant,
    total_bytes: Option<u64>,
    bytes_done: AtomicU64,
}

impl ProgressTracker {
    pub fn new(total_bytes: Option<u64>) -> Self {
        Self {
            started: Instant::now(),
            total_bytes,
            bytes_done: AtomicU64::new(0),
        }
    }

    pub fn on_chunk(&self, len: u64) {
        self.bytes_done.fetch_add(len, Ordering::Relaxed);
    }

    pub fn bytes_done(&self) -> u64 {
        self.bytes_done.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        self.snapshot_at(self.started.elapsed())
    }

    fn snapshot_at(&self, elapsed: Duration) -> ProgressSnapshot {
        let bytes_done = self.bytes_done();
        let elapsed_seconds = elapsed.as_secs_f64();

        let speed_bytes_per_sec = if elapsed_seconds > 0.0 {
            Some(bytes_done as f64 / elapsed_seconds)
        } else {
            None
        };

        let eta_seconds = match (speed_bytes_per_sec, self.total_bytes) {
            (Some(speed), Some(total)) if speed > 0.0 => {
                Some(total.saturating_sub(bytes_done) as f64 / speed)
            }
            _ => None,
        };

        ProgressSnapshot {
            bytes_done,
            total_bytes: self.total_bytes,
            elapsed_seconds,
            speed_bytes_per_sec,
            eta_seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_chunks() {
        let tracker = ProgressTracker::new(Some(100));
        tracker.on_chunk(30);
        tracker.on_chunk(20);
        tracker.on_chunk(10);
        assert_eq!(tracker.bytes_done(), 60);
    }

    #[test]
    fn throughput_and_eta_from_elapsed() {
        let tracker = ProgressTracker::new(Some(1_000));
        tracker.on_chunk(250);
        let snap = tracker.snapshot_at(Duration::from_secs(2));
        assert_eq!(snap.bytes_done, 250);
        assert_eq!(snap.speed_bytes_per_sec, Some(125.0));
        assert_eq!(snap.eta_seconds, Some(6.0));
    }

    #[test]
    fn zero_elapsed_means_unknown_not_nan() {
        let tracker = ProgressTracker::new(Some(1_000));
        tracker.on_chunk(10);
        let snap = tracker.snapshot_at(Duration::ZERO);
        assert!(snap.speed_bytes_per_sec.is_none());
        assert!(snap.eta_seconds.is_none());
    }

    #[test]
    fn zero_bytes_means_no_eta() {
        let tracker = ProgressTracker::new(Some(1_000));
        let snap = tracker.snapshot_at(Duration::from_secs(5));
        // speed is a well-defined zero; the division for ETA is not done
        assert_eq!(snap.speed_bytes_per_sec, Some(0.0));
        assert!(snap.eta_seconds.is_none());
    }

    #[test]
    fn unknown_total_means_no_eta() {
        let tracker = ProgressTracker::new(None);
        tracker.on_chunk(500);
        let snap = tracker.snapshot_at(Duration::from_secs(1));
        assert_eq!(snap.speed_bytes_per_sec, Some(500.0));
        assert!(snap.total_bytes.is_none());
        assert!(snap.eta_seconds.is_none());
    }

    #[test]
    fn overshoot_clamps_remaining_to_zero() {
        let tracker = ProgressTracker::new(Some(100));
        tracker.on_chunk(150);
        let snap = tracker.snapshot_at(Duration::from_secs(1));
        assert_eq!(snap.eta_seconds, Some(0.0));
    }

    #[test]
    fn snapshot_is_a_pure_read() {
        let tracker = ProgressTracker::new(Some(100));
        tracker.on_chunk(40);
        let a = tracker.snapshot_at(Duration::from_secs(1));
        let b = tracker.snapshot_at(Duration::from_secs(1));
        assert_eq!(a, b);
        assert_eq!(tracker.bytes_done(), 40);
    }
}
