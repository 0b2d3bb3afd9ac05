//! Atomic counters for the composition pipeline.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use super::TelemetrySnapshot;

/// Lock-free counters recorded by the composite layer.
///
/// Shared behind an `Arc` between the layer and whoever reports progress.
/// All methods are safe to call from concurrent tile fetches.
#[derive(Debug, Default)]
pub struct CompositionMetrics {
    tiles_requested: AtomicU64,
    tiles_loaded: AtomicU64,
    points_returned: AtomicU64,
    fetch_micros: AtomicU64,
}

impl CompositionMetrics {
    /// Create a fresh set of counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a tile fetch was issued.
    pub fn tile_requested(&self) {
        self.tiles_requested.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a completed tile fetch.
    ///
    /// # Arguments
    ///
    /// * `points` - Number of points the fetch returned
    /// * `elapsed` - Wall time the fetch took, including the simulated delay
    pub fn tile_loaded(&self, points: usize, elapsed: Duration) {
        self.tiles_loaded.fetch_add(1, Ordering::Relaxed);
        self.points_returned
            .fetch_add(points as u64, Ordering::Relaxed);
        self.fetch_micros
            .fetch_add(elapsed.as_micros() as u64, Ordering::Relaxed);
    }

    /// Take a point-in-time copy of all counters.
    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot {
            tiles_requested: self.tiles_requested.load(Ordering::Relaxed),
            tiles_loaded: self.tiles_loaded.load(Ordering::Relaxed),
            points_returned: self.points_returned.load(Ordering::Relaxed),
            fetch_micros: self.fetch_micros.load(Ordering::Relaxed),
        }
    }
}
