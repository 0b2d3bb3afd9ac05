//! Point-in-time telemetry view.

use std::fmt;

use serde::Serialize;

/// A copy of the composition counters at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TelemetrySnapshot {
    /// Tile fetches issued.
    pub tiles_requested: u64,
    /// Tile fetches completed.
    pub tiles_loaded: u64,
    /// Total points returned across all fetches.
    pub points_returned: u64,
    /// Cumulative fetch wall time in microseconds.
    pub fetch_micros: u64,
}

impl TelemetrySnapshot {
    /// Average fetch duration in milliseconds, or 0 when nothing loaded.
    pub fn avg_fetch_ms(&self) -> f64 {
        if self.tiles_loaded == 0 {
            return 0.0;
        }
        self.fetch_micros as f64 / self.tiles_loaded as f64 / 1_000.0
    }
}

impl fmt::Display for TelemetrySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} tiles loaded, {} points, avg fetch {:.1}ms",
            self.tiles_loaded,
            self.tiles_requested,
            self.points_returned,
            self.avg_fetch_ms()
        )
    }
}
