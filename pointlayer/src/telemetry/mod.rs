//! Composition telemetry for observability and user feedback.
//!
//! Tracks how much work the tile pipeline did: tiles requested and loaded,
//! points returned, cumulative fetch time. Counters are lock-free atomics
//! so the concurrent per-tile fetches can record without coordination; a
//! [`TelemetrySnapshot`] is a point-in-time copy for display.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use pointlayer::telemetry::CompositionMetrics;
//!
//! let metrics = CompositionMetrics::new();
//! metrics.tile_requested();
//! metrics.tile_loaded(42, Duration::from_millis(20));
//!
//! let snapshot = metrics.snapshot();
//! assert_eq!(snapshot.tiles_loaded, 1);
//! assert_eq!(snapshot.points_returned, 42);
//! ```

mod metrics;
mod snapshot;

pub use metrics::CompositionMetrics;
pub use snapshot::TelemetrySnapshot;
