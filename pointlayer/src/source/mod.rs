//! Tile data source abstraction.
//!
//! The composition pipeline never reads the dataset directly; it asks a
//! [`TileDataSource`] for the points belonging to a tile's bounding box at
//! a given zoom. This keeps the pipeline generic: the demo injects a
//! [`SampledPointSource`] over the synthetic dataset, but any backend that
//! can answer `(bounds, zoom) -> points` slots in behind the same trait.
//!
//! # Dyn Compatibility
//!
//! The trait uses `Pin<Box<dyn Future>>` for its async method so it can be
//! held as `Arc<dyn TileDataSource>` by the composite layer.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tracing::trace;

use crate::dataset::{Point, PointDataset};
use crate::geom::BoundingBox;

/// Boxed future type for dyn-compatible async methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Strategy interface for per-tile point retrieval.
///
/// Implementations must be `Send + Sync`; one source instance is shared
/// across all concurrent tile fetches of a composition pass. Fetching is
/// infallible: a source always produces a (possibly empty) point set.
pub trait TileDataSource: Send + Sync {
    /// Fetch the points visible in `bounds` at `zoom`.
    ///
    /// # Arguments
    ///
    /// * `bounds` - The tile's world-space bounding box
    /// * `zoom` - The integer tile zoom level (may be negative)
    fn fetch_tile(&self, bounds: BoundingBox, zoom: i32) -> BoxFuture<'_, Vec<Point>>;
}

/// Subsampling stride for a zoom level.
///
/// `stride = max(1, zoom² · factor)`. Zoom 0 therefore yields stride 1
/// (every in-box point), and deeper zoom-out (the demo runs zoom -7..0)
/// thins the set quadratically.
pub fn subsample_stride(zoom: i32, factor: u32) -> u64 {
    let squared = (zoom as i64).pow(2) as u64;
    (squared * factor as u64).max(1)
}

/// Tile data source over an in-memory point dataset.
///
/// Answers each fetch by scanning the full dataset and keeping the points
/// that lie strictly inside the bounding box and whose index is divisible
/// by the zoom-dependent stride. An artificial delay before the scan
/// simulates a remote backend; the two demo presets differ only in delay
/// and subsample factor.
///
/// There is no spatial index: every call is a linear scan. That is the
/// dataset's only performance characteristic and it is intentional.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use pointlayer::dataset::PointDataset;
/// use pointlayer::geom::BoundingBox;
/// use pointlayer::source::{SampledPointSource, TileDataSource};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let dataset = Arc::new(PointDataset::generate_seeded(1_000, 24_000.0, 7));
/// let source = SampledPointSource::new(dataset, 1);
///
/// let bounds = BoundingBox::new(0.0, 12_000.0, 0.0, 12_000.0);
/// let points = source.fetch_tile(bounds, 0).await;
/// assert!(points.iter().all(|p| bounds.contains(p.position)));
/// # });
/// ```
pub struct SampledPointSource {
    /// Shared read-only dataset; generated once at application start.
    dataset: Arc<PointDataset>,
    /// Simulated backend latency applied to every fetch.
    delay: Duration,
    /// Multiplier `k` in `stride = max(1, zoom² · k)`.
    subsample_factor: u32,
}

impl SampledPointSource {
    /// Create a source with no artificial delay.
    ///
    /// # Arguments
    ///
    /// * `dataset` - The shared point dataset to scan
    /// * `subsample_factor` - Stride multiplier (1 = fast preset, 100 = slow preset)
    pub fn new(dataset: Arc<PointDataset>, subsample_factor: u32) -> Self {
        Self {
            dataset,
            delay: Duration::ZERO,
            subsample_factor,
        }
    }

    /// Set the simulated per-fetch delay.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// The configured subsample factor.
    pub fn subsample_factor(&self) -> u32 {
        self.subsample_factor
    }

    /// The configured simulated delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl TileDataSource for SampledPointSource {
    fn fetch_tile(&self, bounds: BoundingBox, zoom: i32) -> BoxFuture<'_, Vec<Point>> {
        Box::pin(async move {
            // Stall to simulate an async backend request.
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            let stride = subsample_stride(zoom, self.subsample_factor);
            let points: Vec<Point> = self
                .dataset
                .points()
                .iter()
                .filter(|p| p.index % stride == 0 && bounds.contains(p.position))
                .copied()
                .collect();

            trace!(
                zoom,
                stride,
                returned = points.len(),
                "tile fetch complete"
            );
            points
        })
    }
}
