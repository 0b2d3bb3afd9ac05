//! Synthetic point dataset.
//!
//! The demo serves a large in-memory collection of randomly placed points.
//! The dataset is generated once at application start, owned explicitly by
//! the caller (no globals), and shared read-only behind an `Arc` for the
//! lifetime of the process. Points are never mutated or deleted.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::geom::Position;

/// Default side length of the square world, in world units.
pub const DEFAULT_EXTENT: f64 = 24_000.0;

/// A single dataset point.
///
/// `index` is the point's sequential identity, assigned at generation time
/// in insertion order. The subsampling stride operates on this index, so
/// the identity doubles as the density-reduction key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    /// Sequential identity, 0-based, immutable.
    pub index: u64,
    /// Position in world units, immutable after generation.
    pub position: Position,
}

/// An immutable, append-ordered collection of points.
///
/// # Example
///
/// ```
/// use pointlayer::dataset::PointDataset;
///
/// let dataset = PointDataset::generate_seeded(1_000, 24_000.0, 42);
/// assert_eq!(dataset.len(), 1_000);
/// assert_eq!(dataset.points()[0].index, 0);
/// ```
#[derive(Debug, Clone)]
pub struct PointDataset {
    points: Vec<Point>,
}

impl PointDataset {
    /// Generate `count` points with uniformly random positions in
    /// `[0, extent) x [0, extent)`, seeded from OS entropy.
    pub fn generate(count: usize, extent: f64) -> Self {
        Self::generate_with_rng(count, extent, &mut rand::rng())
    }

    /// Generate `count` points from a fixed seed.
    ///
    /// Identical `(count, extent, seed)` inputs yield identical datasets,
    /// which the tests and the CLI's `--seed` flag rely on.
    pub fn generate_seeded(count: usize, extent: f64, seed: u64) -> Self {
        Self::generate_with_rng(count, extent, &mut StdRng::seed_from_u64(seed))
    }

    fn generate_with_rng<R: Rng>(count: usize, extent: f64, rng: &mut R) -> Self {
        let points = (0..count)
            .map(|i| Point {
                index: i as u64,
                position: Position::new(
                    rng.random_range(0.0..extent),
                    rng.random_range(0.0..extent),
                ),
            })
            .collect();
        Self { points }
    }

    /// Build a dataset from explicit points (primarily for tests and
    /// non-synthetic sources).
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// All points in insertion order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of points in the dataset.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
