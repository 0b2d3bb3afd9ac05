//! Application configuration for PointLayerApp.
//!
//! Combines the dataset, source, and layer settings into one surface so
//! every component is configured consistently. The two presets mirror the
//! original demo's pair of near-identical variants, which differ only in
//! tuning constants (dataset size, simulated delay, subsample factor).

use std::time::Duration;

use crate::dataset::DEFAULT_EXTENT;
use crate::layer::LayerConfig;
use crate::tile::DEFAULT_TILE_SIZE;

/// Dataset generation settings.
#[derive(Debug, Clone, Copy)]
pub struct DatasetConfig {
    /// Number of points to generate.
    pub point_count: usize,
    /// Side length of the square world in world units.
    pub extent: f64,
    /// RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            point_count: 500_000,
            extent: DEFAULT_EXTENT,
            seed: None,
        }
    }
}

/// Tile data source settings.
#[derive(Debug, Clone, Copy)]
pub struct SourceConfig {
    /// Simulated backend latency per fetch.
    pub delay: Duration,
    /// Stride multiplier `k` in `stride = max(1, zoom² · k)`.
    pub subsample_factor: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(20),
            subsample_factor: 1,
        }
    }
}

/// Top-level configuration passed to `PointLayerApp::start()`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Dataset generation settings.
    pub dataset: DatasetConfig,
    /// Tile data source settings.
    pub source: SourceConfig,
    /// Tile edge length at zoom 0, in world units.
    pub tile_size: f64,
    /// Composite layer settings.
    pub layer: LayerConfig,
}

impl AppConfig {
    /// The fast-backend preset: 500k points, 20ms fetch delay, stride
    /// factor 1.
    pub fn fast() -> Self {
        Self::default()
    }

    /// The slow-backend preset: a larger dataset, 200ms fetch delay,
    /// stride factor 100.
    pub fn slow() -> Self {
        Self {
            dataset: DatasetConfig {
                point_count: 2_000_000,
                ..DatasetConfig::default()
            },
            source: SourceConfig {
                delay: Duration::from_millis(200),
                subsample_factor: 100,
            },
            ..Self::default()
        }
    }

    /// Set the dataset size.
    pub fn with_point_count(mut self, point_count: usize) -> Self {
        self.dataset.point_count = point_count;
        self
    }

    /// Set the RNG seed for reproducible datasets.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.dataset.seed = Some(seed);
        self
    }

    /// Set the simulated fetch delay.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.source.delay = delay;
        self
    }

    /// Set the subsample stride factor.
    pub fn with_subsample_factor(mut self, factor: u32) -> Self {
        self.source.subsample_factor = factor;
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetConfig::default(),
            source: SourceConfig::default(),
            tile_size: DEFAULT_TILE_SIZE,
            layer: LayerConfig::default(),
        }
    }
}
