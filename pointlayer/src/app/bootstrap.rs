//! Application bootstrap.
//!
//! `PointLayerApp::start` performs the full wiring in one place: validate
//! the config, generate the dataset, build the injected data source, and
//! hand both to a composite layer. Nothing here is global; the dataset's
//! lifetime is the app value's lifetime.

use std::sync::Arc;

use tracing::info;

use crate::app::{AppConfig, AppError};
use crate::dataset::PointDataset;
use crate::layer::{CompositeTileLayer, IconLayer};
use crate::source::SampledPointSource;
use crate::telemetry::{CompositionMetrics, TelemetrySnapshot};
use crate::tile::TileScheme;
use crate::view::Viewport;

/// The assembled demo application: dataset, source, and composite layer.
///
/// # Example
///
/// ```
/// use pointlayer::app::{AppConfig, PointLayerApp};
/// use pointlayer::view::{ViewState, Viewport};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let config = AppConfig::fast()
///     .with_point_count(10_000)
///     .with_seed(1)
///     .with_delay(std::time::Duration::ZERO);
/// let app = PointLayerApp::start(config).unwrap();
///
/// let viewport = Viewport::new(ViewState::default(), 1024, 768);
/// let layers = app.render(&viewport).await;
/// assert!(!layers.is_empty());
/// # });
/// ```
pub struct PointLayerApp {
    dataset: Arc<PointDataset>,
    layer: CompositeTileLayer,
    metrics: Arc<CompositionMetrics>,
}

impl std::fmt::Debug for PointLayerApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointLayerApp")
            .field("dataset", &self.dataset)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

impl PointLayerApp {
    /// Validate the configuration and assemble the application.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] when the dataset is empty, the world
    /// extent or tile size is not positive, or the zoom range is inverted.
    pub fn start(config: AppConfig) -> Result<Self, AppError> {
        Self::validate(&config)?;

        let dataset = Arc::new(match config.dataset.seed {
            Some(seed) => PointDataset::generate_seeded(
                config.dataset.point_count,
                config.dataset.extent,
                seed,
            ),
            None => PointDataset::generate(config.dataset.point_count, config.dataset.extent),
        });
        info!(
            points = dataset.len(),
            extent = config.dataset.extent,
            "dataset generated"
        );

        let source = Arc::new(
            SampledPointSource::new(Arc::clone(&dataset), config.source.subsample_factor)
                .with_delay(config.source.delay),
        );

        let scheme = TileScheme::new(
            config.dataset.extent,
            config.dataset.extent,
            config.tile_size,
        );
        let metrics = Arc::new(CompositionMetrics::new());
        let layer = CompositeTileLayer::new("pointlayer", source, scheme, config.layer)
            .with_metrics(Arc::clone(&metrics));

        Ok(Self {
            dataset,
            layer,
            metrics,
        })
    }

    fn validate(config: &AppConfig) -> Result<(), AppError> {
        if config.dataset.point_count == 0 {
            return Err(AppError::Config(
                "point_count must be greater than zero".to_string(),
            ));
        }
        if config.dataset.extent <= 0.0 {
            return Err(AppError::Config("extent must be positive".to_string()));
        }
        if config.tile_size <= 0.0 {
            return Err(AppError::Config("tile_size must be positive".to_string()));
        }
        if config.layer.min_zoom > config.layer.max_zoom {
            return Err(AppError::Config(format!(
                "min_zoom {} exceeds max_zoom {}",
                config.layer.min_zoom, config.layer.max_zoom
            )));
        }
        Ok(())
    }

    /// The generated dataset.
    pub fn dataset(&self) -> &Arc<PointDataset> {
        &self.dataset
    }

    /// The composite layer.
    pub fn layer(&self) -> &CompositeTileLayer {
        &self.layer
    }

    /// Compose icon sub-layers for a viewport.
    pub async fn render(&self, viewport: &Viewport) -> Vec<IconLayer> {
        self.layer.render_layers(viewport).await
    }

    /// Current telemetry counters.
    pub fn telemetry(&self) -> TelemetrySnapshot {
        self.metrics.snapshot()
    }
}
