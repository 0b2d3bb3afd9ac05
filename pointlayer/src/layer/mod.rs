//! Composite tile layer.
//!
//! Bridges the tiling side (which tiles are visible for a viewport) to the
//! icon side (one sub-layer description per tile). The layer owns no data:
//! it holds an injected [`TileDataSource`] strategy and, per composition
//! pass, asks it for each visible tile's points and wraps the result in an
//! [`IconLayer`] with a uniform style.
//!
//! Composition is stateless per call. Tile fetches within one pass run
//! concurrently; a pass that is superseded by a newer viewport is simply
//! discarded by the caller, never cancelled.

use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use serde::Serialize;
use tracing::debug;

use crate::dataset::Point;
use crate::source::TileDataSource;
use crate::telemetry::CompositionMetrics;
use crate::tile::{TileCoord, TileScheme};
use crate::view::Viewport;

/// Default icon atlas image URL.
pub const DEFAULT_ICON_ATLAS_URL: &str =
    "https://raw.githubusercontent.com/visgl/deck.gl-data/master/website/icon-atlas.png";

/// Pixel region of a named icon within the atlas image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IconMapping {
    /// Left edge of the icon in the atlas, in pixels.
    pub x: u32,
    /// Top edge of the icon in the atlas, in pixels.
    pub y: u32,
    /// Icon width in pixels.
    pub width: u32,
    /// Icon height in pixels.
    pub height: u32,
    /// Whether the icon is a mask to be tinted by the layer color.
    pub mask: bool,
}

impl IconMapping {
    /// The single "marker" icon the demo uses.
    pub fn marker() -> Self {
        Self {
            x: 0,
            y: 0,
            width: 128,
            height: 128,
            mask: true,
        }
    }
}

/// Uniform styling applied to every point of every sub-layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IconStyle {
    /// RGB tint color.
    pub color: [u8; 3],
    /// Name of the icon within the atlas.
    pub icon: String,
    /// URL of the atlas image; loaded by the host renderer, no fallback.
    pub atlas_url: String,
    /// Atlas region for the icon.
    pub mapping: IconMapping,
    /// Minimum rendered size in pixels, regardless of zoom.
    pub size_min_pixels: u32,
}

impl Default for IconStyle {
    fn default() -> Self {
        Self {
            color: [255, 255, 255],
            icon: "marker".to_string(),
            atlas_url: DEFAULT_ICON_ATLAS_URL.to_string(),
            mapping: IconMapping::marker(),
            size_min_pixels: 10,
        }
    }
}

/// One composed icon sub-layer: a tile's worth of points plus styling.
///
/// This is a description for a downstream renderer, not a drawing. The
/// `id` is stable for a given layer id and tile coordinate.
#[derive(Debug, Clone, Serialize)]
pub struct IconLayer {
    /// Stable sub-layer identity.
    pub id: String,
    /// The tile this sub-layer belongs to.
    pub tile: TileCoord,
    /// Points to render as icons.
    pub points: Vec<Point>,
    /// Uniform style for all points.
    pub style: IconStyle,
}

/// Tiling configuration for a composite layer.
#[derive(Debug, Clone, Copy)]
pub struct LayerConfig {
    /// Shallowest tile level composed.
    pub min_zoom: i32,
    /// Deepest tile level composed.
    pub max_zoom: i32,
    /// RGBA highlight color the host may use for hovered tiles.
    pub highlight_color: [u8; 4],
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            min_zoom: -7,
            max_zoom: 0,
            highlight_color: [60, 60, 60, 100],
        }
    }
}

/// Composes per-tile icon layers for a viewport.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use pointlayer::dataset::PointDataset;
/// use pointlayer::layer::{CompositeTileLayer, LayerConfig};
/// use pointlayer::source::SampledPointSource;
/// use pointlayer::tile::TileScheme;
/// use pointlayer::view::{ViewState, Viewport};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let dataset = Arc::new(PointDataset::generate_seeded(10_000, 24_000.0, 1));
/// let source = Arc::new(SampledPointSource::new(dataset, 1));
/// let layer = CompositeTileLayer::new(
///     "demo",
///     source,
///     TileScheme::default(),
///     LayerConfig::default(),
/// );
///
/// let viewport = Viewport::new(ViewState::default(), 1024, 768);
/// let layers = layer.render_layers(&viewport).await;
/// assert!(!layers.is_empty());
/// # });
/// ```
pub struct CompositeTileLayer {
    /// Layer identity, prefixed onto every sub-layer id.
    id: String,
    /// Injected point retrieval strategy.
    source: Arc<dyn TileDataSource>,
    /// Tile pyramid over the world.
    scheme: TileScheme,
    /// Zoom clamping and host hints.
    config: LayerConfig,
    /// Uniform icon styling.
    style: IconStyle,
    /// Counters shared with the application shell.
    metrics: Arc<CompositionMetrics>,
}

impl CompositeTileLayer {
    /// Create a composite layer with the default icon style.
    ///
    /// # Arguments
    ///
    /// * `id` - Layer identity used as the sub-layer id prefix
    /// * `source` - Tile data source strategy
    /// * `scheme` - Tile pyramid over the world
    /// * `config` - Zoom range and host hints
    pub fn new(
        id: impl Into<String>,
        source: Arc<dyn TileDataSource>,
        scheme: TileScheme,
        config: LayerConfig,
    ) -> Self {
        Self {
            id: id.into(),
            source,
            scheme,
            config,
            style: IconStyle::default(),
            metrics: Arc::new(CompositionMetrics::new()),
        }
    }

    /// Replace the icon style.
    pub fn with_style(mut self, style: IconStyle) -> Self {
        self.style = style;
        self
    }

    /// Share an externally owned metrics instance.
    pub fn with_metrics(mut self, metrics: Arc<CompositionMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Layer identity.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The layer's tile scheme.
    pub fn scheme(&self) -> &TileScheme {
        &self.scheme
    }

    /// The layer's tiling configuration.
    pub fn config(&self) -> &LayerConfig {
        &self.config
    }

    /// Telemetry counters for this layer.
    pub fn metrics(&self) -> Arc<CompositionMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Compose one icon sub-layer per tile visible in `viewport`.
    ///
    /// The viewport's fractional zoom is clamped to the configured tile
    /// zoom range; every intersecting tile is fetched concurrently and
    /// wrapped in an [`IconLayer`], empty tiles included. Sub-layers come
    /// back in the scheme's row-major tile order.
    pub async fn render_layers(&self, viewport: &Viewport) -> Vec<IconLayer> {
        let zoom = viewport.tile_zoom(self.config.min_zoom, self.config.max_zoom);
        let visible = viewport.visible_bounds();
        let tiles = self.scheme.tiles_in_rect(&visible, zoom);

        debug!(
            layer = %self.id,
            zoom,
            tiles = tiles.len(),
            "composing icon sub-layers"
        );

        let fetches = tiles.into_iter().map(|tile| {
            let bounds = self.scheme.tile_bounds(tile);
            self.metrics.tile_requested();
            async move {
                let started = Instant::now();
                let points = self.source.fetch_tile(bounds, tile.zoom).await;
                self.metrics.tile_loaded(points.len(), started.elapsed());
                self.icon_layer(tile, points)
            }
        });

        join_all(fetches).await
    }

    /// Wrap one tile's points in a styled sub-layer description.
    fn icon_layer(&self, tile: TileCoord, points: Vec<Point>) -> IconLayer {
        IconLayer {
            id: format!(
                "icon-layer-{}-{}-{}-{}",
                self.id, tile.zoom, tile.col, tile.row
            ),
            tile,
            points,
            style: self.style.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::PointDataset;
    use crate::geom::{BoundingBox, Position};
    use crate::source::{BoxFuture, SampledPointSource};
    use crate::view::ViewState;

    /// Source that returns a fixed point set regardless of the query.
    struct FixedSource {
        points: Vec<Point>,
    }

    impl TileDataSource for FixedSource {
        fn fetch_tile(&self, _bounds: BoundingBox, _zoom: i32) -> BoxFuture<'_, Vec<Point>> {
            let points = self.points.clone();
            Box::pin(async move { points })
        }
    }

    fn whole_world_viewport() -> Viewport {
        Viewport::new(ViewState::default(), 1024, 768)
    }

    #[test]
    fn test_icon_mapping_marker() {
        let mapping = IconMapping::marker();
        assert_eq!((mapping.x, mapping.y), (0, 0));
        assert_eq!((mapping.width, mapping.height), (128, 128));
        assert!(mapping.mask);
    }

    #[test]
    fn test_icon_style_defaults() {
        let style = IconStyle::default();
        assert_eq!(style.color, [255, 255, 255]);
        assert_eq!(style.icon, "marker");
        assert_eq!(style.size_min_pixels, 10);
        assert!(style.atlas_url.contains("icon-atlas.png"));
    }

    #[test]
    fn test_layer_config_defaults() {
        let config = LayerConfig::default();
        assert_eq!(config.min_zoom, -7);
        assert_eq!(config.max_zoom, 0);
        assert_eq!(config.highlight_color, [60, 60, 60, 100]);
    }

    #[tokio::test]
    async fn test_render_layers_one_per_visible_tile() {
        let source = Arc::new(FixedSource { points: vec![] });
        let layer = CompositeTileLayer::new(
            "test",
            source,
            TileScheme::default(),
            LayerConfig::default(),
        );

        let viewport = whole_world_viewport();
        let zoom = viewport.tile_zoom(-7, 0);
        let expected = layer
            .scheme()
            .tiles_in_rect(&viewport.visible_bounds(), zoom)
            .len();

        let layers = layer.render_layers(&viewport).await;
        assert_eq!(layers.len(), expected);
        assert!(!layers.is_empty());
    }

    #[tokio::test]
    async fn test_render_layers_ids_are_unique_and_prefixed() {
        let source = Arc::new(FixedSource { points: vec![] });
        let layer = CompositeTileLayer::new(
            "demo",
            source,
            TileScheme::default(),
            LayerConfig::default(),
        );

        // Zoom 0 over a corner of the world gives several tiles.
        let viewport = Viewport::new(ViewState::new(Position::new(600.0, 600.0), 0.0), 1024, 768);
        let layers = layer.render_layers(&viewport).await;

        let mut seen = std::collections::HashSet::new();
        for sub in &layers {
            assert!(sub.id.starts_with("icon-layer-demo-"));
            assert!(seen.insert(sub.id.clone()), "duplicate id {}", sub.id);
        }
    }

    #[tokio::test]
    async fn test_render_layers_points_lie_in_their_tile() {
        let dataset = Arc::new(PointDataset::generate_seeded(20_000, 24_000.0, 11));
        let source = Arc::new(SampledPointSource::new(dataset, 1));
        let layer = CompositeTileLayer::new(
            "demo",
            source,
            TileScheme::default(),
            LayerConfig::default(),
        );

        let viewport = whole_world_viewport();
        for sub in layer.render_layers(&viewport).await {
            let bounds = layer.scheme().tile_bounds(sub.tile);
            for point in &sub.points {
                assert!(
                    bounds.contains(point.position),
                    "point {:?} outside tile {:?}",
                    point,
                    sub.tile
                );
            }
        }
    }

    #[tokio::test]
    async fn test_render_layers_uniform_style() {
        let dataset = Arc::new(PointDataset::generate_seeded(1_000, 24_000.0, 5));
        let source = Arc::new(SampledPointSource::new(dataset, 1));
        let layer = CompositeTileLayer::new(
            "demo",
            source,
            TileScheme::default(),
            LayerConfig::default(),
        );

        let layers = layer.render_layers(&whole_world_viewport()).await;
        for sub in &layers {
            assert_eq!(sub.style, IconStyle::default());
        }
    }

    #[tokio::test]
    async fn test_render_layers_clamps_zoom() {
        let source = Arc::new(FixedSource { points: vec![] });
        let layer = CompositeTileLayer::new(
            "test",
            source,
            TileScheme::default(),
            LayerConfig::default(),
        );

        // Camera zoomed far past the configured minimum.
        let viewport = Viewport::new(
            ViewState::new(Position::new(13_000.0, 13_000.0), -12.0),
            1024,
            768,
        );
        let layers = layer.render_layers(&viewport).await;
        for sub in &layers {
            assert_eq!(sub.tile.zoom, -7);
        }
    }

    #[tokio::test]
    async fn test_render_layers_records_metrics() {
        let dataset = Arc::new(PointDataset::generate_seeded(5_000, 24_000.0, 9));
        let source = Arc::new(SampledPointSource::new(dataset, 1));
        let metrics = Arc::new(CompositionMetrics::new());
        let layer = CompositeTileLayer::new(
            "demo",
            source,
            TileScheme::default(),
            LayerConfig::default(),
        )
        .with_metrics(Arc::clone(&metrics));

        let layers = layer.render_layers(&whole_world_viewport()).await;

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.tiles_requested, layers.len() as u64);
        assert_eq!(snapshot.tiles_loaded, layers.len() as u64);
        let total: u64 = layers.iter().map(|l| l.points.len() as u64).sum();
        assert_eq!(snapshot.points_returned, total);
    }

    #[tokio::test]
    async fn test_render_layers_keeps_empty_tiles() {
        // A dataset clustered in one corner leaves most tiles empty; the
        // composition still emits a sub-layer for each visible tile.
        let dataset = Arc::new(PointDataset::from_points(vec![Point {
            index: 0,
            position: Position::new(1.0, 1.0),
        }]));
        let source = Arc::new(SampledPointSource::new(dataset, 1));
        let layer = CompositeTileLayer::new(
            "demo",
            source,
            TileScheme::default(),
            LayerConfig::default(),
        );

        let viewport = Viewport::new(ViewState::new(Position::new(600.0, 600.0), 0.0), 1024, 768);
        let zoom = viewport.tile_zoom(-7, 0);
        let expected = layer
            .scheme()
            .tiles_in_rect(&viewport.visible_bounds(), zoom)
            .len();

        let layers = layer.render_layers(&viewport).await;
        assert_eq!(layers.len(), expected);
        assert!(layers.iter().any(|l| l.points.is_empty()));
    }
}
