//! PointLayer - Tiled point-data subsampling for orthographic views
//!
//! This library implements the data side of a tiled point-visualization
//! pattern: a large synthetic dataset is spatially subsampled per viewport
//! tile and composed into per-tile icon layer descriptions. Rendering the
//! descriptions is left to a downstream host; this crate never draws.
//!
//! # Architecture
//!
//! ```text
//! Viewport ──► TileScheme ──► visible TileCoords
//!                                │ (bounding box per tile)
//!                                ▼
//!                        TileDataSource ──► Points (box + stride filter)
//!                                │
//!                                ▼
//!                       CompositeTileLayer ──► IconLayers
//! ```
//!
//! The dataset is generated once at startup, owned by [`app::PointLayerApp`]
//! and shared read-only. The provider behind [`source::TileDataSource`] is
//! an injected strategy, so the composition pipeline is independent of
//! where point data comes from.

pub mod app;
pub mod dataset;
pub mod geom;
pub mod layer;
pub mod source;
pub mod telemetry;
pub mod tile;
pub mod view;
