//! Cartesian tile scheme.
//!
//! Maps integer tile coordinates to world-space bounding boxes and
//! enumerates the tiles covering a visible region. Tiles follow the usual
//! power-of-two pyramid over a flat cartesian world: at zoom 0 a tile spans
//! `tile_size` world units, and each zoom step away from 0 doubles or
//! halves the span (`span = tile_size · 2^(-zoom)`). The demo's
//! orthographic view runs zoom -7..0, so its tiles only ever grow.

use serde::Serialize;

use crate::geom::BoundingBox;

/// Default tile edge length at zoom 0, in world units.
pub const DEFAULT_TILE_SIZE: f64 = 512.0;

/// Integer tile coordinates within the pyramid.
///
/// `col` grows eastward, `row` grows downward, matching the world's screen
/// convention. `zoom` may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TileCoord {
    /// Tile column (x index).
    pub col: i32,
    /// Tile row (y index).
    pub row: i32,
    /// Zoom level.
    pub zoom: i32,
}

impl TileCoord {
    /// Create a new tile coordinate.
    pub fn new(col: i32, row: i32, zoom: i32) -> Self {
        Self { col, row, zoom }
    }
}

/// Tile pyramid over a bounded rectangular world.
///
/// Owns the constants the composite layer needs to turn a viewport into
/// tile requests: the world extent and the base tile size.
#[derive(Debug, Clone, Copy)]
pub struct TileScheme {
    /// World width in world units.
    width: f64,
    /// World height in world units.
    height: f64,
    /// Tile edge length at zoom 0.
    tile_size: f64,
}

impl TileScheme {
    /// Create a tile scheme for a `width x height` world.
    ///
    /// # Arguments
    ///
    /// * `width` - World width in world units (must be positive)
    /// * `height` - World height in world units (must be positive)
    /// * `tile_size` - Tile edge length at zoom 0 (must be positive)
    pub fn new(width: f64, height: f64, tile_size: f64) -> Self {
        Self {
            width,
            height,
            tile_size,
        }
    }

    /// World width in world units.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// World height in world units.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Tile edge length at zoom 0.
    pub fn tile_size(&self) -> f64 {
        self.tile_size
    }

    /// Tile edge length at the given zoom, in world units.
    pub fn tile_span(&self, zoom: i32) -> f64 {
        self.tile_size * 2.0_f64.powi(-zoom)
    }

    /// The world-space bounding box of a tile.
    pub fn tile_bounds(&self, tile: TileCoord) -> BoundingBox {
        let span = self.tile_span(tile.zoom);
        BoundingBox::new(
            tile.col as f64 * span,
            (tile.col + 1) as f64 * span,
            tile.row as f64 * span,
            (tile.row + 1) as f64 * span,
        )
    }

    /// Number of tile columns covering the world at the given zoom.
    pub fn cols(&self, zoom: i32) -> i32 {
        (self.width / self.tile_span(zoom)).ceil().max(1.0) as i32
    }

    /// Number of tile rows covering the world at the given zoom.
    pub fn rows(&self, zoom: i32) -> i32 {
        (self.height / self.tile_span(zoom)).ceil().max(1.0) as i32
    }

    /// Tiles at `zoom` intersecting `rect`, clamped to the world extent.
    ///
    /// Enumerated in row-major order. Returns an empty vector when the
    /// rectangle lies entirely outside the world.
    pub fn tiles_in_rect(&self, rect: &BoundingBox, zoom: i32) -> Vec<TileCoord> {
        let span = self.tile_span(zoom);

        let col_min = ((rect.left / span).floor() as i32).max(0);
        let col_max = (((rect.right / span).ceil() as i32) - 1).min(self.cols(zoom) - 1);
        let row_min = ((rect.top / span).floor() as i32).max(0);
        let row_max = (((rect.bottom / span).ceil() as i32) - 1).min(self.rows(zoom) - 1);

        let mut tiles = Vec::new();
        for row in row_min..=row_max {
            for col in col_min..=col_max {
                tiles.push(TileCoord::new(col, row, zoom));
            }
        }
        tiles
    }
}

impl Default for TileScheme {
    fn default() -> Self {
        Self::new(
            crate::dataset::DEFAULT_EXTENT,
            crate::dataset::DEFAULT_EXTENT,
            DEFAULT_TILE_SIZE,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheme() -> TileScheme {
        TileScheme::new(24_000.0, 24_000.0, 512.0)
    }

    #[test]
    fn test_tile_span_at_zoom_zero() {
        assert_eq!(scheme().tile_span(0), 512.0);
    }

    #[test]
    fn test_tile_span_doubles_per_zoom_out() {
        let s = scheme();
        assert_eq!(s.tile_span(-1), 1024.0);
        assert_eq!(s.tile_span(-7), 512.0 * 128.0);
    }

    #[test]
    fn test_tile_bounds_origin_tile() {
        let bounds = scheme().tile_bounds(TileCoord::new(0, 0, 0));
        assert_eq!(bounds, BoundingBox::new(0.0, 512.0, 0.0, 512.0));
    }

    #[test]
    fn test_tile_bounds_offset_tile() {
        let bounds = scheme().tile_bounds(TileCoord::new(2, 3, 0));
        assert_eq!(bounds, BoundingBox::new(1024.0, 1536.0, 1536.0, 2048.0));
    }

    #[test]
    fn test_tile_bounds_negative_zoom() {
        let bounds = scheme().tile_bounds(TileCoord::new(1, 0, -1));
        assert_eq!(bounds, BoundingBox::new(1024.0, 2048.0, 0.0, 1024.0));
    }

    #[test]
    fn test_adjacent_tiles_share_edges() {
        let s = scheme();
        let a = s.tile_bounds(TileCoord::new(0, 0, 0));
        let b = s.tile_bounds(TileCoord::new(1, 0, 0));
        assert_eq!(a.right, b.left);
    }

    #[test]
    fn test_cols_and_rows_at_deep_zoom_out() {
        let s = scheme();
        // At zoom -7 a tile spans 65536 units, larger than the world.
        assert_eq!(s.cols(-7), 1);
        assert_eq!(s.rows(-7), 1);
    }

    #[test]
    fn test_tiles_in_rect_single_tile() {
        let s = scheme();
        let rect = BoundingBox::new(100.0, 200.0, 100.0, 200.0);
        let tiles = s.tiles_in_rect(&rect, 0);
        assert_eq!(tiles, vec![TileCoord::new(0, 0, 0)]);
    }

    #[test]
    fn test_tiles_in_rect_spanning_tiles() {
        let s = scheme();
        let rect = BoundingBox::new(500.0, 1100.0, 0.0, 100.0);
        let tiles = s.tiles_in_rect(&rect, 0);
        assert_eq!(
            tiles,
            vec![
                TileCoord::new(0, 0, 0),
                TileCoord::new(1, 0, 0),
                TileCoord::new(2, 0, 0),
            ]
        );
    }

    #[test]
    fn test_tiles_in_rect_row_major_order() {
        let s = scheme();
        let rect = BoundingBox::new(100.0, 600.0, 100.0, 600.0);
        let tiles = s.tiles_in_rect(&rect, 0);
        assert_eq!(
            tiles,
            vec![
                TileCoord::new(0, 0, 0),
                TileCoord::new(1, 0, 0),
                TileCoord::new(0, 1, 0),
                TileCoord::new(1, 1, 0),
            ]
        );
    }

    #[test]
    fn test_tiles_in_rect_clamped_to_world() {
        let s = scheme();
        // Rectangle extending far beyond the world edge.
        let rect = BoundingBox::new(-10_000.0, 100_000.0, -10_000.0, 100.0);
        let tiles = s.tiles_in_rect(&rect, 0);

        assert!(!tiles.is_empty());
        let max_col = s.cols(0) - 1;
        for tile in &tiles {
            assert!(tile.col >= 0 && tile.col <= max_col);
            assert!(tile.row >= 0);
        }
    }

    #[test]
    fn test_tiles_in_rect_outside_world_is_empty() {
        let s = scheme();
        let rect = BoundingBox::new(50_000.0, 60_000.0, 50_000.0, 60_000.0);
        assert!(s.tiles_in_rect(&rect, 0).is_empty());
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_enumerated_tiles_intersect_rect(
                left in 0.0..23_000.0_f64,
                top in 0.0..23_000.0_f64,
                w in 1.0..5_000.0_f64,
                h in 1.0..5_000.0_f64,
                zoom in -7i32..=0,
            ) {
                let s = TileScheme::new(24_000.0, 24_000.0, 512.0);
                let rect = BoundingBox::new(left, left + w, top, top + h);

                for tile in s.tiles_in_rect(&rect, zoom) {
                    let bounds = s.tile_bounds(tile);
                    // Closed-interval overlap: boundary tiles are included.
                    prop_assert!(bounds.left <= rect.right && bounds.right >= rect.left);
                    prop_assert!(bounds.top <= rect.bottom && bounds.bottom >= rect.top);
                }
            }

            #[test]
            fn test_enumerated_tiles_are_unique(
                left in 0.0..20_000.0_f64,
                top in 0.0..20_000.0_f64,
                w in 1.0..4_000.0_f64,
                h in 1.0..4_000.0_f64,
                zoom in -7i32..=0,
            ) {
                let s = TileScheme::new(24_000.0, 24_000.0, 512.0);
                let rect = BoundingBox::new(left, left + w, top, top + h);

                let tiles = s.tiles_in_rect(&rect, zoom);
                let mut seen = std::collections::HashSet::new();
                for tile in &tiles {
                    prop_assert!(seen.insert(*tile), "duplicate tile {:?}", tile);
                }
            }

            #[test]
            fn test_interior_point_covered_by_some_tile(
                x in 1.0..23_999.0_f64,
                y in 1.0..23_999.0_f64,
                zoom in -7i32..=0,
            ) {
                let s = TileScheme::new(24_000.0, 24_000.0, 512.0);
                let rect = BoundingBox::new(x - 0.5, x + 0.5, y - 0.5, y + 0.5);

                let tiles = s.tiles_in_rect(&rect, zoom);
                let covered = tiles.iter().any(|t| {
                    let b = s.tile_bounds(*t);
                    x >= b.left && x <= b.right && y >= b.top && y <= b.bottom
                });
                prop_assert!(covered, "point ({}, {}) not covered at zoom {}", x, y, zoom);
            }
        }
    }
}
