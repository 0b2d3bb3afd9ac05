//! World-space geometry primitives.
//!
//! Provides the cartesian `Position` and `BoundingBox` types shared by the
//! dataset, tile scheme, and data sources. The world is a flat orthographic
//! plane; no projection is involved.

use serde::Serialize;

/// A 2D position in world units.
///
/// The demo world spans `[0, extent)` on both axes, but positions are plain
/// coordinates and carry no range constraint of their own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    /// Horizontal coordinate, increasing eastward.
    pub x: f64,
    /// Vertical coordinate, increasing downward (screen convention).
    pub y: f64,
}

impl Position {
    /// Create a new position.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A rectangular query region in world units.
///
/// Produced per visible tile by the tile scheme and consumed immediately by
/// a [`TileDataSource`](crate::source::TileDataSource); never stored.
///
/// Follows screen conventions: `top < bottom`. Containment is STRICT on all
/// four bounds — a point exactly on an edge is outside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    /// Minimum x (exclusive).
    pub left: f64,
    /// Maximum x (exclusive).
    pub right: f64,
    /// Minimum y (exclusive).
    pub top: f64,
    /// Maximum y (exclusive).
    pub bottom: f64,
}

impl BoundingBox {
    /// Create a new bounding box from its four bounds.
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Width of the box in world units.
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Height of the box in world units.
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Strict containment test.
    ///
    /// Returns `true` only if the position lies strictly inside all four
    /// bounds. Edge points are excluded.
    pub fn contains(&self, position: Position) -> bool {
        position.x > self.left
            && position.x < self.right
            && position.y > self.top
            && position.y < self.bottom
    }

    /// Whether this box overlaps another (strictly, edges touching do not
    /// count as overlap).
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }
}
