//! Snap functionality for aligning card positions to the board grid.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Grid size for snapping (matches the visual grid).
pub const GRID_SIZE: i32 = 10;

/// A grid-aligned position in board coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Check if both coordinates are multiples of `grid_size`.
    pub fn is_aligned(&self, grid_size: i32) -> bool {
        self.x % grid_size == 0 && self.y % grid_size == 0
    }
}

impl From<GridPoint> for Point {
    fn from(point: GridPoint) -> Self {
        Point::new(point.x as f64, point.y as f64)
    }
}

/// Snap a single coordinate to the nearest multiple of `grid_size`.
///
/// Halfway values round away from zero, so `5` snaps to `10` on a 10 grid.
/// Coordinates beyond the `i32` range land on the outermost grid line, and
/// NaN snaps to `0`. A non-positive `grid_size` is treated as `1`.
pub fn snap_coordinate(value: f64, grid_size: i32) -> i32 {
    if value.is_nan() {
        return 0;
    }
    let grid_size = grid_size.max(1);
    let min_steps = f64::from(i32::MIN / grid_size);
    let max_steps = f64::from(i32::MAX / grid_size);
    let steps = (value / f64::from(grid_size)).round().clamp(min_steps, max_steps);
    steps as i32 * grid_size
}

/// Snap a raw pointer position to the grid, independently on each axis.
pub fn snap_to_grid(point: Point, grid_size: i32) -> GridPoint {
    GridPoint {
        x: snap_coordinate(point.x, grid_size),
        y: snap_coordinate(point.y, grid_size),
    }
}
