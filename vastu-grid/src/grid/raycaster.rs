//! Bresenham ray traversal for free-space marking.
//!
//! Integer-only walk between two grid cells, visiting one cell per step
//! along the major axis:
//!
//! ```text
//! From (0,0) to (7,3):
//!
//!     3 │        ●
//!     2 │     ●●
//!     1 │  ●●
//!     0 ●●
//!       └──────────
//!        0 1 2 3 4 5 6 7
//! ```
//!
//! The walk includes both the start and the end cell and never visits a cell
//! twice, so the inserter can treat "all but the last" as traversed space.

use crate::core::GridCoord;

/// Bresenham's line algorithm iterator.
///
/// Generates all grid cells along a line from start to end, inclusive.
pub struct BresenhamLine {
    x: i32,
    y: i32,
    dx: i32,
    dy: i32,
    x_inc: i32,
    y_inc: i32,
    error: i32,
    steep: bool,
    end_x: i32,
    end_y: i32,
    done: bool,
}

impl BresenhamLine {
    /// Create a new Bresenham line iterator from start to end coordinates.
    pub fn new(start: GridCoord, end: GridCoord) -> Self {
        let dx = (end.x - start.x).abs();
        let dy = (end.y - start.y).abs();
        let steep = dy > dx;

        let (x, y, end_x, end_y, dx, dy) = if steep {
            (start.y, start.x, end.y, end.x, dy, dx)
        } else {
            (start.x, start.y, end.x, end.y, dx, dy)
        };

        let x_inc = if end_x > x { 1 } else { -1 };
        let y_inc = if end_y > y { 1 } else { -1 };

        Self {
            x,
            y,
            dx,
            dy,
            x_inc,
            y_inc,
            error: dx / 2,
            steep,
            end_x,
            end_y,
            done: false,
        }
    }
}

impl Iterator for BresenhamLine {
    type Item = GridCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = if self.steep {
            GridCoord::new(self.y, self.x)
        } else {
            GridCoord::new(self.x, self.y)
        };

        if self.x == self.end_x && self.y == self.end_y {
            self.done = true;
            return Some(result);
        }

        self.error -= self.dy;
        if self.error < 0 {
            self.y += self.y_inc;
            self.error += self.dx;
        }
        self.x += self.x_inc;

        Some(result)
    }
}
