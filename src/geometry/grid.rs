use super::point::Point;
use serde::{Deserialize, Serialize};

/// Rectangular board, `(0, 0)` top left and `(width - 1, height - 1)` bottom right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
}

impl Grid {
    /// `None` when a side does not fit the `i32` coordinate space.
    pub fn new(width: usize, height: usize) -> Option<Self> {
        Some(Self {
            width: i32::try_from(width).ok()?,
            height: i32::try_from(height).ok()?,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn cells(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    pub fn contains(&self, point: &Point) -> bool {
        (0..self.width).contains(&point.x()) && (0..self.height).contains(&point.y())
    }

    pub fn diagonal(&self) -> f64 {
        let w = (self.width - 1) as f64;
        let h = (self.height - 1) as f64;
        (w * w + h * h).sqrt()
    }
}
