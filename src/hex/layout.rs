//! Pixel geometry for hexes, used to resolve clicks into cells

use serde::{Deserialize, Serialize};

use super::coord::HexCoord;

const SQRT_3: f64 = 1.732_050_807_568_877_2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HexOrientation {
    #[default]
    Flat,
    Pointy,
}

/// A point in renderer pixel space, relative to the center of cell (0, 0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HexLayout {
    /// Distance from center to corner, in pixels
    pub size: f64,
    pub orientation: HexOrientation,
}

impl HexLayout {
    pub fn new(size: f64, orientation: HexOrientation) -> Self {
        Self { size, orientation }
    }

    /// Center of a cell in pixel space
    pub fn cell_to_point(&self, coord: HexCoord) -> Point {
        let (q, r) = (coord.q as f64, coord.r as f64);
        match self.orientation {
            HexOrientation::Flat => Point::new(
                self.size * 1.5 * q,
                self.size * SQRT_3 * (r + q / 2.0),
            ),
            HexOrientation::Pointy => Point::new(
                self.size * SQRT_3 * (q + r / 2.0),
                self.size * 1.5 * r,
            ),
        }
    }

    /// Cell containing a pixel
    pub fn point_to_cell(&self, point: Point) -> HexCoord {
        let (x, y) = (point.x / self.size, point.y / self.size);
        let (q, r) = match self.orientation {
            HexOrientation::Flat => (2.0 / 3.0 * x, -1.0 / 3.0 * x + SQRT_3 / 3.0 * y),
            HexOrientation::Pointy => (SQRT_3 / 3.0 * x - 1.0 / 3.0 * y, 2.0 / 3.0 * y),
        };
        HexCoord::round(q, r)
    }
}

impl Default for HexLayout {
    fn default() -> Self {
        Self::new(70.0, HexOrientation::Flat)
    }
}
