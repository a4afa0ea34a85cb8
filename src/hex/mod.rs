//! Hex coordinate space: axial coordinates, compass neighbors, known cells

pub mod coord;
pub mod grid;
pub mod layout;

pub use coord::{CompassDirection, HexCoord};
pub use grid::HexGrid;
pub use layout::{HexLayout, HexOrientation, Point};
