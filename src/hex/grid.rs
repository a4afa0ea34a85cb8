//! Known cells of the board
//!
//! The grid only tracks which cells exist so far. A known cell without a
//! terrain tile is the frontier: moving there means exploring it.

use ahash::AHashSet;
use serde::Serialize;

use super::coord::HexCoord;
use super::layout::{HexLayout, Point};

#[derive(Debug, Clone, Serialize)]
pub struct HexGrid {
    layout: HexLayout,
    /// Known cells in discovery order
    cells: Vec<HexCoord>,
    #[serde(skip)]
    index: AHashSet<HexCoord>,
}

impl HexGrid {
    pub fn new(layout: HexLayout) -> Self {
        Self {
            layout,
            cells: Vec::new(),
            index: AHashSet::new(),
        }
    }

    pub fn layout(&self) -> &HexLayout {
        &self.layout
    }

    pub fn cells(&self) -> &[HexCoord] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: &HexCoord) -> bool {
        self.index.contains(cell)
    }

    /// Add a cell; returns false if it was already known
    pub fn insert(&mut self, cell: HexCoord) -> bool {
        if self.index.insert(cell) {
            self.cells.push(cell);
            true
        } else {
            false
        }
    }

    pub fn distance(&self, a: HexCoord, b: HexCoord) -> u32 {
        a.distance(&b)
    }

    /// Compass neighbors of a cell, N through NW (see `HexCoord::neighbor`)
    pub fn neighbors_of(&self, cell: HexCoord) -> [HexCoord; 8] {
        cell.compass_neighbors(self.layout.orientation)
    }

    pub fn trace_line(&self, start: HexCoord, stop: HexCoord) -> Vec<HexCoord> {
        start.line_to(&stop)
    }

    /// Make every neighbor of `cell` known. Returns exactly the cells that
    /// were not known before, in compass order.
    pub fn expand_known_set_around(&mut self, cell: HexCoord) -> Vec<HexCoord> {
        let mut added = Vec::new();
        for neighbor in self.neighbors_of(cell) {
            if self.insert(neighbor) {
                added.push(neighbor);
            }
        }
        added
    }

    /// Resolve a pixel to a known cell. Points over unknown cells give `None`.
    pub fn point_to_cell(&self, point: Point) -> Option<HexCoord> {
        let cell = self.layout.point_to_cell(point);
        self.contains(&cell).then_some(cell)
    }
}

impl Default for HexGrid {
    fn default() -> Self {
        Self::new(HexLayout::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::HexOrientation;

    #[test]
    fn test_expand_returns_only_new_cells() {
        let mut grid = HexGrid::default();
        grid.insert(HexCoord::new(0, 0));

        let added = grid.expand_known_set_around(HexCoord::new(0, 0));
        assert_eq!(added.len(), 6);
        assert_eq!(grid.len(), 7);

        assert!(grid.expand_known_set_around(HexCoord::new(0, 0)).is_empty());

        // Next to (1, 0) only the three outer cells are new
        let added = grid.expand_known_set_around(HexCoord::new(1, 0));
        assert_eq!(added.len(), 3);
        assert!(!added.contains(&HexCoord::new(0, 0)));
    }

    #[test]
    fn test_expand_does_not_include_center() {
        let mut grid = HexGrid::default();
        let added = grid.expand_known_set_around(HexCoord::new(4, 4));
        assert!(!added.contains(&HexCoord::new(4, 4)));
        assert!(!grid.contains(&HexCoord::new(4, 4)));
    }

    #[test]
    fn test_point_to_cell_only_for_known_cells() {
        let mut grid = HexGrid::new(HexLayout::new(70.0, HexOrientation::Flat));
        grid.insert(HexCoord::new(0, 0));

        assert_eq!(grid.point_to_cell(Point::new(0.0, 0.0)), Some(HexCoord::new(0, 0)));
        assert_eq!(grid.point_to_cell(Point::new(1000.0, 0.0)), None);
    }
}
