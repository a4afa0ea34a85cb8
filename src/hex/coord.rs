//! Hex coordinates (axial) and the compass neighbor table
//!
//! Uses axial coordinates (q, r); offset coordinates are only used to resolve
//! the two compass directions that do not map onto a hex edge.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::layout::HexOrientation;

/// Row/column shift applied to odd lines when converting to offset coordinates
const OFFSET: i32 = -1;

/// Axial hex coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

impl HexCoord {
    pub fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Cube coordinate S (derived from q and r)
    pub fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// Distance in hex steps
    pub fn distance(&self, other: &Self) -> u32 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = (self.s() - other.s()).abs();
        ((dq + dr + ds) / 2) as u32
    }

    /// Offset (column, row) for the given orientation
    pub fn to_offset(&self, orientation: HexOrientation) -> (i32, i32) {
        match orientation {
            HexOrientation::Flat => (self.q, self.r + (self.q + OFFSET * (self.q & 1)) / 2),
            HexOrientation::Pointy => (self.q + (self.r + OFFSET * (self.r & 1)) / 2, self.r),
        }
    }

    pub fn from_offset(col: i32, row: i32, orientation: HexOrientation) -> Self {
        match orientation {
            HexOrientation::Flat => Self::new(col, row - (col + OFFSET * (col & 1)) / 2),
            HexOrientation::Pointy => Self::new(col - (row + OFFSET * (row & 1)) / 2, row),
        }
    }

    /// Neighbor in a compass direction.
    ///
    /// On flat hexes East and West have no shared edge; they resolve to the
    /// next column in offset space, which lands on NE or SE (NW or SW)
    /// depending on column parity. North and South do the same on pointy hexes.
    pub fn neighbor(&self, direction: CompassDirection, orientation: HexOrientation) -> Self {
        use CompassDirection::*;

        let axial = match (orientation, direction) {
            (HexOrientation::Flat, North) => Some((0, -1)),
            (HexOrientation::Flat, NorthEast) => Some((1, -1)),
            (HexOrientation::Flat, SouthEast) => Some((1, 0)),
            (HexOrientation::Flat, South) => Some((0, 1)),
            (HexOrientation::Flat, SouthWest) => Some((-1, 1)),
            (HexOrientation::Flat, NorthWest) => Some((-1, 0)),
            (HexOrientation::Pointy, NorthEast) => Some((1, -1)),
            (HexOrientation::Pointy, East) => Some((1, 0)),
            (HexOrientation::Pointy, SouthEast) => Some((0, 1)),
            (HexOrientation::Pointy, SouthWest) => Some((-1, 1)),
            (HexOrientation::Pointy, West) => Some((-1, 0)),
            (HexOrientation::Pointy, NorthWest) => Some((0, -1)),
            _ => None,
        };

        if let Some((dq, dr)) = axial {
            return Self::new(self.q + dq, self.r + dr);
        }

        let (col, row) = self.to_offset(orientation);
        let (dcol, drow) = match direction {
            East => (1, 0),
            West => (-1, 0),
            North => (0, -1),
            _ => (0, 1),
        };
        Self::from_offset(col + dcol, row + drow, orientation)
    }

    /// All 8 compass neighbors in N, NE, E, SE, S, SW, W, NW order.
    /// Two entries always repeat another one.
    pub fn compass_neighbors(&self, orientation: HexOrientation) -> [HexCoord; 8] {
        CompassDirection::all().map(|direction| self.neighbor(direction, orientation))
    }

    /// Hex coordinates in a line from self to other (inclusive)
    pub fn line_to(&self, other: &Self) -> Vec<HexCoord> {
        let n = self.distance(other) as i32;
        if n == 0 {
            return vec![*self];
        }

        // Nudge off exact midpoints so ties always round the same way
        let (q0, r0) = (self.q as f64 + 1e-6, self.r as f64 + 1e-6);
        let (q1, r1) = (other.q as f64 + 1e-6, other.r as f64 + 1e-6);

        let mut results = Vec::with_capacity((n + 1) as usize);
        for i in 0..=n {
            let t = i as f64 / n as f64;
            let q = q0 + (q1 - q0) * t;
            let r = r0 + (r1 - r0) * t;
            results.push(Self::round(q, r));
        }
        results
    }

    /// Round floating point hex to nearest integer hex
    pub fn round(q: f64, r: f64) -> Self {
        let s = -q - r;
        let mut rq = q.round();
        let mut rr = r.round();
        let rs = s.round();

        let q_diff = (rq - q).abs();
        let r_diff = (rr - r).abs();
        let s_diff = (rs - s).abs();

        if q_diff > r_diff && q_diff > s_diff {
            rq = -rr - rs;
        } else if r_diff > s_diff {
            rr = -rq - rs;
        }

        Self::new(rq as i32, rr as i32)
    }
}

impl From<[i32; 2]> for HexCoord {
    fn from([q, r]: [i32; 2]) -> Self {
        Self::new(q, r)
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

/// Eight-way compass used by the known-cell expansion and foe movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompassDirection {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl CompassDirection {
    /// All directions, clockwise from North
    pub fn all() -> [CompassDirection; 8] {
        [
            CompassDirection::North,
            CompassDirection::NorthEast,
            CompassDirection::East,
            CompassDirection::SouthEast,
            CompassDirection::South,
            CompassDirection::SouthWest,
            CompassDirection::West,
            CompassDirection::NorthWest,
        ]
    }

    pub fn opposite(&self) -> Self {
        match self {
            Self::North => Self::South,
            Self::NorthEast => Self::SouthWest,
            Self::East => Self::West,
            Self::SouthEast => Self::NorthWest,
            Self::South => Self::North,
            Self::SouthWest => Self::NorthEast,
            Self::West => Self::East,
            Self::NorthWest => Self::SouthEast,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::AHashSet;
    use proptest::prelude::*;

    #[test]
    fn test_hex_distance_same() {
        let a = HexCoord::new(0, 0);
        assert_eq!(a.distance(&a), 0);
    }

    #[test]
    fn test_hex_distance_adjacent() {
        let a = HexCoord::new(0, 0);
        assert_eq!(a.distance(&HexCoord::new(1, 0)), 1);
        assert_eq!(a.distance(&HexCoord::new(-1, 1)), 1);
        assert_eq!(a.distance(&HexCoord::new(2, -1)), 2);
    }

    #[test]
    fn test_offset_round_trip_negative_columns() {
        for orientation in [HexOrientation::Flat, HexOrientation::Pointy] {
            let coord = HexCoord::new(-3, 2);
            let (col, row) = coord.to_offset(orientation);
            assert_eq!(HexCoord::from_offset(col, row, orientation), coord);
        }
    }

    #[test]
    fn test_flat_compass_neighbors_table() {
        let origin = HexCoord::new(0, 0);
        let neighbors = origin.compass_neighbors(HexOrientation::Flat);

        assert_eq!(neighbors[0], HexCoord::new(0, -1)); // N
        assert_eq!(neighbors[1], HexCoord::new(1, -1)); // NE
        assert_eq!(neighbors[2], HexCoord::new(1, 0)); // E lands on SE for even columns
        assert_eq!(neighbors[3], HexCoord::new(1, 0)); // SE
        assert_eq!(neighbors[4], HexCoord::new(0, 1)); // S
        assert_eq!(neighbors[5], HexCoord::new(-1, 1)); // SW
        assert_eq!(neighbors[6], HexCoord::new(-1, 1)); // W lands on SW
        assert_eq!(neighbors[7], HexCoord::new(-1, 0)); // NW
    }

    #[test]
    fn test_flat_east_on_odd_column() {
        let coord = HexCoord::new(1, 0);
        assert_eq!(
            coord.neighbor(CompassDirection::East, HexOrientation::Flat),
            HexCoord::new(2, -1)
        );
    }

    #[test]
    fn test_compass_neighbors_are_six_distinct_adjacent_cells() {
        for orientation in [HexOrientation::Flat, HexOrientation::Pointy] {
            for coord in [HexCoord::new(0, 0), HexCoord::new(3, -2), HexCoord::new(-5, 1)] {
                let neighbors = coord.compass_neighbors(orientation);
                let distinct: AHashSet<_> = neighbors.iter().copied().collect();
                assert_eq!(distinct.len(), 6);
                assert!(neighbors.iter().all(|n| coord.distance(n) == 1));
            }
        }
    }

    #[test]
    fn test_hex_line() {
        let a = HexCoord::new(0, 0);
        let b = HexCoord::new(3, 0);
        let line = a.line_to(&b);
        assert_eq!(line.len(), 4);
        assert_eq!(line[0], a);
        assert_eq!(line[3], b);
    }

    #[test]
    fn test_direction_opposite() {
        for direction in CompassDirection::all() {
            assert_eq!(direction.opposite().opposite(), direction);
        }
    }

    proptest! {
        #[test]
        fn prop_distance_symmetric(q1 in -50i32..50, r1 in -50i32..50, q2 in -50i32..50, r2 in -50i32..50) {
            let a = HexCoord::new(q1, r1);
            let b = HexCoord::new(q2, r2);
            prop_assert_eq!(a.distance(&b), b.distance(&a));
            prop_assert_eq!(a.distance(&b) == 0, a == b);
        }

        #[test]
        fn prop_line_is_contiguous(q1 in -20i32..20, r1 in -20i32..20, q2 in -20i32..20, r2 in -20i32..20) {
            let a = HexCoord::new(q1, r1);
            let b = HexCoord::new(q2, r2);
            let line = a.line_to(&b);
            prop_assert_eq!(line.len() as u32, a.distance(&b) + 1);
            prop_assert_eq!(line.first().copied(), Some(a));
            prop_assert_eq!(line.last().copied(), Some(b));
            for pair in line.windows(2) {
                prop_assert_eq!(pair[0].distance(&pair[1]), 1);
            }
        }
    }
}
