use serde::Serialize;

use crate::hex::{CompassDirection, HexCoord, HexOrientation};

use super::hit_points::HitPoints;
use super::inventory::Inventory;
use super::{GameEntity, FOE_MAX_HP};

/// A hostile entity. Foes wander the board; combat is not modelled.
#[derive(Debug, Clone, Serialize)]
pub struct Foe {
    kind: String,
    position: HexCoord,
    hit_points: HitPoints,
    inventory: Inventory,
    actions_spent: u32,
}

impl Foe {
    pub fn new(kind: impl Into<String>, position: HexCoord) -> Self {
        Self {
            kind: kind.into(),
            position,
            hit_points: HitPoints::full(FOE_MAX_HP),
            inventory: Inventory::new(),
            actions_spent: 0,
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub fn actions_spent(&self) -> u32 {
        self.actions_spent
    }

    /// One step along the compass table
    pub fn go_to_direction(&mut self, direction: CompassDirection, orientation: HexOrientation) {
        let target = self.position.neighbor(direction, orientation);
        self.actions_spent = self
            .actions_spent
            .saturating_add(self.position.distance(&target));
        self.position = target;
    }

    pub fn new_turn(&mut self) {
        self.actions_spent = 0;
    }
}

impl GameEntity for Foe {
    fn position(&self) -> HexCoord {
        self.position
    }

    fn hit_points(&self) -> &HitPoints {
        &self.hit_points
    }

    fn hit_points_mut(&mut self) -> &mut HitPoints {
        &mut self.hit_points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foe_walks_one_step() {
        let mut foe = Foe::new("wolf", HexCoord::new(0, 0));
        assert_eq!(foe.max_hit_points(), 5);

        foe.go_to_direction(CompassDirection::North, HexOrientation::Flat);
        assert_eq!(foe.position().distance(&HexCoord::new(0, 0)), 1);
        assert_eq!(foe.actions_spent(), 1);

        foe.go_to_direction(CompassDirection::South, HexOrientation::Flat);
        assert_eq!(foe.position(), HexCoord::new(0, 0));
        assert_eq!(foe.actions_spent(), 2);
    }
}
