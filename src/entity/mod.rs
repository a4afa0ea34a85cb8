//! Entities on the board: players, the village and foes
//!
//! All three share position and hit points through [`GameEntity`]. Which
//! concrete entity an effect lands on is carried by [`EntityRef`].

pub mod foe;
pub mod hit_points;
pub mod inventory;
pub mod player;
pub mod village;

pub use foe::Foe;
pub use hit_points::HitPoints;
pub use inventory::Inventory;
pub use player::{HslColor, Player};
pub use village::Village;

use crate::core::types::Operator;
use crate::hex::HexCoord;
use crate::terrain::{tile_at, TerrainCondition, TerrainTile};

pub const PLAYER_MAX_HP: u32 = 10;
pub const VILLAGE_MAX_HP: u32 = 10;
/// Placeholder until foes get classes
pub const FOE_MAX_HP: u32 = 5;

/// Capabilities shared by every entity
pub trait GameEntity {
    fn position(&self) -> HexCoord;
    fn hit_points(&self) -> &HitPoints;
    fn hit_points_mut(&mut self) -> &mut HitPoints;

    fn max_hit_points(&self) -> u32 {
        self.hit_points().max()
    }

    fn hp(&self) -> u32 {
        self.hit_points().current()
    }

    fn alter_hit_points(&mut self, operator: Operator, amount: u32) -> u32 {
        self.hit_points_mut().alter(operator, amount)
    }

    fn is_at_terrain(&self, condition: TerrainCondition, terrain: &[TerrainTile]) -> bool {
        is_at_terrain(self.position(), condition, terrain)
    }
}

/// True if `position` holds a tile matching `condition`. `any` always matches.
pub fn is_at_terrain(position: HexCoord, condition: TerrainCondition, terrain: &[TerrainTile]) -> bool {
    match condition {
        TerrainCondition::Any => true,
        TerrainCondition::Is(expected) => {
            tile_at(terrain, position).is_some_and(|tile| tile.terrain_type() == expected)
        }
    }
}

/// Handle to one entity held by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRef {
    /// Position in the player roster
    Player(usize),
    Village,
    /// Position in the foe list
    Foe(usize),
}
