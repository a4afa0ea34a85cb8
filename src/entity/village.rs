//! Village - the single shared base

use serde::Serialize;

use crate::core::error::{EngineError, Result};
use crate::hex::HexCoord;
use crate::terrain::{TerrainTile, TerrainType};

use super::hit_points::HitPoints;
use super::inventory::Inventory;
use super::{GameEntity, VILLAGE_MAX_HP};

/// The village does not own an inventory. Its stock lives on the village
/// tile and is reached through `tile_index` into the terrain list.
#[derive(Debug, Clone, Serialize)]
pub struct Village {
    tile_index: usize,
    position: HexCoord,
    hit_points: HitPoints,
    barricades: u32,
}

impl Village {
    /// Find the one village tile on the board
    pub fn locate(terrain: &[TerrainTile]) -> Result<Self> {
        let mut villages = terrain
            .iter()
            .enumerate()
            .filter(|(_, tile)| tile.terrain_type() == TerrainType::Village);

        match (villages.next(), villages.count()) {
            (Some((tile_index, tile)), 0) => Ok(Self {
                tile_index,
                position: tile.position(),
                hit_points: HitPoints::full(VILLAGE_MAX_HP),
                barricades: 0,
            }),
            (None, _) => Err(EngineError::VillageCount(0)),
            (Some(_), others) => Err(EngineError::VillageCount(others + 1)),
        }
    }

    pub fn tile_index(&self) -> usize {
        self.tile_index
    }

    pub fn barricades(&self) -> u32 {
        self.barricades
    }

    pub fn add_barricades(&mut self, count: u32) {
        self.barricades = self.barricades.saturating_add(count);
    }

    pub fn repair(&mut self, amount: u32) {
        self.hit_points.heal(amount);
    }

    pub fn is_damaged(&self) -> bool {
        !self.hit_points.is_full()
    }

    pub fn inventory<'t>(&self, terrain: &'t [TerrainTile]) -> Option<&'t Inventory> {
        terrain.get(self.tile_index).map(TerrainTile::inventory)
    }

    pub fn inventory_mut<'t>(&self, terrain: &'t mut [TerrainTile]) -> Option<&'t mut Inventory> {
        terrain.get_mut(self.tile_index).map(TerrainTile::inventory_mut)
    }
}

impl GameEntity for Village {
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
    use crate::core::types::ResourceKind;

    #[test]
    fn test_locate_requires_exactly_one_village() {
        let none = vec![TerrainTile::new(TerrainType::Lake, HexCoord::new(0, 0))];
        assert!(matches!(Village::locate(&none), Err(EngineError::VillageCount(0))));

        let two = vec![
            TerrainTile::new(TerrainType::Village, HexCoord::new(0, 0)),
            TerrainTile::new(TerrainType::Village, HexCoord::new(3, 0)),
        ];
        assert!(matches!(Village::locate(&two), Err(EngineError::VillageCount(2))));
    }

    #[test]
    fn test_inventory_is_the_tile_inventory() {
        let mut terrain = vec![
            TerrainTile::new(TerrainType::Forest, HexCoord::new(1, 0)),
            TerrainTile::new(TerrainType::Village, HexCoord::new(0, 0)),
        ];
        let village = Village::locate(&terrain).unwrap();
        assert_eq!(village.tile_index(), 1);

        village
            .inventory_mut(&mut terrain)
            .unwrap()
            .add(ResourceKind::Wood, 2);
        assert_eq!(terrain[1].inventory().get(ResourceKind::Wood), 2);
        assert_eq!(village.inventory(&terrain).unwrap().get(ResourceKind::Wood), 2);
    }
}
