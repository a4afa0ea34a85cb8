//! Terrain deck drawn from when a player explores

use serde::Serialize;

use crate::core::config::TerrainDeckEntry;
use crate::core::error::{EngineError, Result};
use crate::hex::HexCoord;
use crate::random::{RandomnessProvider, NEW_TERRAIN_SLOT};

use super::tile::{TerrainTile, TerrainType};

#[derive(Debug, Clone, Default, Serialize)]
pub struct TerrainDeck {
    cards: Vec<TerrainType>,
}

impl TerrainDeck {
    pub fn new(cards: Vec<TerrainType>) -> Self {
        Self { cards }
    }

    /// Expand (type, count) entries in order
    pub fn from_entries(entries: &[TerrainDeckEntry]) -> Self {
        let cards = entries
            .iter()
            .flat_map(|entry| std::iter::repeat(entry.terrain_type).take(entry.count as usize))
            .collect();
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[TerrainType] {
        &self.cards
    }

    /// Remove one card uniformly at random
    pub fn draw(&mut self, rng: &mut dyn RandomnessProvider) -> Result<TerrainType> {
        if self.cards.is_empty() {
            return Err(EngineError::EmptyTerrainDeck);
        }

        let max = self.cards.len();
        let index = rng.next(NEW_TERRAIN_SLOT, 0, max);
        if index >= max {
            return Err(EngineError::RandomOutOfRange {
                slot: NEW_TERRAIN_SLOT.to_string(),
                value: index,
                min: 0,
                max,
            });
        }

        Ok(self.cards.remove(index))
    }

    /// Draw a card and build the tile for `cell`
    pub fn draw_terrain_for(
        &mut self,
        cell: HexCoord,
        rng: &mut dyn RandomnessProvider,
    ) -> Result<TerrainTile> {
        let terrain_type = self.draw(rng)?;
        tracing::debug!(%cell, terrain = %terrain_type, remaining = self.cards.len(), "drew terrain");
        Ok(TerrainTile::new(terrain_type, cell))
    }
}
