//! Terrain tiles placed on the board

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::EngineError;
use crate::entity::inventory::Inventory;
use crate::hex::HexCoord;

use super::zone::{zone_actions_for, ZoneActivation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum TerrainType {
    Village,
    Mountain,
    Lake,
    Forest,
    Plains,
    Mine,
    Sanctuary,
}

impl TerrainType {
    pub fn all() -> [TerrainType; 7] {
        [
            TerrainType::Village,
            TerrainType::Mountain,
            TerrainType::Lake,
            TerrainType::Forest,
            TerrainType::Plains,
            TerrainType::Mine,
            TerrainType::Sanctuary,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Village => "village",
            Self::Mountain => "mountain",
            Self::Lake => "lake",
            Self::Forest => "forest",
            Self::Plains => "plains",
            Self::Mine => "mine",
            Self::Sanctuary => "sanctuary",
        }
    }

    /// Asset key the renderer loads for this terrain
    pub fn asset_key(&self) -> String {
        format!("tile.{}", self.as_str())
    }
}

impl FromStr for TerrainType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TerrainType::all()
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| EngineError::UnknownTerrainType(s.to_string()))
    }
}

impl TryFrom<String> for TerrainType {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for TerrainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A terrain type, or the `any` wildcard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TerrainCondition {
    Any,
    Is(TerrainType),
}

impl TerrainCondition {
    pub fn matches(&self, terrain: TerrainType) -> bool {
        match self {
            Self::Any => true,
            Self::Is(expected) => *expected == terrain,
        }
    }
}

impl FromStr for TerrainCondition {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => Ok(Self::Any),
            other => other.parse().map(Self::Is),
        }
    }
}

impl TryFrom<String> for TerrainCondition {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TerrainCondition> for String {
    fn from(condition: TerrainCondition) -> Self {
        match condition {
            TerrainCondition::Any => "any".to_string(),
            TerrainCondition::Is(terrain) => terrain.as_str().to_string(),
        }
    }
}

/// A placed tile. Type and position never change; the inventory and the
/// risk counter do.
#[derive(Debug, Clone, Serialize)]
pub struct TerrainTile {
    terrain_type: TerrainType,
    position: HexCoord,
    inventory: Inventory,
    /// Danger accumulated on the tile; nothing reads it yet
    risk: u32,
}

impl TerrainTile {
    pub fn new(terrain_type: TerrainType, position: HexCoord) -> Self {
        Self {
            terrain_type,
            position,
            inventory: Inventory::new(),
            risk: 0,
        }
    }

    pub fn terrain_type(&self) -> TerrainType {
        self.terrain_type
    }

    pub fn position(&self) -> HexCoord {
        self.position
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub fn risk(&self) -> u32 {
        self.risk
    }

    pub fn add_risk(&mut self, amount: u32) {
        self.risk = self.risk.saturating_add(amount);
    }

    pub fn possible_actions(&self) -> Vec<ZoneActivation> {
        zone_actions_for(self.terrain_type)
    }
}

/// Tile at a position, if any
pub fn tile_at(terrain: &[TerrainTile], position: HexCoord) -> Option<&TerrainTile> {
    terrain.iter().find(|tile| tile.position == position)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terrain_type_parsing() {
        assert_eq!("forest".parse::<TerrainType>().unwrap(), TerrainType::Forest);
        let err = "volcano".parse::<TerrainType>().unwrap_err();
        assert!(matches!(err, EngineError::UnknownTerrainType(ref t) if t == "volcano"));
    }

    #[test]
    fn test_terrain_condition_wildcard() {
        let any: TerrainCondition = "any".parse().unwrap();
        assert!(any.matches(TerrainType::Lake));

        let mine: TerrainCondition = "mine".parse().unwrap();
        assert!(mine.matches(TerrainType::Mine));
        assert!(!mine.matches(TerrainType::Lake));
    }

    #[test]
    fn test_tile_inventory_and_risk() {
        let mut tile = TerrainTile::new(TerrainType::Village, HexCoord::new(0, 0));
        assert!(tile.inventory().is_empty());
        tile.add_risk(2);
        assert_eq!(tile.risk(), 2);
        assert_eq!(tile.possible_actions().len(), 3);
    }
}
