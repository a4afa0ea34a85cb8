//! Game configuration with documented defaults
//!
//! Everything a match needs at construction time lives here: the roster,
//! the initial visible terrain, the terrain deck composition and the per-turn
//! action budget. Hex geometry is carried along for the renderer only; the
//! rules never read it except to resolve pixel clicks.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, Result};
use crate::hex::{HexCoord, HexOrientation};
use crate::terrain::TerrainType;

/// Configuration for a single match
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === ACTION ECONOMY ===
    /// Maximum action points a player may spend during one turn
    ///
    /// Shared by every legality check: movement, exploration and zone
    /// activation all compare against this value. Tests vary it freely.
    pub max_actions_count_per_turn: u32,

    // === GEOMETRY (forwarded to the renderer) ===
    /// Hex radius in pixels
    pub hex_size: f64,

    /// Flat-topped or pointy-topped hexes
    ///
    /// This also selects which compass directions are resolved through
    /// offset coordinates when expanding the known cells.
    pub hex_orientation: HexOrientation,

    // === ROSTER ===
    /// Players in turn order; the first one opens turn 1
    pub players: Vec<PlayerConfig>,

    /// Foes placed at construction
    pub foes: Vec<FoeConfig>,

    // === BOARD ===
    /// Terrain visible before anyone explores. Must hold exactly one village.
    pub visible_terrain: Vec<TerrainConfig>,

    /// Composition of the deck new terrain is drawn from
    pub terrain_deck: Vec<TerrainDeckEntry>,

    // === STARTUP ===
    /// Optional upper bound on the asset preload awaited by `start()`
    pub preload_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub name: String,
    /// Starting cell; players without one start on the village
    #[serde(default)]
    pub position: Option<[i32; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainConfig {
    #[serde(rename = "type")]
    pub terrain_type: TerrainType,
    pub position: [i32; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoeConfig {
    pub kind: String,
    pub position: [i32; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainDeckEntry {
    #[serde(rename = "type")]
    pub terrain_type: TerrainType,
    pub count: u32,
}

impl PlayerConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: None,
        }
    }

    pub fn at(mut self, position: HexCoord) -> Self {
        self.position = Some([position.q, position.r]);
        self
    }
}

impl TerrainConfig {
    pub fn new(terrain_type: TerrainType, position: HexCoord) -> Self {
        Self {
            terrain_type,
            position: [position.q, position.r],
        }
    }

    pub fn coord(&self) -> HexCoord {
        HexCoord::new(self.position[0], self.position[1])
    }
}

impl FoeConfig {
    pub fn coord(&self) -> HexCoord {
        HexCoord::new(self.position[0], self.position[1])
    }
}

impl TerrainDeckEntry {
    pub fn new(terrain_type: TerrainType, count: u32) -> Self {
        Self {
            terrain_type,
            count,
        }
    }
}

/// Terrain visible at the start of a default match
pub fn default_terrain() -> Vec<TerrainConfig> {
    vec![
        TerrainConfig::new(TerrainType::Village, HexCoord::new(0, 0)),
        TerrainConfig::new(TerrainType::Mountain, HexCoord::new(1, 0)),
        TerrainConfig::new(TerrainType::Forest, HexCoord::new(0, -1)),
        TerrainConfig::new(TerrainType::Plains, HexCoord::new(-1, 1)),
    ]
}

/// Thirteen cards: two of everything except plains, which has three
pub fn default_terrain_deck() -> Vec<TerrainDeckEntry> {
    vec![
        TerrainDeckEntry::new(TerrainType::Mountain, 2),
        TerrainDeckEntry::new(TerrainType::Lake, 2),
        TerrainDeckEntry::new(TerrainType::Forest, 2),
        TerrainDeckEntry::new(TerrainType::Plains, 3),
        TerrainDeckEntry::new(TerrainType::Sanctuary, 2),
        TerrainDeckEntry::new(TerrainType::Mine, 2),
    ]
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_actions_count_per_turn: 7,
            hex_size: 70.0,
            hex_orientation: HexOrientation::Flat,
            players: Vec::new(),
            foes: Vec::new(),
            visible_terrain: default_terrain(),
            terrain_deck: default_terrain_deck(),
            preload_timeout_ms: None,
        }
    }
}

impl GameConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration with the given players, in turn order
    pub fn with_players<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            players: names.into_iter().map(PlayerConfig::new).collect(),
            ..Self::default()
        }
    }

    /// Parse a TOML document; missing keys fall back to defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.max_actions_count_per_turn == 0 {
            return Err(EngineError::InvalidConfig(
                "max_actions_count_per_turn must be at least 1".into(),
            ));
        }

        if self.hex_size.is_nan() || self.hex_size <= 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "hex_size must be positive, got {}",
                self.hex_size
            )));
        }

        if self.players.is_empty() {
            return Err(EngineError::InvalidConfig("at least one player is required".into()));
        }

        let mut names = AHashSet::new();
        for player in &self.players {
            if !names.insert(player.name.as_str()) {
                return Err(EngineError::InvalidConfig(format!(
                    "duplicate player name \"{}\"",
                    player.name
                )));
            }
        }

        let villages = self
            .visible_terrain
            .iter()
            .filter(|t| t.terrain_type == TerrainType::Village)
            .count();
        if villages != 1 {
            return Err(EngineError::VillageCount(villages));
        }

        let mut positions = AHashSet::new();
        for tile in &self.visible_terrain {
            if !positions.insert(tile.coord()) {
                return Err(EngineError::InvalidConfig(format!(
                    "two terrain tiles share position {}",
                    tile.coord()
                )));
            }
        }

        if self
            .terrain_deck
            .iter()
            .any(|entry| entry.terrain_type == TerrainType::Village)
        {
            return Err(EngineError::InvalidConfig(
                "the terrain deck cannot contain a village".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.max_actions_count_per_turn, 7);
        assert_eq!(config.hex_orientation, HexOrientation::Flat);
        assert_eq!(config.visible_terrain.len(), 4);
        let deck_size: u32 = config.terrain_deck.iter().map(|e| e.count).sum();
        assert_eq!(deck_size, 13);
    }

    #[test]
    fn test_validate_requires_players() {
        let config = GameConfig::default();
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));
        assert!(GameConfig::with_players(["Jane"]).validate().is_ok());
    }

    #[test]
    fn test_validate_village_count() {
        let mut config = GameConfig::with_players(["Jane"]);
        config
            .visible_terrain
            .push(TerrainConfig::new(TerrainType::Village, HexCoord::new(3, 3)));
        assert!(matches!(config.validate(), Err(EngineError::VillageCount(2))));

        config.visible_terrain.retain(|t| t.terrain_type != TerrainType::Village);
        assert!(matches!(config.validate(), Err(EngineError::VillageCount(0))));
    }

    #[test]
    fn test_validate_duplicate_names() {
        let config = GameConfig::with_players(["Jane", "Jane"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml() {
        let config = GameConfig::from_toml_str(
            r#"
            max_actions_count_per_turn = 4
            hex_orientation = "pointy"

            [[players]]
            name = "Jane"

            [[players]]
            name = "John"
            position = [1, 0]
            "#,
        )
        .unwrap();

        assert_eq!(config.max_actions_count_per_turn, 4);
        assert_eq!(config.hex_orientation, HexOrientation::Pointy);
        assert_eq!(config.players[1].position, Some([1, 0]));
        assert_eq!(config.visible_terrain, default_terrain());
    }

    #[test]
    fn test_from_toml_unknown_terrain() {
        let err = GameConfig::from_toml_str(
            r#"
            [[players]]
            name = "Jane"

            [[visible_terrain]]
            type = "volcano"
            position = [0, 0]
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Unknown terrain type \"volcano\""));
    }
}
