use crate::core::config::GameConfig;
use crate::core::error::Result;
use crate::entity::{Foe, GameEntity, Player, Village};
use crate::hex::{HexCoord, HexGrid, HexLayout};
use crate::terrain::TerrainTile;

/// Everything on the board, owned by the engine
#[derive(Debug, Clone)]
pub struct GameState {
    /// Turn order
    pub players: Vec<Player>,
    pub village: Village,
    pub foes: Vec<Foe>,
    /// Tiles in placement order
    pub terrain: Vec<TerrainTile>,
    pub grid: HexGrid,
}

impl GameState {
    /// Lay out the initial board. Players without a position start on the village.
    pub fn from_config(config: &GameConfig) -> Result<Self> {
        let terrain: Vec<TerrainTile> = config
            .visible_terrain
            .iter()
            .map(|t| TerrainTile::new(t.terrain_type, t.coord()))
            .collect();
        let village = Village::locate(&terrain)?;

        let count = config.players.len();
        let players = config
            .players
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let position = p.position.map(HexCoord::from).unwrap_or(village.position());
                Player::new(p.name.clone(), i + 1, count, position)
            })
            .collect();

        let foes = config
            .foes
            .iter()
            .map(|f| Foe::new(f.kind.clone(), f.coord()))
            .collect();

        let grid = HexGrid::new(HexLayout::new(config.hex_size, config.hex_orientation));

        let mut state = Self {
            players,
            village,
            foes,
            terrain,
            grid,
        };

        let tiles: Vec<HexCoord> = state.terrain.iter().map(TerrainTile::position).collect();
        for cell in tiles.iter().copied().chain(state.entity_positions()) {
            state.grid.insert(cell);
        }
        for cell in tiles {
            state.grid.expand_known_set_around(cell);
        }
        state.expand_frontier();
        Ok(state)
    }

    pub fn player_index(&self, name: &str) -> Option<usize> {
        self.players.iter().position(|p| p.name() == name)
    }

    /// Positions of every player, foe and the village
    pub fn entity_positions(&self) -> Vec<HexCoord> {
        self.players
            .iter()
            .map(|p| p.position())
            .chain(self.foes.iter().map(|f| f.position()))
            .chain(std::iter::once(self.village.position()))
            .collect()
    }

    /// Grow the known cells around every entity. Returns the new cells.
    pub fn expand_frontier(&mut self) -> Vec<HexCoord> {
        let mut added = Vec::new();
        for position in self.entity_positions() {
            self.grid.insert(position);
            added.extend(self.grid.expand_known_set_around(position));
        }
        added
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::PlayerConfig;

    #[test]
    fn test_initial_board() {
        let mut config = GameConfig::with_players(["Alice", "Bob"]);
        config.players[1] = PlayerConfig::new("Bob").at(HexCoord::new(4, 0));
        let state = GameState::from_config(&config).unwrap();

        assert_eq!(state.players[0].position(), HexCoord::new(0, 0));
        assert_eq!(state.players[1].position(), HexCoord::new(4, 0));
        assert_eq!(state.players[1].index(), 2);

        for tile in &state.terrain {
            assert!(state.grid.contains(&tile.position()));
            for neighbor in state.grid.neighbors_of(tile.position()) {
                assert!(state.grid.contains(&neighbor));
            }
        }
        assert!(state.grid.contains(&HexCoord::new(5, 0)));
    }

    #[test]
    fn test_frontier_expansion_reports_only_new_cells() {
        let config = GameConfig::with_players(["Alice"]);
        let mut state = GameState::from_config(&config).unwrap();
        assert!(state.expand_frontier().is_empty());
    }
}
