//! Tick notifications sent to the renderer after every state change

use serde::Serialize;

use crate::core::types::ResourceKind;
use crate::entity::{Foe, Player, Village};
use crate::hex::HexCoord;
use crate::terrain::TerrainTile;

/// Called synchronously, in subscription order
pub type TickSubscriber = Box<dyn FnMut(&TickSnapshot)>;

/// What a renderer needs to redraw the board
#[derive(Debug, Clone, Serialize)]
pub struct TickSnapshot {
    pub turn: u32,
    pub current_player: String,
    pub turn_first_player: String,
    pub players: Vec<Player>,
    pub village: Village,
    pub village_stock: Vec<(ResourceKind, u32)>,
    pub foes: Vec<Foe>,
    pub terrain: Vec<TerrainTile>,
    /// Names of the active persistent events, most recent first
    pub current_events: Vec<String>,
    pub hover_path: Vec<HexCoord>,
    pub known_cells: Vec<HexCoord>,
}

impl TickSnapshot {
    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name() == name)
    }
}
