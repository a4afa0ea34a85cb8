//! Terrain tiles, the zone-action table and the terrain deck

pub mod deck;
pub mod tile;
pub mod zone;

pub use deck::TerrainDeck;
pub use tile::{tile_at, TerrainCondition, TerrainTile, TerrainType};
pub use zone::{zone_action, zone_actions_for, ActionName, ZoneActivation};
