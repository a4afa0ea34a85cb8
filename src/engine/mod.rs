//! Turn and action controller
//!
//! `GameEngine` owns the whole match: the board, both decks, the randomness
//! provider and the tick subscribers. Every operation other than `start` and
//! the plain board observers requires a running game.
//!
//! Within one tick the order is fixed: turn advancement (and the daily event
//! drawn at a boundary), then frontier expansion, then subscriber
//! notification.

pub mod preload;
pub mod state;
pub mod tick;

pub use preload::{terrain_asset_keys, AssetPreloader, NoAssets, PreloadFuture};
pub use state::GameState;
pub use tick::{TickSnapshot, TickSubscriber};

use std::time::Duration;

use crate::core::config::GameConfig;
use crate::core::error::{EngineError, Result};
use crate::core::types::ResourceKind;
use crate::entity::{Foe, GameEntity, Inventory, Player, Village};
use crate::events::{
    apply_one_off, apply_persistent_turn_effects, push_active, DailyEvent, EventDeck, EventTable,
    TurnRules,
};
use crate::hex::{HexCoord, HexGrid, Point};
use crate::random::RandomnessProvider;
use crate::terrain::{tile_at, zone_action, ActionName, TerrainDeck, TerrainTile, TerrainType, ZoneActivation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    NotStarted,
    Running,
}

pub struct GameEngine {
    config: GameConfig,
    state: GameState,
    randomness: Box<dyn RandomnessProvider>,
    preloader: Box<dyn AssetPreloader>,
    terrain_deck: TerrainDeck,
    event_deck: EventDeck,
    /// Active persistent events, most recent first
    current_events: Vec<DailyEvent>,
    status: GameStatus,
    current_turn: u32,
    current_player: usize,
    turn_first_player: usize,
    hover_path: Vec<HexCoord>,
    subscribers: Vec<TickSubscriber>,
}

impl GameEngine {
    /// Build a match with the built-in daily events
    pub fn new(config: GameConfig, randomness: impl RandomnessProvider + 'static) -> Result<Self> {
        Self::with_event_table(config, EventTable::builtin()?, randomness)
    }

    pub fn with_event_table(
        config: GameConfig,
        events: EventTable,
        randomness: impl RandomnessProvider + 'static,
    ) -> Result<Self> {
        config.validate()?;
        events.validate()?;

        let state = GameState::from_config(&config)?;
        let terrain_deck = TerrainDeck::from_entries(&config.terrain_deck);

        tracing::debug!(
            players = state.players.len(),
            tiles = state.terrain.len(),
            known_cells = state.grid.len(),
            terrain_deck = terrain_deck.len(),
            "game created"
        );

        Ok(Self {
            config,
            state,
            randomness: Box::new(randomness),
            preloader: Box::new(NoAssets),
            terrain_deck,
            event_deck: EventDeck::new(events),
            current_events: Vec::new(),
            status: GameStatus::NotStarted,
            current_turn: 0,
            current_player: 0,
            turn_first_player: 0,
            hover_path: Vec::new(),
            subscribers: Vec::new(),
        })
    }

    pub fn with_preloader(mut self, preloader: impl AssetPreloader + 'static) -> Self {
        self.preloader = Box::new(preloader);
        self
    }

    /// Preload assets, then open turn 1
    pub async fn start(&mut self) -> Result<()> {
        if self.status == GameStatus::Running {
            return Err(EngineError::AlreadyRunning);
        }
        self.status = GameStatus::Running;

        let timeout_ms = self.config.preload_timeout_ms;
        let preload = self.preloader.preload();
        let outcome = match timeout_ms {
            Some(ms) => tokio::time::timeout(Duration::from_millis(ms), preload)
                .await
                .unwrap_or(Err(EngineError::PreloadTimeout(ms))),
            None => preload.await,
        };
        if let Err(err) = outcome {
            self.status = GameStatus::NotStarted;
            return Err(err);
        }

        self.current_turn = 1;
        self.current_player = 0;
        self.turn_first_player = 0;
        self.state.players[0].activate();
        tracing::info!(
            players = self.state.players.len(),
            first = self.state.players[0].name(),
            "game started"
        );

        self.open_day()?;
        self.state.expand_frontier();
        self.emit_tick();
        Ok(())
    }

    fn require_running(&self) -> Result<()> {
        match self.status {
            GameStatus::Running => Ok(()),
            GameStatus::NotStarted => Err(EngineError::NotRunning),
        }
    }

    // === OBSERVERS ===

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn current_player(&self) -> Result<&Player> {
        self.require_running()?;
        Ok(&self.state.players[self.current_player])
    }

    pub fn current_turn(&self) -> Result<u32> {
        self.require_running()?;
        Ok(self.current_turn)
    }

    /// Name of the player who opened the current turn
    pub fn current_turn_first_player(&self) -> Result<&str> {
        self.require_running()?;
        Ok(self.state.players[self.turn_first_player].name())
    }

    pub fn players(&self) -> &[Player] {
        &self.state.players
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.state.player_index(name).map(|i| &self.state.players[i])
    }

    pub fn foes(&self) -> &[Foe] {
        &self.state.foes
    }

    pub fn terrain(&self) -> &[TerrainTile] {
        &self.state.terrain
    }

    pub fn village(&self) -> &Village {
        &self.state.village
    }

    pub fn village_inventory(&self) -> Option<&Inventory> {
        self.state.village.inventory(&self.state.terrain)
    }

    pub fn current_events(&self) -> &[DailyEvent] {
        &self.current_events
    }

    pub fn grid(&self) -> &HexGrid {
        &self.state.grid
    }

    pub fn terrain_deck(&self) -> &TerrainDeck {
        &self.terrain_deck
    }

    pub fn event_deck(&self) -> &EventDeck {
        &self.event_deck
    }

    pub fn hover_path(&self) -> &[HexCoord] {
        &self.hover_path
    }

    /// Pricing context for the current board
    pub fn turn_rules(&self) -> TurnRules<'_> {
        TurnRules::new(
            self.config.max_actions_count_per_turn,
            &self.current_events,
            &self.state.terrain,
        )
    }

    // === INPUT ===

    /// Pixel click from the input layer; points off the known grid are ignored
    pub fn click(&mut self, point: Point) -> Result<bool> {
        self.require_running()?;
        match self.state.grid.point_to_cell(point) {
            Some(cell) => self.move_current_player_to(cell),
            None => Ok(false),
        }
    }

    /// Preview the path to `cell`, cleared when the current player cannot go there
    pub fn mouse_move(&mut self, cell: HexCoord) -> Result<()> {
        self.require_running()?;
        let player = &self.state.players[self.current_player];
        let rules = self.turn_rules();
        let reachable = if tile_at(&self.state.terrain, cell).is_some() {
            player.can_move_to(cell, &rules)
        } else {
            self.state.grid.contains(&cell) && player.can_explore(cell, &rules)
        };

        self.hover_path = if reachable {
            self.state.grid.trace_line(player.position(), cell)
        } else {
            Vec::new()
        };
        self.emit_tick();
        Ok(())
    }

    // === ACTIONS ===

    /// Move onto known terrain, or explore an empty cell.
    ///
    /// `Ok(false)` when the move is illegal. Exploring with an empty terrain
    /// deck is an error.
    pub fn move_current_player_to(&mut self, cell: HexCoord) -> Result<bool> {
        self.require_running()?;
        if !self.state.grid.contains(&cell) {
            tracing::debug!(%cell, "target cell is not known, ignoring");
            return Ok(false);
        }

        let index = self.current_player;
        let rules = TurnRules::new(
            self.config.max_actions_count_per_turn,
            &self.current_events,
            &self.state.terrain,
        );

        if tile_at(&self.state.terrain, cell).is_some() {
            if !self.state.players[index].can_move_to(cell, &rules) {
                tracing::debug!(%cell, "move not allowed");
                return Ok(false);
            }
            self.state.players[index].move_to(cell, &rules);
            tracing::debug!(player = self.state.players[index].name(), %cell, "moved");
        } else {
            if !self.state.players[index].can_explore(cell, &rules) {
                tracing::debug!(%cell, "exploration not allowed");
                return Ok(false);
            }
            let tile = self
                .terrain_deck
                .draw_terrain_for(cell, self.randomness.as_mut())?;
            self.state.players[index].explore(cell, &rules);
            tracing::debug!(
                player = self.state.players[index].name(),
                %cell,
                terrain = %tile.terrain_type(),
                "explored"
            );
            self.state.terrain.push(tile);
        }

        self.finish_action()?;
        Ok(true)
    }

    /// Zone actions the current player could perform right now
    pub fn available_actions(&self) -> Result<Vec<ZoneActivation>> {
        self.require_running()?;
        Ok(self.actions_for(self.current_player))
    }

    fn actions_for(&self, index: usize) -> Vec<ZoneActivation> {
        let player = &self.state.players[index];
        let Some(tile) = tile_at(&self.state.terrain, player.position()) else {
            return Vec::new();
        };
        tile.possible_actions()
            .into_iter()
            .filter(|action| self.zone_allowed(index, action))
            .collect()
    }

    /// Any move, exploration or zone action still open to the player
    fn has_legal_action(&self, index: usize) -> bool {
        if !self.actions_for(index).is_empty() {
            return true;
        }
        let player = &self.state.players[index];
        let rules = self.turn_rules();
        self.state.grid.cells().iter().any(|cell| {
            if tile_at(&self.state.terrain, *cell).is_some() {
                player.can_move_to(*cell, &rules)
            } else {
                !self.terrain_deck.is_empty() && player.can_explore(*cell, &rules)
            }
        })
    }

    pub fn can_activate_zone(&self, action: ActionName) -> Result<bool> {
        self.require_running()?;
        let player = &self.state.players[self.current_player];
        let allowed = tile_at(&self.state.terrain, player.position())
            .and_then(|tile| zone_action(tile.terrain_type(), action))
            .is_some_and(|zone| self.zone_allowed(self.current_player, &zone));
        Ok(allowed)
    }

    /// Same as [`GameEngine::activate_zone`] for an action given by name.
    /// Unknown names are fatal.
    pub fn activate_zone_by_name(&mut self, player: &str, action: &str) -> Result<bool> {
        self.require_running()?;
        let action: ActionName = action.parse()?;
        self.activate_zone(player, action)
    }

    /// Perform a zone action for `player`. Only the current player may act.
    pub fn activate_zone(&mut self, player: &str, action: ActionName) -> Result<bool> {
        self.require_running()?;
        let index = self
            .state
            .player_index(player)
            .ok_or_else(|| EngineError::PlayerNotFound(player.to_string()))?;
        if index != self.current_player {
            tracing::debug!(player, "not this player's turn, ignoring");
            return Ok(false);
        }

        let position = self.state.players[index].position();
        let Some(zone) = tile_at(&self.state.terrain, position)
            .and_then(|tile| zone_action(tile.terrain_type(), action))
        else {
            tracing::debug!(player, %action, "action not offered here");
            return Ok(false);
        };
        if !self.zone_allowed(index, &zone) {
            tracing::debug!(player, %action, "action not allowed");
            return Ok(false);
        }

        let rules = TurnRules::new(
            self.config.max_actions_count_per_turn,
            &self.current_events,
            &self.state.terrain,
        );
        let actor = &mut self.state.players[index];
        match action {
            ActionName::GatherFood => actor.gather_food_at(&zone, &rules),
            ActionName::GatherWood => actor.gather_wood_at(&zone, &rules),
            ActionName::GatherMinerals => actor.gather_minerals_at(&zone, &rules),
            ActionName::HealSelf => actor.heal_at(&zone, &rules),
            ActionName::RepairVillage => actor.repair_village(&zone, &mut self.state.village, &rules),
            ActionName::BuildBarricade => actor.build_barricade(&zone, &mut self.state.village, &rules),
        }
        tracing::debug!(player, %action, spent = actor.actions_spent(), "zone activated");

        self.finish_action()?;
        Ok(true)
    }

    /// Resources, budget and the terrain-specific rule for one action
    fn zone_allowed(&self, index: usize, zone: &ZoneActivation) -> bool {
        let player = &self.state.players[index];
        let rules = self.turn_rules();
        let Some(tile) = tile_at(&self.state.terrain, player.position()) else {
            return false;
        };
        if !player.can_activate_zone(tile, &rules) || !player.can_afford_zone(zone, &rules) {
            return false;
        }

        let on_village = player.position() == self.state.village.position();
        let terrain = tile.terrain_type();
        match zone.name {
            ActionName::RepairVillage => on_village && self.state.village.is_damaged(),
            ActionName::BuildBarricade => on_village,
            ActionName::HealSelf => {
                !player.is_full_hp() && matches!(terrain, TerrainType::Village | TerrainType::Sanctuary)
            }
            ActionName::GatherFood => matches!(terrain, TerrainType::Lake | TerrainType::Forest),
            ActionName::GatherWood => terrain == TerrainType::Forest,
            ActionName::GatherMinerals => terrain == TerrainType::Mine,
        }
    }

    /// Hand the turn pointer over without acting.
    ///
    /// A player left with nothing legal to do counts as done for the day, so
    /// the turn still ends.
    pub fn go_to_next_player(&mut self) -> Result<bool> {
        self.require_running()?;
        let index = self.current_player;
        if !self.state.players[index].has_acted() && !self.has_legal_action(index) {
            tracing::debug!(player = self.state.players[index].name(), "no legal action left");
            self.state.players[index].mark_acted();
        }
        self.finish_action()?;
        Ok(true)
    }

    /// Drop one unit into the village stock. Free, and the turn does not pass.
    pub fn drop_resource(&mut self, resource: ResourceKind) -> Result<bool> {
        self.require_running()?;
        let index = self.current_player;
        if self.state.players[index].position() != self.state.village.position()
            || !self.state.players[index].take_resource(resource)
        {
            return Ok(false);
        }

        if let Some(stock) = self.state.village.inventory_mut(&mut self.state.terrain) {
            stock.add(resource, 1);
        }
        tracing::debug!(player = self.state.players[index].name(), %resource, "resource dropped");
        self.emit_tick();
        Ok(true)
    }

    pub fn on_tick(&mut self, callback: impl FnMut(&TickSnapshot) + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    // === TURN SEQUENCING ===

    fn finish_action(&mut self) -> Result<()> {
        self.hover_path.clear();
        self.advance_pointer()?;
        self.state.expand_frontier();
        self.emit_tick();
        Ok(())
    }

    fn advance_pointer(&mut self) -> Result<()> {
        let count = self.state.players.len();
        self.state.players[self.current_player].deactivate();

        if self.state.players.iter().all(Player::has_acted) {
            self.begin_new_turn()?;
        } else {
            self.current_player = (self.current_player + 1) % count;
        }

        self.state.players[self.current_player].activate();
        Ok(())
    }

    fn begin_new_turn(&mut self) -> Result<()> {
        let count = self.state.players.len();
        self.current_turn += 1;
        self.turn_first_player = (self.turn_first_player + 1) % count;
        self.current_player = self.turn_first_player;

        for player in &mut self.state.players {
            player.new_turn();
        }
        for foe in &mut self.state.foes {
            foe.new_turn();
        }

        tracing::info!(
            turn = self.current_turn,
            first = self.state.players[self.turn_first_player].name(),
            "new turn"
        );
        self.open_day()
    }

    /// Draw the daily event and apply per-turn persistent effects
    fn open_day(&mut self) -> Result<()> {
        let event = self
            .event_deck
            .draw(self.randomness.as_mut(), &self.current_events)?;
        tracing::info!(
            turn = self.current_turn,
            event = %event.name,
            polarity = ?event.polarity,
            duration = ?event.duration,
            "daily event drawn"
        );

        if event.is_one_off() {
            apply_one_off(&event, &mut self.state, self.current_player)?;
        } else if let Some(expired) = push_active(&mut self.current_events, event) {
            tracing::info!(event = %expired.name, "persistent event expired");
        }

        apply_persistent_turn_effects(&self.current_events, &mut self.state, self.current_player)
    }

    fn snapshot(&self) -> TickSnapshot {
        TickSnapshot {
            turn: self.current_turn,
            current_player: self.state.players[self.current_player].name().to_string(),
            turn_first_player: self.state.players[self.turn_first_player].name().to_string(),
            players: self.state.players.clone(),
            village: self.state.village.clone(),
            village_stock: self
                .village_inventory()
                .map(Inventory::entries)
                .unwrap_or_default(),
            foes: self.state.foes.clone(),
            terrain: self.state.terrain.clone(),
            current_events: self.current_events.iter().map(|e| e.name.clone()).collect(),
            hover_path: self.hover_path.clone(),
            known_cells: self.state.grid.cells().to_vec(),
        }
    }

    fn emit_tick(&mut self) {
        if self.subscribers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for subscriber in &mut self.subscribers {
            subscriber(&snapshot);
        }
    }
}
