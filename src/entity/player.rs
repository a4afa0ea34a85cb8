//! Player - a roster member spending a per-turn action budget

use serde::Serialize;

use crate::core::types::ResourceKind;
use crate::events::alteration::CostedAction;
use crate::events::TurnRules;
use crate::hex::HexCoord;
use crate::terrain::{ActionName, TerrainTile, TerrainType, ZoneActivation};

use super::hit_points::HitPoints;
use super::inventory::Inventory;
use super::village::Village;
use super::{GameEntity, PLAYER_MAX_HP};

/// Base cost added on top of the walk when exploring
const BASE_EXPLORATION_COST: u32 = 1;

/// Base yield of every zone action
const BASE_ACTION_YIELD: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HslColor {
    pub hue: f64,
    pub saturation: u8,
    pub lightness: u8,
}

impl HslColor {
    /// Evenly spaced hues around the wheel, one per player
    pub fn for_player(index: usize, player_count: usize) -> Self {
        let hue = if player_count == 0 {
            0.0
        } else {
            (index.saturating_sub(1) as f64) / (player_count as f64) * 360.0
        };
        Self {
            hue,
            saturation: 90,
            lightness: 40,
        }
    }

    pub fn css(&self) -> String {
        format!("hsl({}, {}%, {}%)", self.hue, self.saturation, self.lightness)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Player {
    name: String,
    /// 1-based turn order
    index: usize,
    color: HslColor,
    position: HexCoord,
    hit_points: HitPoints,
    inventory: Inventory,
    actions_spent: u32,
    experience: u32,
    /// Holds the turn pointer
    active: bool,
    /// Moved, explored or activated a zone since the last turn boundary
    acted_this_turn: bool,
}

impl Player {
    pub fn new(name: impl Into<String>, index: usize, player_count: usize, position: HexCoord) -> Self {
        Self {
            name: name.into(),
            index,
            color: HslColor::for_player(index, player_count),
            position,
            hit_points: HitPoints::full(PLAYER_MAX_HP),
            inventory: Inventory::new(),
            actions_spent: 0,
            experience: 0,
            active: false,
            acted_this_turn: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn color(&self) -> HslColor {
        self.color
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub fn has_resource(&self, resource: ResourceKind, amount: u32) -> bool {
        self.inventory.has(resource, amount)
    }

    pub fn actions_spent(&self) -> u32 {
        self.actions_spent
    }

    pub fn experience(&self) -> u32 {
        self.experience
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn has_acted(&self) -> bool {
        self.acted_this_turn
    }

    /// Count as done for the day without spending anything
    pub fn mark_acted(&mut self) {
        self.acted_this_turn = true;
    }

    pub fn is_full_hp(&self) -> bool {
        self.hit_points.is_full()
    }

    /// Remaining action points this turn
    pub fn remaining_actions(&self, rules: &TurnRules) -> u32 {
        rules.max_actions.saturating_sub(self.actions_spent)
    }

    // === COSTS ===

    pub fn movement_cost(&self, distance: u32, destination: Option<TerrainType>, rules: &TurnRules) -> u32 {
        rules.action_cost(self.position, CostedAction::Move, destination, distance)
    }

    pub fn exploration_cost(&self, rules: &TurnRules) -> u32 {
        rules.action_cost(self.position, CostedAction::Explore, None, BASE_EXPLORATION_COST)
    }

    fn walk_cost(&self, cell: HexCoord, rules: &TurnRules) -> u32 {
        let distance = self.position.distance(&cell);
        self.movement_cost(distance, rules.terrain_type_at(cell), rules)
    }

    fn explore_cost(&self, cell: HexCoord, rules: &TurnRules) -> u32 {
        let distance = self.position.distance(&cell);
        self.movement_cost(distance, None, rules)
            .saturating_add(self.exploration_cost(rules))
    }

    fn can_afford(&self, cost: u32, rules: &TurnRules) -> bool {
        self.actions_spent.saturating_add(cost) <= rules.max_actions
    }

    // === MOVEMENT ===

    pub fn can_move_to(&self, cell: HexCoord, rules: &TurnRules) -> bool {
        cell != self.position && self.can_afford(self.walk_cost(cell, rules), rules)
    }

    /// Relocate and charge the walk. Legality is the caller's job.
    pub fn move_to(&mut self, cell: HexCoord, rules: &TurnRules) {
        if cell == self.position {
            return;
        }
        let cost = self.walk_cost(cell, rules);
        self.actions_spent = self.actions_spent.saturating_add(cost);
        self.position = cell;
        self.acted_this_turn = true;
    }

    pub fn can_explore(&self, cell: HexCoord, rules: &TurnRules) -> bool {
        cell != self.position && self.can_afford(self.explore_cost(cell, rules), rules)
    }

    /// Relocate onto a cell without terrain. Must be priced before the new
    /// tile is placed.
    pub fn explore(&mut self, cell: HexCoord, rules: &TurnRules) {
        if cell == self.position {
            return;
        }
        let cost = self.explore_cost(cell, rules);
        self.actions_spent = self.actions_spent.saturating_add(cost);
        self.position = cell;
        self.acted_this_turn = true;
    }

    // === ZONES ===

    /// Cheap pre-check: the tile offers something and one point is left
    pub fn can_activate_zone(&self, tile: &TerrainTile, rules: &TurnRules) -> bool {
        !tile.possible_actions().is_empty() && self.can_afford(1, rules)
    }

    /// Action points actually charged for `action` here
    pub fn zone_cost(&self, action: &ZoneActivation, rules: &TurnRules) -> u32 {
        rules.action_cost(self.position, CostedAction::Zone(action.name), None, action.cost)
    }

    pub fn can_afford_zone(&self, action: &ZoneActivation, rules: &TurnRules) -> bool {
        self.inventory.has_all(&action.resource_cost)
            && self.can_afford(self.zone_cost(action, rules), rules)
    }

    fn action_yield(&self, action: ActionName, rules: &TurnRules) -> u32 {
        rules.action_reward(self.position, action, BASE_ACTION_YIELD)
    }

    /// Charge points, consume resources and grant experience
    fn perform(&mut self, action: &ZoneActivation, rules: &TurnRules) -> u32 {
        let cost = self.zone_cost(action, rules);
        self.actions_spent = self.actions_spent.saturating_add(cost);
        self.inventory.consume_all(&action.resource_cost);
        self.experience = self.experience.saturating_add(action.experience_gain);
        self.acted_this_turn = true;
        self.action_yield(action.name, rules)
    }

    pub fn gather_food_at(&mut self, action: &ZoneActivation, rules: &TurnRules) {
        let amount = self.perform(action, rules);
        self.inventory.add(ResourceKind::Food, amount);
    }

    pub fn gather_wood_at(&mut self, action: &ZoneActivation, rules: &TurnRules) {
        let amount = self.perform(action, rules);
        self.inventory.add(ResourceKind::Wood, amount);
    }

    pub fn gather_minerals_at(&mut self, action: &ZoneActivation, rules: &TurnRules) {
        let amount = self.perform(action, rules);
        self.inventory.add(ResourceKind::Minerals, amount);
    }

    pub fn heal_at(&mut self, action: &ZoneActivation, rules: &TurnRules) {
        let amount = self.perform(action, rules);
        self.hit_points.heal(amount);
    }

    pub fn repair_village(&mut self, action: &ZoneActivation, village: &mut Village, rules: &TurnRules) {
        let amount = self.perform(action, rules);
        village.repair(amount);
    }

    pub fn build_barricade(&mut self, action: &ZoneActivation, village: &mut Village, rules: &TurnRules) {
        let amount = self.perform(action, rules);
        village.add_barricades(amount);
    }

    // === TURN ===

    /// Turn boundary reset
    pub fn new_turn(&mut self) {
        self.actions_spent = 0;
        self.acted_this_turn = false;
    }

    /// Hand one unit over; false if none is held
    pub fn take_resource(&mut self, resource: ResourceKind) -> bool {
        self.inventory.remove(resource, 1)
    }
}

impl GameEntity for Player {
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
    use crate::events::{DailyEvent, EventTable};
    use crate::terrain::zone_action;
    use proptest::prelude::*;

    fn board() -> Vec<TerrainTile> {
        vec![
            TerrainTile::new(TerrainType::Village, HexCoord::new(0, 0)),
            TerrainTile::new(TerrainType::Mountain, HexCoord::new(1, 0)),
            TerrainTile::new(TerrainType::Forest, HexCoord::new(0, -1)),
            TerrainTile::new(TerrainType::Plains, HexCoord::new(-1, 1)),
        ]
    }

    fn player_at(position: HexCoord) -> Player {
        Player::new("Alice", 1, 4, position)
    }

    #[test]
    fn test_player_colors_are_spread() {
        assert_eq!(HslColor::for_player(1, 4).hue, 0.0);
        assert_eq!(HslColor::for_player(3, 4).hue, 180.0);
        assert_eq!(HslColor::for_player(2, 4).css(), "hsl(90, 90%, 40%)");
    }

    #[test]
    fn test_move_charges_distance() {
        let terrain = board();
        let rules = TurnRules::new(7, &[], &terrain);
        let mut player = player_at(HexCoord::new(0, 0));

        assert!(!player.can_move_to(HexCoord::new(0, 0), &rules));
        assert!(player.can_move_to(HexCoord::new(1, 0), &rules));

        player.move_to(HexCoord::new(1, 0), &rules);
        assert_eq!(player.actions_spent(), 1);
        assert_eq!(player.position(), HexCoord::new(1, 0));
        assert!(player.has_acted());

        // Zero distance is a no-op
        player.move_to(HexCoord::new(1, 0), &rules);
        assert_eq!(player.actions_spent(), 1);
    }

    #[test]
    fn test_budget_limits_movement() {
        let rules = TurnRules::unmodified(2);
        let player = player_at(HexCoord::new(0, 0));

        assert!(player.can_move_to(HexCoord::new(2, 0), &rules));
        assert!(!player.can_move_to(HexCoord::new(3, 0), &rules));
        // Exploring two cells away costs 2 + 1
        assert!(player.can_explore(HexCoord::new(1, 0), &rules));
        assert!(!player.can_explore(HexCoord::new(2, 0), &rules));
    }

    #[test]
    fn test_explore_includes_exploration_cost() {
        let rules = TurnRules::unmodified(7);
        let mut player = player_at(HexCoord::new(0, 0));

        player.explore(HexCoord::new(0, 1), &rules);
        assert_eq!(player.actions_spent(), 2);
    }

    #[test]
    fn test_persistent_surcharge_applies_to_moves() {
        let terrain = board();
        let events: Vec<DailyEvent> = vec![EventTable::builtin().unwrap().get("Blizzard").unwrap().clone()];
        let rules = TurnRules::new(7, &events, &terrain);
        let mut player = player_at(HexCoord::new(0, 0));

        player.move_to(HexCoord::new(0, -1), &rules);
        assert_eq!(player.actions_spent(), 2);
    }

    #[test]
    fn test_gathering_and_experience() {
        let rules = TurnRules::unmodified(7);
        let mut player = player_at(HexCoord::new(0, -1));

        let wood = zone_action(TerrainType::Forest, ActionName::GatherWood).unwrap();
        for _ in 0..3 {
            player.gather_wood_at(&wood, &rules);
        }
        assert_eq!(player.inventory().get(ResourceKind::Wood), 3);
        assert_eq!(player.actions_spent(), 3);

        let barricade = zone_action(TerrainType::Village, ActionName::BuildBarricade).unwrap();
        let terrain = board();
        let mut village = Village::locate(&terrain).unwrap();
        assert!(player.can_afford_zone(&barricade, &rules));
        player.build_barricade(&barricade, &mut village, &rules);

        assert_eq!(village.barricades(), 1);
        assert_eq!(player.experience(), 1);
        assert!(player.inventory().is_empty());
        assert!(!player.can_afford_zone(&barricade, &rules));
    }

    #[test]
    fn test_can_activate_zone_needs_actions_offered() {
        let rules = TurnRules::unmodified(7);
        let player = player_at(HexCoord::new(1, 0));
        let mountain = TerrainTile::new(TerrainType::Mountain, HexCoord::new(1, 0));
        let lake = TerrainTile::new(TerrainType::Lake, HexCoord::new(1, 0));

        assert!(!player.can_activate_zone(&mountain, &rules));
        assert!(player.can_activate_zone(&lake, &rules));
        assert!(!player.can_activate_zone(&lake, &TurnRules::unmodified(0)));
    }

    #[test]
    fn test_new_turn_resets_budget() {
        let rules = TurnRules::unmodified(7);
        let mut player = player_at(HexCoord::new(0, 0));
        player.move_to(HexCoord::new(2, -1), &rules);
        player.new_turn();
        assert_eq!(player.actions_spent(), 0);
        assert!(!player.has_acted());
    }

    proptest! {
        #[test]
        fn prop_predicates_do_not_mutate(q in -5i32..5, r in -5i32..5, budget in 0u32..10) {
            let terrain = board();
            let rules = TurnRules::new(budget, &[], &terrain);
            let player = player_at(HexCoord::new(0, 0));
            let cell = HexCoord::new(q, r);

            let first = (player.can_move_to(cell, &rules), player.can_explore(cell, &rules));
            let second = (player.can_move_to(cell, &rules), player.can_explore(cell, &rules));
            prop_assert_eq!(first, second);
            prop_assert_eq!(player.actions_spent(), 0);
            prop_assert_eq!(player.position(), HexCoord::new(0, 0));
        }
    }
}
