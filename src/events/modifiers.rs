//! Folding active persistent events into action costs and rewards
//!
//! Every legality check and every charge goes through [`TurnRules`], so a
//! surcharge from an active event is seen the same way by `can_move_to` and
//! `move_to`.

use crate::entity::is_at_terrain;
use crate::hex::HexCoord;
use crate::terrain::{ActionName, TerrainCondition, TerrainTile, TerrainType};

use super::alteration::{
    AlterationCondition, AlterationEffect, CostedAction, DailyEvent, TargetCondition, TargetEntity,
};

/// Budget and board context for pricing one player's action
#[derive(Debug, Clone, Copy)]
pub struct TurnRules<'a> {
    pub max_actions: u32,
    events: &'a [DailyEvent],
    terrain: &'a [TerrainTile],
}

impl<'a> TurnRules<'a> {
    pub fn new(max_actions: u32, events: &'a [DailyEvent], terrain: &'a [TerrainTile]) -> Self {
        Self {
            max_actions,
            events,
            terrain,
        }
    }

    /// No active event and no board: base costs only
    pub fn unmodified(max_actions: u32) -> TurnRules<'static> {
        TurnRules {
            max_actions,
            events: &[],
            terrain: &[],
        }
    }

    pub fn terrain(&self) -> &'a [TerrainTile] {
        self.terrain
    }

    pub fn events(&self) -> &'a [DailyEvent] {
        self.events
    }

    /// Terrain at `cell`, `None` if the cell is unexplored
    pub fn terrain_type_at(&self, cell: HexCoord) -> Option<TerrainType> {
        crate::terrain::tile_at(self.terrain, cell).map(TerrainTile::terrain_type)
    }

    /// Action points charged to a player standing on `position`.
    ///
    /// `destination` is the terrain being entered, `None` when it is still
    /// unexplored. Events apply in activation order.
    pub fn action_cost(
        &self,
        position: HexCoord,
        action: CostedAction,
        destination: Option<TerrainType>,
        base: u32,
    ) -> u32 {
        let mut cost = base;
        for (effect, conditions) in self.persistent_effects() {
            if let AlterationEffect::ActionCostDelta {
                action: altered,
                operator,
                amount,
            } = effect
            {
                if *altered == action
                    && applies_to_player(conditions, position, destination, self.terrain)
                {
                    cost = operator.apply(cost, *amount);
                }
            }
        }
        cost
    }

    /// Units yielded by a zone action performed on `position`
    pub fn action_reward(&self, position: HexCoord, action: ActionName, base: u32) -> u32 {
        let mut reward = base;
        for (effect, conditions) in self.persistent_effects() {
            if let AlterationEffect::ActionRewardDelta {
                action: altered,
                operator,
                amount,
            } = effect
            {
                if *altered == action && applies_to_player(conditions, position, None, self.terrain) {
                    reward = operator.apply(reward, *amount);
                }
            }
        }
        reward
    }

    fn persistent_effects(&self) -> impl Iterator<Item = (&'a AlterationEffect, &'a [AlterationCondition])> {
        self.events
            .iter()
            .filter(|event| event.is_persistent())
            .flat_map(|event| event.alterations.iter())
            .map(|alteration| (&alteration.effect, alteration.conditions.as_slice()))
    }
}

/// Persistent alterations without conditions apply to every player
fn applies_to_player(
    conditions: &[AlterationCondition],
    position: HexCoord,
    destination: Option<TerrainType>,
    terrain: &[TerrainTile],
) -> bool {
    conditions.is_empty()
        || conditions.iter().any(|condition| {
            targets_players(condition.target_entity)
                && condition
                    .target_condition
                    .as_ref()
                    .map_or(true, |c| condition_holds(c, position, destination, terrain))
        })
}

pub(crate) fn targets_players(entity: Option<TargetEntity>) -> bool {
    matches!(
        entity,
        None | Some(TargetEntity::AllPlayers)
            | Some(TargetEntity::CurrentPlayer)
            | Some(TargetEntity::PlayerMatchingCondition)
    )
}

/// Evaluate a predicate for an entity on `position`
pub(crate) fn condition_holds(
    condition: &TargetCondition,
    position: HexCoord,
    destination: Option<TerrainType>,
    terrain: &[TerrainTile],
) -> bool {
    match condition {
        TargetCondition::PositionedAt { terrains } => terrains
            .iter()
            .any(|expected| is_at_terrain(position, *expected, terrain)),
        TargetCondition::MovingTo { terrains } => terrains.iter().any(|expected| match expected {
            TerrainCondition::Any => true,
            TerrainCondition::Is(t) => destination == Some(*t),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventTable;

    fn board() -> Vec<TerrainTile> {
        vec![
            TerrainTile::new(TerrainType::Village, HexCoord::new(0, 0)),
            TerrainTile::new(TerrainType::Plains, HexCoord::new(-1, 1)),
            TerrainTile::new(TerrainType::Mine, HexCoord::new(1, 0)),
        ]
    }

    fn active(names: &[&str]) -> Vec<DailyEvent> {
        let table = EventTable::builtin().unwrap();
        names.iter().map(|n| table.get(n).unwrap().clone()).collect()
    }

    #[test]
    fn test_unmodified_costs() {
        let rules = TurnRules::unmodified(7);
        let origin = HexCoord::new(0, 0);
        assert_eq!(rules.action_cost(origin, CostedAction::Move, None, 3), 3);
        assert_eq!(rules.action_reward(origin, ActionName::GatherFood, 1), 1);
    }

    #[test]
    fn test_blizzard_taxes_every_move() {
        let terrain = board();
        let events = active(&["Blizzard"]);
        let rules = TurnRules::new(7, &events, &terrain);
        let origin = HexCoord::new(0, 0);

        assert_eq!(
            rules.action_cost(origin, CostedAction::Move, Some(TerrainType::Plains), 1),
            2
        );
        // Unknown destination still matches `any`
        assert_eq!(rules.action_cost(origin, CostedAction::Move, None, 2), 3);
        assert_eq!(rules.action_cost(origin, CostedAction::Explore, None, 1), 1);
    }

    #[test]
    fn test_moving_to_filters_on_destination() {
        let terrain = board();
        let events = active(&["Vents favorables"]);
        let rules = TurnRules::new(7, &events, &terrain);
        let origin = HexCoord::new(0, 0);

        assert_eq!(
            rules.action_cost(origin, CostedAction::Move, Some(TerrainType::Plains), 1),
            0
        );
        assert_eq!(
            rules.action_cost(origin, CostedAction::Move, Some(TerrainType::Mine), 1),
            1
        );
        assert_eq!(rules.action_cost(origin, CostedAction::Move, None, 1), 1);
    }

    #[test]
    fn test_reward_modifiers_stack() {
        let terrain = board();
        let events = active(&["Filon", "Beau temps"]);
        let rules = TurnRules::new(7, &events, &terrain);
        let mine = HexCoord::new(1, 0);

        assert_eq!(rules.action_reward(mine, ActionName::GatherMinerals, 1), 2);
        assert_eq!(rules.action_reward(mine, ActionName::GatherFood, 1), 2);
        assert_eq!(rules.action_reward(mine, ActionName::GatherWood, 1), 1);
    }
}
