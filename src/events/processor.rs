//! Resolving drawn events against the board
//!
//! Target selection and effect application. Cost and reward deltas are not
//! applied here; they are folded into prices by [`super::TurnRules`].

use crate::core::error::{EngineError, Result};
use crate::core::types::EntityProperty;
use crate::engine::GameState;
use crate::entity::{EntityRef, GameEntity, Inventory};
use crate::hex::HexCoord;
use crate::terrain::TerrainTile;

use super::alteration::{AlterationCondition, AlterationEffect, DailyEvent, EventAlteration, TargetEntity};
use super::modifiers::condition_holds;

/// Entities an alteration lands on, in roster order and without repeats.
///
/// An alteration without conditions selects nothing.
pub fn resolve_targets(
    alteration: &EventAlteration,
    state: &GameState,
    current_player: usize,
) -> Vec<EntityRef> {
    if alteration.conditions.is_empty() {
        tracing::warn!(
            effect = alteration.effect.kind(),
            "alteration has no condition, it targets nobody"
        );
        return Vec::new();
    }

    let mut targets = Vec::new();
    for condition in &alteration.conditions {
        for target in condition_targets(condition, state, current_player) {
            if !targets.contains(&target) {
                targets.push(target);
            }
        }
    }
    targets
}

fn condition_targets(
    condition: &AlterationCondition,
    state: &GameState,
    current_player: usize,
) -> Vec<EntityRef> {
    let holds = |position: HexCoord| {
        condition
            .target_condition
            .as_ref()
            .map_or(true, |c| condition_holds(c, position, None, &state.terrain))
    };

    match condition.target_entity {
        None | Some(TargetEntity::AllPlayers) | Some(TargetEntity::PlayerMatchingCondition) => state
            .players
            .iter()
            .enumerate()
            .filter(|(_, player)| holds(player.position()))
            .map(|(index, _)| EntityRef::Player(index))
            .collect(),
        Some(TargetEntity::CurrentPlayer) => state
            .players
            .get(current_player)
            .filter(|player| holds(player.position()))
            .map(|_| EntityRef::Player(current_player))
            .into_iter()
            .collect(),
        Some(TargetEntity::Village) => {
            if holds(state.village.position()) {
                vec![EntityRef::Village]
            } else {
                Vec::new()
            }
        }
        Some(TargetEntity::Enemy) => state
            .foes
            .iter()
            .enumerate()
            .filter(|(_, foe)| holds(foe.position()))
            .map(|(index, _)| EntityRef::Foe(index))
            .collect(),
    }
}

/// Resolve a one-off event immediately
pub fn apply_one_off(event: &DailyEvent, state: &mut GameState, current_player: usize) -> Result<()> {
    for alteration in &event.alterations {
        let targets = resolve_targets(alteration, state, current_player);
        tracing::debug!(
            event = %event.name,
            effect = alteration.effect.kind(),
            targets = targets.len(),
            "applying one-off alteration"
        );
        for target in targets {
            apply_effect(&alteration.effect, target, state)?;
        }
    }
    Ok(())
}

/// Per-turn resource and property deltas of the active persistent events.
/// Persistent alterations without conditions hit every player.
pub fn apply_persistent_turn_effects(
    events: &[DailyEvent],
    state: &mut GameState,
    current_player: usize,
) -> Result<()> {
    for event in events.iter().filter(|e| e.is_persistent()) {
        for alteration in &event.alterations {
            if !matches!(
                alteration.effect,
                AlterationEffect::ResourceDelta { .. } | AlterationEffect::PropertyDelta { .. }
            ) {
                continue;
            }

            let targets = if alteration.conditions.is_empty() {
                (0..state.players.len()).map(EntityRef::Player).collect()
            } else {
                resolve_targets(alteration, state, current_player)
            };
            for target in targets {
                apply_effect(&alteration.effect, target, state)?;
            }
        }
    }
    Ok(())
}

/// Apply one effect to one target
pub fn apply_effect(effect: &AlterationEffect, target: EntityRef, state: &mut GameState) -> Result<()> {
    match effect {
        AlterationEffect::ActionCostDelta { .. } => Err(EngineError::UnsupportedEffect(
            "action cost deltas only exist on persistent events".into(),
        )),
        AlterationEffect::ActionRewardDelta { .. } => Err(EngineError::UnsupportedEffect(
            "action reward deltas only exist on persistent events".into(),
        )),
        AlterationEffect::ResourceDelta {
            resource,
            operator,
            amount,
        } => {
            if let Some(inventory) = inventory_of(state, target) {
                inventory.apply(*operator, *resource, *amount);
            }
            Ok(())
        }
        AlterationEffect::PropertyDelta {
            property,
            operator,
            amount,
        } => match property {
            EntityProperty::Hp => {
                if let Some(entity) = entity_of(state, target) {
                    entity.alter_hit_points(*operator, *amount);
                }
                Ok(())
            }
        },
        AlterationEffect::TerrainReplacement { from, to } => {
            let Some(origin) = position_of(state, target) else {
                return Ok(());
            };
            let closest = state
                .terrain
                .iter()
                .enumerate()
                .filter(|(_, tile)| tile.terrain_type() == *from)
                .min_by_key(|(_, tile)| tile.position().distance(&origin))
                .map(|(index, tile)| (index, tile.position()));

            match closest {
                Some((index, position)) => {
                    tracing::info!(%position, from = %from, to = %to, "terrain replaced");
                    state.terrain[index] = TerrainTile::new(*to, position);
                }
                None => tracing::debug!(from = %from, "no terrain to replace"),
            }
            Ok(())
        }
    }
}

fn inventory_of(state: &mut GameState, target: EntityRef) -> Option<&mut Inventory> {
    match target {
        EntityRef::Player(index) => state.players.get_mut(index).map(|p| p.inventory_mut()),
        EntityRef::Village => state.village.inventory_mut(&mut state.terrain),
        EntityRef::Foe(index) => state.foes.get_mut(index).map(|f| f.inventory_mut()),
    }
}

fn entity_of(state: &mut GameState, target: EntityRef) -> Option<&mut dyn GameEntity> {
    match target {
        EntityRef::Player(index) => state.players.get_mut(index).map(|p| p as &mut dyn GameEntity),
        EntityRef::Village => Some(&mut state.village as &mut dyn GameEntity),
        EntityRef::Foe(index) => state.foes.get_mut(index).map(|f| f as &mut dyn GameEntity),
    }
}

fn position_of(state: &GameState, target: EntityRef) -> Option<HexCoord> {
    match target {
        EntityRef::Player(index) => state.players.get(index).map(|p| p.position()),
        EntityRef::Village => Some(state.village.position()),
        EntityRef::Foe(index) => state.foes.get(index).map(|f| f.position()),
    }
}
