//! Daily event table and the consumable deck drawn from it

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, Result};
use crate::random::{RandomnessProvider, NEW_DAILY_EVENT_SLOT};
use crate::terrain::TerrainType;

use super::alteration::{AlterationEffect, DailyEvent, TargetCondition};
use super::MAX_ACTIVE_PERSISTENT_EVENTS;

const DEFAULT_EVENTS: &str = include_str!("../../data/daily_events.toml");

/// The full, ordered list of daily events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTable {
    pub events: Vec<DailyEvent>,
}

impl EventTable {
    pub fn new(events: Vec<DailyEvent>) -> Self {
        Self { events }
    }

    /// Parse and validate a table in the `[[events]]` TOML format
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: EventTable = toml::from_str(content)?;
        table.validate()?;
        Ok(table)
    }

    /// The table shipped in `data/daily_events.toml`
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(DEFAULT_EVENTS)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.events.iter().position(|e| e.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&DailyEvent> {
        self.events.iter().find(|e| e.name == name)
    }

    /// Load-time checks. Everything rejected here would otherwise surface
    /// mid-match.
    pub fn validate(&self) -> Result<()> {
        if self.events.is_empty() {
            return Err(EngineError::InvalidEventDeck("the table holds no event".into()));
        }

        let mut names = AHashSet::new();
        for event in &self.events {
            if !names.insert(event.name.as_str()) {
                return Err(EngineError::InvalidEventDeck(format!(
                    "duplicate event name \"{}\"",
                    event.name
                )));
            }
            validate_event(event)?;
        }

        // Refills leave the active events out, so an all-persistent table
        // needs at least one more event than can be active
        if self.events.iter().all(DailyEvent::is_persistent)
            && self.events.len() <= MAX_ACTIVE_PERSISTENT_EVENTS
        {
            return Err(EngineError::InvalidEventDeck(format!(
                "{} persistent event(s) cannot be refilled, at least {} are needed",
                self.events.len(),
                MAX_ACTIVE_PERSISTENT_EVENTS + 1
            )));
        }
        Ok(())
    }
}

fn validate_event(event: &DailyEvent) -> Result<()> {
    for alteration in &event.alterations {
        let effect = &alteration.effect;

        if let Some((operator, amount)) = effect.operator() {
            if operator.is_division() && amount == 0 {
                return Err(EngineError::InvalidEventDeck(format!(
                    "event \"{}\" divides by zero",
                    event.name
                )));
            }
        }

        if event.is_one_off() {
            for condition in &alteration.conditions {
                match &condition.target_condition {
                    None | Some(TargetCondition::PositionedAt { .. }) => {}
                    Some(other) => {
                        return Err(EngineError::UnsupportedCondition(format!(
                            "{} (one-off event \"{}\" only accepts positioned_at)",
                            other.predicate(),
                            event.name
                        )));
                    }
                }
            }

            if matches!(
                effect,
                AlterationEffect::ActionCostDelta { .. } | AlterationEffect::ActionRewardDelta { .. }
            ) {
                return Err(EngineError::InvalidEventDeck(format!(
                    "one-off event \"{}\" cannot use {}",
                    event.name,
                    effect.kind()
                )));
            }
        }

        if let AlterationEffect::TerrainReplacement { from, to } = effect {
            if event.is_persistent() {
                return Err(EngineError::InvalidEventDeck(format!(
                    "persistent event \"{}\" cannot replace terrain",
                    event.name
                )));
            }
            if *from == TerrainType::Village || *to == TerrainType::Village {
                return Err(EngineError::InvalidEventDeck(format!(
                    "event \"{}\" would change the number of villages",
                    event.name
                )));
            }
        }
    }
    Ok(())
}

/// Events not yet drawn. Refilled from the table when exhausted.
#[derive(Debug, Clone)]
pub struct EventDeck {
    table: EventTable,
    remaining: Vec<DailyEvent>,
}

impl EventDeck {
    pub fn new(table: EventTable) -> Self {
        let remaining = table.events.clone();
        Self { table, remaining }
    }

    pub fn table(&self) -> &EventTable {
        &self.table
    }

    pub fn remaining(&self) -> &[DailyEvent] {
        &self.remaining
    }

    /// Refill from the full table, leaving out events currently active
    pub fn refill(&mut self, active: &[DailyEvent]) {
        self.remaining = self
            .table
            .events
            .iter()
            .filter(|event| !active.iter().any(|a| a.name == event.name))
            .cloned()
            .collect();
        tracing::debug!(cards = self.remaining.len(), "refilled daily event deck");
    }

    /// Remove one event uniformly at random
    pub fn draw(
        &mut self,
        rng: &mut dyn RandomnessProvider,
        active: &[DailyEvent],
    ) -> Result<DailyEvent> {
        if self.remaining.is_empty() {
            self.refill(active);
        }
        if self.remaining.is_empty() {
            return Err(EngineError::EmptyEventDeck);
        }

        let max = self.remaining.len();
        let index = rng.next(NEW_DAILY_EVENT_SLOT, 0, max);
        if index >= max {
            return Err(EngineError::RandomOutOfRange {
                slot: NEW_DAILY_EVENT_SLOT.to_string(),
                value: index,
                min: 0,
                max,
            });
        }

        Ok(self.remaining.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::alteration::{EventDuration, Polarity};
    use crate::random::ScriptedRandomness;

    #[test]
    fn test_builtin_table_loads() {
        let table = EventTable::builtin().unwrap();
        assert!(table.len() >= 10);

        let blizzard = table.get("Blizzard").unwrap();
        assert_eq!(blizzard.polarity, Polarity::Malus);
        assert_eq!(blizzard.duration, EventDuration::Persistent);

        let sunny = table.get("Beau temps").unwrap();
        assert_eq!(sunny.polarity, Polarity::Bonus);
        assert!(sunny.is_persistent());
    }

    #[test]
    fn test_one_off_rejects_other_predicates() {
        let err = EventTable::from_toml_str(
            r#"
            [[events]]
            name = "Avalanche"
            polarity = "malus"
            duration = "one_off"

            [[events.alterations]]
            effect = { kind = "property_delta", property = "hp", operator = "subtract", amount = 1 }
            conditions = [{ target_condition = { predicate = "moving_to", terrains = ["mountain"] } }]
            "#,
        )
        .unwrap_err();

        assert!(matches!(err, EngineError::UnsupportedCondition(_)));
        assert!(err.to_string().contains("moving_to"));
    }

    #[test]
    fn test_one_off_rejects_cost_deltas() {
        let err = EventTable::from_toml_str(
            r#"
            [[events]]
            name = "Routes boueuses"
            polarity = "malus"
            duration = "one_off"

            [[events.alterations]]
            effect = { kind = "action_cost_delta", action = "move", operator = "add", amount = 1 }
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidEventDeck(_)));
    }

    #[test]
    fn test_village_replacement_rejected() {
        let err = EventTable::from_toml_str(
            r#"
            [[events]]
            name = "Exode"
            polarity = "malus"
            duration = "one_off"

            [[events.alterations]]
            effect = { kind = "terrain_replacement", from = "village", to = "plains" }
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidEventDeck(_)));
    }

    #[test]
    fn test_all_persistent_table_must_outgrow_the_active_window() {
        let persistent = |name: &str| {
            format!(
                "[[events]]\nname = \"{name}\"\npolarity = \"malus\"\nduration = \"persistent\"\n\n"
            )
        };

        let two: String = ["Gel", "Grêle"].iter().map(|n| persistent(n)).collect();
        let err = EventTable::from_toml_str(&two).unwrap_err();
        assert!(matches!(err, EngineError::InvalidEventDeck(_)));

        let three: String = ["Gel", "Grêle", "Sécheresse"].iter().map(|n| persistent(n)).collect();
        let table = EventTable::from_toml_str(&three).unwrap();

        // Three persistent events keep drawing past two refills
        let mut deck = EventDeck::new(table);
        let mut rng = ScriptedRandomness::new();
        let mut active = Vec::new();
        for _ in 0..9 {
            let event = deck.draw(&mut rng, &active).unwrap();
            crate::events::push_active(&mut active, event);
        }
        assert_eq!(active.len(), 2);
    }

    #[test]
    fn test_one_off_events_keep_small_tables_refillable() {
        let table = EventTable::from_toml_str(
            r#"
            [[events]]
            name = "Gel"
            polarity = "malus"
            duration = "persistent"

            [[events]]
            name = "Rosée"
            polarity = "bonus"
            duration = "one_off"
            "#,
        )
        .unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_draw_is_non_repeating_then_refills_without_active() {
        let table = EventTable::builtin().unwrap();
        let total = table.len();
        let mut deck = EventDeck::new(table.clone());
        let mut rng = ScriptedRandomness::new();

        let mut drawn = AHashSet::new();
        for _ in 0..total {
            let event = deck.draw(&mut rng, &[]).unwrap();
            assert!(drawn.insert(event.name));
        }
        assert!(deck.remaining().is_empty());

        let blizzard = table.get("Blizzard").unwrap().clone();
        let next = deck.draw(&mut rng, std::slice::from_ref(&blizzard)).unwrap();
        assert_ne!(next.name, "Blizzard");
        assert_eq!(deck.remaining().len(), total - 2);
        assert!(deck.remaining().iter().all(|e| e.name != "Blizzard"));
    }

    #[test]
    fn test_scripted_index_matches_table_order() {
        let table = EventTable::builtin().unwrap();
        let index = table.index_of("Beau temps").unwrap();

        let script = ScriptedRandomness::new();
        script.add_next_number_for_key(NEW_DAILY_EVENT_SLOT, index);
        let mut rng = script.clone();

        let mut deck = EventDeck::new(table);
        assert_eq!(deck.draw(&mut rng, &[]).unwrap().name, "Beau temps");
    }
}
