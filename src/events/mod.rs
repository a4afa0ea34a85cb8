//! Daily events: data model, deck, resolution and cost modifiers

pub mod alteration;
pub mod deck;
pub mod modifiers;
pub mod processor;

pub use alteration::{
    AlterationCondition, AlterationEffect, CostedAction, DailyEvent, EventAlteration, EventDuration,
    Polarity, TargetCondition, TargetEntity,
};
pub use deck::{EventDeck, EventTable};
pub use modifiers::TurnRules;
pub use processor::{apply_one_off, apply_persistent_turn_effects, resolve_targets};

/// Persistent events kept active at once
pub const MAX_ACTIVE_PERSISTENT_EVENTS: usize = 2;

/// Put a newly drawn persistent event in front, evicting the oldest past the cap
pub fn push_active(active: &mut Vec<DailyEvent>, event: DailyEvent) -> Option<DailyEvent> {
    let evicted = if active.len() >= MAX_ACTIVE_PERSISTENT_EVENTS {
        active.pop()
    } else {
        None
    };
    active.insert(0, event);
    evicted
}
