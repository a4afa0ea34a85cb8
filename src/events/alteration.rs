//! Daily events and the alterations they carry
//!
//! An alteration is one typed effect plus optional conditions selecting who
//! it applies to. Events are plain data loaded from TOML.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::EngineError;
use crate::core::types::{EntityProperty, Operator, ResourceKind};
use crate::terrain::{ActionName, TerrainCondition, TerrainType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Bonus,
    Malus,
}

/// Persistent events stay active for several turns, one-off events resolve
/// once when drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventDuration {
    Persistent,
    OneOff,
}

/// Which class of entity a condition selects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetEntity {
    AllPlayers,
    CurrentPlayer,
    PlayerMatchingCondition,
    Village,
    Enemy,
}

/// Predicate a target must satisfy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "predicate", rename_all = "snake_case")]
pub enum TargetCondition {
    /// The target stands on a tile of one of these terrains
    PositionedAt { terrains: Vec<TerrainCondition> },
    /// The target is moving onto one of these terrains. Only meaningful
    /// while pricing a move, so only persistent events may use it.
    MovingTo { terrains: Vec<TerrainCondition> },
}

impl TargetCondition {
    pub fn predicate(&self) -> &'static str {
        match self {
            Self::PositionedAt { .. } => "positioned_at",
            Self::MovingTo { .. } => "moving_to",
        }
    }

    pub fn terrains(&self) -> &[TerrainCondition] {
        match self {
            Self::PositionedAt { terrains } | Self::MovingTo { terrains } => terrains,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlterationCondition {
    #[serde(default)]
    pub target_entity: Option<TargetEntity>,
    #[serde(default)]
    pub target_condition: Option<TargetCondition>,
}

/// Anything a player spends action points on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CostedAction {
    Move,
    Explore,
    Zone(ActionName),
}

impl FromStr for CostedAction {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "move" => Ok(Self::Move),
            "explore" => Ok(Self::Explore),
            other => other.parse().map(Self::Zone),
        }
    }
}

impl TryFrom<String> for CostedAction {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CostedAction> for String {
    fn from(action: CostedAction) -> Self {
        action.to_string()
    }
}

impl fmt::Display for CostedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move => f.write_str("move"),
            Self::Explore => f.write_str("explore"),
            Self::Zone(action) => f.write_str(action.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlterationEffect {
    /// Changes the action points charged for an action (persistent only)
    ActionCostDelta {
        action: CostedAction,
        operator: Operator,
        amount: u32,
    },
    /// Changes the yield of a zone action (persistent only)
    ActionRewardDelta {
        action: ActionName,
        operator: Operator,
        amount: u32,
    },
    /// Changes a resource count in the target's inventory
    ResourceDelta {
        resource: ResourceKind,
        operator: Operator,
        amount: u32,
    },
    /// Changes an entity property
    PropertyDelta {
        property: EntityProperty,
        operator: Operator,
        amount: u32,
    },
    /// Swaps the tile of type `from` closest to the target for a fresh `to`
    /// tile (one-off only)
    TerrainReplacement { from: TerrainType, to: TerrainType },
}

impl AlterationEffect {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ActionCostDelta { .. } => "action_cost_delta",
            Self::ActionRewardDelta { .. } => "action_reward_delta",
            Self::ResourceDelta { .. } => "resource_delta",
            Self::PropertyDelta { .. } => "property_delta",
            Self::TerrainReplacement { .. } => "terrain_replacement",
        }
    }

    pub fn operator(&self) -> Option<(Operator, u32)> {
        match self {
            Self::ActionCostDelta { operator, amount, .. }
            | Self::ActionRewardDelta { operator, amount, .. }
            | Self::ResourceDelta { operator, amount, .. }
            | Self::PropertyDelta { operator, amount, .. } => Some((*operator, *amount)),
            Self::TerrainReplacement { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAlteration {
    pub effect: AlterationEffect,
    /// A target matches if any condition matches
    #[serde(default)]
    pub conditions: Vec<AlterationCondition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyEvent {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub polarity: Polarity,
    pub duration: EventDuration,
    #[serde(default)]
    pub alterations: Vec<EventAlteration>,
}

impl DailyEvent {
    pub fn is_persistent(&self) -> bool {
        self.duration == EventDuration::Persistent
    }

    pub fn is_one_off(&self) -> bool {
        self.duration == EventDuration::OneOff
    }
}
