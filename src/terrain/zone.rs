//! Zone activations: what a player can do on each terrain type

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::EngineError;
use crate::core::types::{ResourceCost, ResourceKind};

use super::tile::TerrainType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum ActionName {
    RepairVillage,
    BuildBarricade,
    HealSelf,
    GatherFood,
    GatherWood,
    GatherMinerals,
}

impl ActionName {
    pub fn all() -> [ActionName; 6] {
        [
            ActionName::RepairVillage,
            ActionName::BuildBarricade,
            ActionName::HealSelf,
            ActionName::GatherFood,
            ActionName::GatherWood,
            ActionName::GatherMinerals,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RepairVillage => "repair_village",
            Self::BuildBarricade => "build_barricade",
            Self::HealSelf => "heal_self",
            Self::GatherFood => "gather_food",
            Self::GatherWood => "gather_wood",
            Self::GatherMinerals => "gather_minerals",
        }
    }
}

impl FromStr for ActionName {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionName::all()
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| EngineError::UnsupportedAction(s.to_string()))
    }
}

impl TryFrom<String> for ActionName {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for ActionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One possible action at a terrain type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneActivation {
    pub name: ActionName,
    /// Action points charged before persistent event modifiers
    pub cost: u32,
    /// Every listed resource must be held, and is consumed
    pub resource_cost: Vec<ResourceCost>,
    pub experience_gain: u32,
}

impl ZoneActivation {
    pub fn new(name: ActionName, cost: u32) -> Self {
        Self {
            name,
            cost,
            resource_cost: Vec::new(),
            experience_gain: 0,
        }
    }

    pub fn with_resource_cost(mut self, resource: ResourceKind, quantity: u32) -> Self {
        self.resource_cost.push(ResourceCost::new(resource, quantity));
        self
    }

    pub fn with_experience(mut self, experience: u32) -> Self {
        self.experience_gain = experience;
        self
    }
}

/// Actions offered by a terrain type, in HUD order
pub fn zone_actions_for(terrain: TerrainType) -> Vec<ZoneActivation> {
    match terrain {
        TerrainType::Village => vec![
            ZoneActivation::new(ActionName::RepairVillage, 2)
                .with_resource_cost(ResourceKind::Wood, 1),
            ZoneActivation::new(ActionName::BuildBarricade, 2)
                .with_resource_cost(ResourceKind::Wood, 3)
                .with_experience(1),
            ZoneActivation::new(ActionName::HealSelf, 2),
        ],
        TerrainType::Mountain => vec![],
        TerrainType::Lake => vec![ZoneActivation::new(ActionName::GatherFood, 1)],
        TerrainType::Forest => vec![
            ZoneActivation::new(ActionName::GatherFood, 1),
            ZoneActivation::new(ActionName::GatherWood, 1),
        ],
        TerrainType::Plains => vec![],
        TerrainType::Mine => vec![ZoneActivation::new(ActionName::GatherMinerals, 1)],
        TerrainType::Sanctuary => vec![ZoneActivation::new(ActionName::HealSelf, 2)],
    }
}

/// Look up one action at a terrain type
pub fn zone_action(terrain: TerrainType, name: ActionName) -> Option<ZoneActivation> {
    zone_actions_for(terrain).into_iter().find(|a| a.name == name)
}
