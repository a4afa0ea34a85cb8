//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::EngineError;

/// Name of a player, unique within a match
pub type PlayerName = String;

/// Kinds of resources an inventory can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum ResourceKind {
    Wood,
    Food,
    Minerals,
}

impl ResourceKind {
    pub fn all() -> [ResourceKind; 3] {
        [ResourceKind::Wood, ResourceKind::Food, ResourceKind::Minerals]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wood => "wood",
            Self::Food => "food",
            Self::Minerals => "minerals",
        }
    }
}

impl FromStr for ResourceKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wood" => Ok(Self::Wood),
            "food" => Ok(Self::Food),
            "minerals" => Ok(Self::Minerals),
            other => Err(EngineError::UnsupportedResource(other.to_string())),
        }
    }
}

impl TryFrom<String> for ResourceKind {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resource requirement: `quantity` units of `resource`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceCost {
    pub resource: ResourceKind,
    pub quantity: u32,
}

impl ResourceCost {
    pub fn new(resource: ResourceKind, quantity: u32) -> Self {
        Self { resource, quantity }
    }
}

/// Arithmetic operator carried by alterations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    DivideFloor,
    DivideCeil,
}

impl Operator {
    pub fn is_division(&self) -> bool {
        matches!(self, Self::DivideFloor | Self::DivideCeil)
    }

    /// Apply to an unsigned quantity. Subtraction saturates at zero and
    /// dividing by zero leaves the value unchanged.
    pub fn apply(&self, value: u32, amount: u32) -> u32 {
        match self {
            Self::Add => value.saturating_add(amount),
            Self::Subtract => value.saturating_sub(amount),
            Self::Multiply => value.saturating_mul(amount),
            Self::DivideFloor => value.checked_div(amount).unwrap_or(value),
            Self::DivideCeil => {
                if amount == 0 {
                    value
                } else {
                    value.div_ceil(amount)
                }
            }
        }
    }
}

impl FromStr for Operator {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Self::Add),
            // Older event tables spell it "substract"
            "subtract" | "substract" => Ok(Self::Subtract),
            "multiply" => Ok(Self::Multiply),
            "divide_floor" => Ok(Self::DivideFloor),
            "divide_ceil" => Ok(Self::DivideCeil),
            other => Err(EngineError::UnsupportedOperator(other.to_string())),
        }
    }
}

impl TryFrom<String> for Operator {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Entity properties an alteration may target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum EntityProperty {
    Hp,
}

impl FromStr for EntityProperty {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hp" => Ok(Self::Hp),
            other => Err(EngineError::UnsupportedProperty(other.to_string())),
        }
    }
}

impl TryFrom<String> for EntityProperty {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
