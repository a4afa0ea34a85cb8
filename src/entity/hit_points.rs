use serde::{Deserialize, Serialize};

use crate::core::types::Operator;

/// Hit points bounded to `[0, max]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitPoints {
    current: u32,
    max: u32,
}

impl HitPoints {
    pub fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    /// Zero HP is observable but has no consequence in the rules yet
    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }

    pub fn heal(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.max);
    }

    pub fn damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    /// Apply an alteration operator and return the new value.
    ///
    /// Multiplication and division are valid operators but carry no HP
    /// semantics yet; they leave the value untouched.
    pub fn alter(&mut self, operator: Operator, amount: u32) -> u32 {
        match operator {
            Operator::Add => self.heal(amount),
            Operator::Subtract => self.damage(amount),
            Operator::Multiply | Operator::DivideFloor | Operator::DivideCeil => {
                tracing::warn!(?operator, amount, "hit point operator is not implemented, ignoring");
            }
        }
        self.current
    }
}
