//! Inventory - resource counts held by an entity or a tile

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{Operator, ResourceCost, ResourceKind};

/// Resource counts; absent kinds count as zero
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    resources: AHashMap<ResourceKind, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current amount of a resource
    pub fn get(&self, resource: ResourceKind) -> u32 {
        self.resources.get(&resource).copied().unwrap_or(0)
    }

    pub fn has(&self, resource: ResourceKind, amount: u32) -> bool {
        self.get(resource) >= amount
    }

    /// Check if every requirement is covered
    pub fn has_all(&self, requirements: &[ResourceCost]) -> bool {
        requirements
            .iter()
            .all(|cost| self.has(cost.resource, cost.quantity))
    }

    pub fn add(&mut self, resource: ResourceKind, amount: u32) {
        if amount == 0 {
            return;
        }
        let entry = self.resources.entry(resource).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Remove exactly `amount`; nothing is removed if fewer are held
    pub fn remove(&mut self, resource: ResourceKind, amount: u32) -> bool {
        if !self.has(resource, amount) {
            return false;
        }
        self.set(resource, self.get(resource) - amount);
        true
    }

    /// Consume every requirement, or none of them
    pub fn consume_all(&mut self, requirements: &[ResourceCost]) -> bool {
        if !self.has_all(requirements) {
            return false;
        }
        for cost in requirements {
            self.remove(cost.resource, cost.quantity);
        }
        true
    }

    /// Apply an alteration operator to one resource count
    pub fn apply(&mut self, operator: Operator, resource: ResourceKind, amount: u32) {
        let value = operator.apply(self.get(resource), amount);
        self.set(resource, value);
    }

    pub fn is_empty(&self) -> bool {
        self.resources.values().all(|count| *count == 0)
    }

    /// Non-zero counts in a stable order
    pub fn entries(&self) -> Vec<(ResourceKind, u32)> {
        let mut entries: Vec<_> = self
            .resources
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(kind, count)| (*kind, *count))
            .collect();
        entries.sort();
        entries
    }

    fn set(&mut self, resource: ResourceKind, value: u32) {
        if value == 0 {
            self.resources.remove(&resource);
        } else {
            self.resources.insert(resource, value);
        }
    }
}
