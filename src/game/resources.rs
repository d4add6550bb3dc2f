use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Resource;

/// An unordered multiset of resource cards; only counts matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ResourceBundle {
    counts: [u8; Resource::ALL.len()],
}

impl ResourceBundle {
    pub const fn zero() -> Self {
        Self {
            counts: [0; Resource::ALL.len()],
        }
    }

    /// Counts in [`Resource::ALL`] order: wood, brick, wheat, ore, sheep.
    pub const fn from_counts(counts: [u8; 5]) -> Self {
        Self { counts }
    }

    pub fn get(&self, resource: Resource) -> u8 {
        self.counts[resource_index(resource)]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().map(|&count| count as u32).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&count| count == 0)
    }

    pub fn add(&mut self, resource: Resource, amount: u8) {
        let idx = resource_index(resource);
        self.counts[idx] = self.counts[idx].saturating_add(amount);
    }

    pub fn add_bundle(&mut self, other: &ResourceBundle) {
        for (idx, amount) in other.counts.iter().enumerate() {
            self.counts[idx] = self.counts[idx].saturating_add(*amount);
        }
    }

    pub fn can_afford(&self, cost: &ResourceBundle) -> bool {
        self.counts
            .iter()
            .zip(cost.counts.iter())
            .all(|(have, need)| have >= need)
    }

    /// Deducts `cost` if fully affordable; otherwise leaves the bundle
    /// untouched and returns false.
    pub fn try_spend(&mut self, cost: &ResourceBundle) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        for (idx, amount) in cost.counts.iter().enumerate() {
            self.counts[idx] -= amount;
        }
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (Resource, u8)> + '_ {
        Resource::ALL.into_iter().zip(self.counts.iter().copied())
    }
}

impl fmt::Display for ResourceBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .filter(|(_, amount)| *amount > 0)
            .map(|(resource, amount)| format!("{amount}x{resource}"))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

const fn resource_index(resource: Resource) -> usize {
    match resource {
        Resource::Wood => 0,
        Resource::Brick => 1,
        Resource::Wheat => 2,
        Resource::Ore => 3,
        Resource::Sheep => 4,
    }
}

/// One wood + one brick.
pub const COST_ROAD: ResourceBundle = ResourceBundle::from_counts([1, 1, 0, 0, 0]);
/// One each of wood, brick, wheat, sheep.
pub const COST_SETTLEMENT: ResourceBundle = ResourceBundle::from_counts([1, 1, 1, 0, 1]);
/// Two wheat + three ore.
pub const COST_CITY: ResourceBundle = ResourceBundle::from_counts([0, 0, 2, 3, 0]);
