use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::board::{CornerId, EdgeId};
use crate::game::resources::ResourceBundle;
use crate::types::Color;

pub const ROAD_SUPPLY: u8 = 15;
pub const SETTLEMENT_SUPPLY: u8 = 5;
pub const CITY_SUPPLY: u8 = 4;

/// A player's piece pools and card inventory. The board owns all placed
/// state; a player only tracks counts and references to what it has placed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub color: Color,
    pub name: String,
    pub resources: ResourceBundle,
    pub roads_remaining: u8,
    pub settlements_remaining: u8,
    pub cities_remaining: u8,
    pub roads: HashSet<EdgeId>,
    pub settlements: HashSet<CornerId>,
    pub cities: HashSet<CornerId>,
}

impl PlayerState {
    pub fn new(color: Color, name: impl Into<String>) -> Self {
        Self {
            color,
            name: name.into(),
            resources: ResourceBundle::zero(),
            roads_remaining: ROAD_SUPPLY,
            settlements_remaining: SETTLEMENT_SUPPLY,
            cities_remaining: CITY_SUPPLY,
            roads: HashSet::new(),
            settlements: HashSet::new(),
            cities: HashSet::new(),
        }
    }

    /// Returns every placed piece to its pool; used when the board re-rolls.
    pub fn reclaim_pieces(&mut self) {
        self.roads_remaining = ROAD_SUPPLY;
        self.settlements_remaining = SETTLEMENT_SUPPLY;
        self.cities_remaining = CITY_SUPPLY;
        self.roads.clear();
        self.settlements.clear();
        self.cities.clear();
    }

    pub fn has_road_through(&self, corner_edges: &[EdgeId]) -> bool {
        corner_edges.iter().any(|edge| self.roads.contains(edge))
    }

    pub fn placed_pieces(&self) -> usize {
        self.roads.len() + self.settlements.len() + self.cities.len()
    }
}
