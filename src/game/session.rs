use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::board::{Board, Building, Hex, PlacementError};
use crate::game::players::PlayerState;
use crate::game::resources::{COST_CITY, COST_ROAD, COST_SETTLEMENT, ResourceBundle};
use crate::render;
use crate::types::{Color, Resource};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SessionConfig {
    pub num_players: usize,
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            num_players: 4,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    pub die1: u8,
    pub die2: u8,
    pub sum: u8,
}

/// One game's worth of board and players. Each session is an independent
/// value with its own seeded RNG; nothing is shared between sessions.
///
/// The session is the rules layer: it validates every placement before
/// committing it to the board, which itself performs no legality checks.
/// Crediting resources on a dice roll is the caller's concern, supported by
/// [`GameSession::hexes_with_number`] and [`GameSession::buildings_adjacent`].
#[derive(Debug, Clone)]
pub struct GameSession {
    pub id: Uuid,
    pub config: SessionConfig,
    pub board: Board,
    pub players: Vec<PlayerState>,
    rng: StdRng,
}

impl GameSession {
    pub fn new(config: SessionConfig) -> Self {
        assert!(
            (2..=4).contains(&config.num_players),
            "sessions support between 2 and 4 players"
        );
        let mut rng = StdRng::seed_from_u64(config.seed);
        let board = Board::generate(&mut rng);
        let players = Color::ORDERED
            .iter()
            .take(config.num_players)
            .map(|color| PlayerState::new(*color, color.to_string()))
            .collect();
        Self {
            id: Uuid::new_v4(),
            config,
            board,
            players,
            rng,
        }
    }

    /// Re-runs setup: every placed piece returns to its owner's pool and the
    /// board is re-shuffled and re-tokened.
    pub fn reroll(&mut self) {
        for player in &mut self.players {
            player.reclaim_pieces();
        }
        self.board.randomize(&mut self.rng);
    }

    pub fn roll_dice(&mut self) -> DiceRoll {
        let die1 = self.rng.gen_range(1..=6);
        let die2 = self.rng.gen_range(1..=6);
        DiceRoll {
            die1,
            die2,
            sum: die1 + die2,
        }
    }

    pub fn hexes_with_number(&self, number: u8) -> Vec<u8> {
        self.board.hexes_with_number(number)
    }

    /// Buildings on any corner of the given hex, for dice-roll crediting.
    pub fn buildings_adjacent(
        &self,
        label: u8,
    ) -> Result<Vec<(crate::board::CornerId, Building)>, PlacementError> {
        let hex = self.board.hex(label)?;
        let mut found: Vec<_> = hex
            .corner_ids()
            .into_iter()
            .filter_map(|corner| self.board.building(corner).map(|building| (corner, building)))
            .collect();
        found.sort_by_key(|(corner, _)| *corner);
        Ok(found)
    }

    /// Credits cards to a player, for collaborators that distribute yields.
    pub fn grant(&mut self, player: usize, resource: Resource, amount: u8) -> Result<(), PlacementError> {
        self.check_player(player)?;
        self.players[player].resources.add(resource, amount);
        Ok(())
    }

    pub fn grant_bundle(&mut self, player: usize, bundle: &ResourceBundle) -> Result<(), PlacementError> {
        self.check_player(player)?;
        self.players[player].resources.add_bundle(bundle);
        Ok(())
    }

    pub fn render_board(&self) -> String {
        render::board_string(&self.board)
    }

    /// A road is legal iff the target edge is empty and one of the two edges
    /// adjacent on the same hex holds the player's own road whose corner
    /// shared with the target is empty or the player's own building. An
    /// opposing building at that corner severs the connection.
    pub fn is_valid_road(&self, player: usize, label: u8, edge: usize) -> bool {
        if player >= self.players.len() || edge >= 6 {
            return false;
        }
        let Ok(hex) = self.board.hex(label) else {
            return false;
        };
        if self.board.road_owner(hex.edge_id(edge)).is_some() {
            return false;
        }
        let counter_clockwise = (edge + 5) % 6;
        let clockwise = (edge + 1) % 6;
        // Edge i runs between corners i and i + 1, so the corner shared with
        // the counter-clockwise neighbor is `edge` and with the clockwise
        // neighbor is `edge + 1`.
        self.connects_through(player, hex, counter_clockwise, edge)
            || self.connects_through(player, hex, clockwise, clockwise)
    }

    fn connects_through(
        &self,
        player: usize,
        hex: &Hex,
        adjacent_edge: usize,
        shared_corner: usize,
    ) -> bool {
        match self.board.road_owner(hex.edge_id(adjacent_edge)) {
            Some(owner) if owner == player => {}
            _ => return false,
        }
        match self.board.building(hex.corner_id(shared_corner)) {
            None => true,
            Some(building) => building.owner() == player,
        }
    }

    /// A settlement is legal iff the corner is empty, no building stands at
    /// any corner one edge away (the distance rule), and, when `needs_road`
    /// is set, one of the player's roads touches the corner. Setup
    /// placements pass `needs_road = false`.
    pub fn is_valid_settlement(
        &self,
        player: usize,
        label: u8,
        corner: usize,
        needs_road: bool,
    ) -> bool {
        if player >= self.players.len() || corner >= 6 {
            return false;
        }
        let Ok(hex) = self.board.hex(label) else {
            return false;
        };
        let corner_id = hex.corner_id(corner);
        if self.board.building(corner_id).is_some() {
            return false;
        }
        if self
            .board
            .corner_neighbors(corner_id)
            .iter()
            .any(|neighbor| self.board.building(*neighbor).is_some())
        {
            return false;
        }
        if needs_road && !self.players[player].has_road_through(self.board.corner_edges(corner_id)) {
            return false;
        }
        true
    }

    /// Validates, charges one wood + one brick, consumes a pooled road, and
    /// commits. Any failure leaves board, pool, and cards untouched.
    pub fn place_road(&mut self, player: usize, label: u8, edge: usize) -> Result<(), PlacementError> {
        self.check_player(player)?;
        let edge_id = self.board.edge_ref(label, edge)?;
        if !self.is_valid_road(player, label, edge) {
            return Err(PlacementError::InvalidPosition);
        }
        if !self.players[player].resources.can_afford(&COST_ROAD) {
            return Err(PlacementError::InsufficientResources);
        }
        if self.players[player].roads_remaining == 0 {
            return Err(PlacementError::NoPiecesLeft);
        }
        self.players[player].resources.try_spend(&COST_ROAD);
        self.players[player].roads_remaining -= 1;
        self.players[player].roads.insert(edge_id);
        self.board.place_road(player, label, edge)
    }

    /// A free setup road. It must land on an empty edge touching one of the
    /// player's buildings.
    pub fn place_starting_road(
        &mut self,
        player: usize,
        label: u8,
        edge: usize,
    ) -> Result<(), PlacementError> {
        self.check_player(player)?;
        let edge_id = self.board.edge_ref(label, edge)?;
        let anchored = {
            let state = &self.players[player];
            state.settlements.contains(&edge_id.0)
                || state.settlements.contains(&edge_id.1)
                || state.cities.contains(&edge_id.0)
                || state.cities.contains(&edge_id.1)
        };
        if self.board.road_owner(edge_id).is_some() || !anchored {
            return Err(PlacementError::InvalidPosition);
        }
        if self.players[player].roads_remaining == 0 {
            return Err(PlacementError::NoPiecesLeft);
        }
        self.players[player].roads_remaining -= 1;
        self.players[player].roads.insert(edge_id);
        self.board.place_road(player, label, edge)
    }

    /// Validates (including road connectivity), charges the settlement cost,
    /// consumes a pooled settlement, and commits.
    pub fn place_settlement(
        &mut self,
        player: usize,
        label: u8,
        corner: usize,
    ) -> Result<(), PlacementError> {
        self.check_player(player)?;
        let corner_id = self.board.corner_ref(label, corner)?;
        if !self.is_valid_settlement(player, label, corner, true) {
            return Err(PlacementError::InvalidPosition);
        }
        if !self.players[player].resources.can_afford(&COST_SETTLEMENT) {
            return Err(PlacementError::InsufficientResources);
        }
        if self.players[player].settlements_remaining == 0 {
            return Err(PlacementError::NoPiecesLeft);
        }
        self.players[player].resources.try_spend(&COST_SETTLEMENT);
        self.players[player].settlements_remaining -= 1;
        self.players[player].settlements.insert(corner_id);
        self.board
            .place_building(Building::Settlement { owner: player }, label, corner)
    }

    /// A free setup settlement: distance rule applies, road connectivity
    /// does not.
    pub fn place_starting_settlement(
        &mut self,
        player: usize,
        label: u8,
        corner: usize,
    ) -> Result<(), PlacementError> {
        self.check_player(player)?;
        let corner_id = self.board.corner_ref(label, corner)?;
        if !self.is_valid_settlement(player, label, corner, false) {
            return Err(PlacementError::InvalidPosition);
        }
        if self.players[player].settlements_remaining == 0 {
            return Err(PlacementError::NoPiecesLeft);
        }
        self.players[player].settlements_remaining -= 1;
        self.players[player].settlements.insert(corner_id);
        self.board
            .place_building(Building::Settlement { owner: player }, label, corner)
    }

    /// Replaces the player's own settlement with a city, returning the
    /// settlement piece to its pool.
    pub fn upgrade_to_city(
        &mut self,
        player: usize,
        label: u8,
        corner: usize,
    ) -> Result<(), PlacementError> {
        self.check_player(player)?;
        let corner_id = self.board.corner_ref(label, corner)?;
        match self.board.building(corner_id) {
            Some(Building::Settlement { owner }) if owner == player => {}
            _ => return Err(PlacementError::InvalidPosition),
        }
        if !self.players[player].resources.can_afford(&COST_CITY) {
            return Err(PlacementError::InsufficientResources);
        }
        if self.players[player].cities_remaining == 0 {
            return Err(PlacementError::NoPiecesLeft);
        }
        self.players[player].resources.try_spend(&COST_CITY);
        self.players[player].cities_remaining -= 1;
        self.players[player].settlements.remove(&corner_id);
        self.players[player].settlements_remaining += 1;
        self.players[player].cities.insert(corner_id);
        self.board
            .place_building(Building::City { owner: player }, label, corner)
    }

    fn check_player(&self, player: usize) -> Result<(), PlacementError> {
        if player >= self.players.len() {
            return Err(PlacementError::OutOfRange {
                what: "player index",
                value: player as i64,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::players::{ROAD_SUPPLY, SETTLEMENT_SUPPLY};
    use crate::types::Resource;

    fn session() -> GameSession {
        GameSession::new(SessionConfig {
            num_players: 2,
            seed: 7,
        })
    }

    /// Player 0 with a settlement on hex 10 corner 0 and a road on edge 0.
    fn session_with_network() -> GameSession {
        let mut session = session();
        session.place_starting_settlement(0, 10, 0).unwrap();
        session.place_starting_road(0, 10, 0).unwrap();
        session
    }

    fn grant_road_cost(session: &mut GameSession, player: usize) {
        session.grant(player, Resource::Wood, 1).unwrap();
        session.grant(player, Resource::Brick, 1).unwrap();
    }

    fn grant_settlement_cost(session: &mut GameSession, player: usize) {
        session.grant(player, Resource::Wood, 1).unwrap();
        session.grant(player, Resource::Brick, 1).unwrap();
        session.grant(player, Resource::Wheat, 1).unwrap();
        session.grant(player, Resource::Sheep, 1).unwrap();
    }

    #[test]
    fn new_session_has_full_pools_and_random_board() {
        let session = session();
        assert_eq!(session.players.len(), 2);
        for player in &session.players {
            assert_eq!(player.roads_remaining, ROAD_SUPPLY);
            assert_eq!(player.settlements_remaining, SETTLEMENT_SUPPLY);
            assert!(player.resources.is_empty());
        }
        assert!(session.board.desert_label().is_some());
    }

    #[test]
    fn starting_pieces_are_free_and_anchored() {
        let mut session = session();
        session.place_starting_settlement(0, 10, 0).unwrap();
        // Edge 2 does not touch corner 0.
        assert_eq!(
            session.place_starting_road(0, 10, 2),
            Err(PlacementError::InvalidPosition)
        );
        session.place_starting_road(0, 10, 0).unwrap();
        assert_eq!(session.players[0].roads_remaining, ROAD_SUPPLY - 1);
        assert_eq!(
            session.players[0].settlements_remaining,
            SETTLEMENT_SUPPLY - 1
        );
        assert!(session.players[0].resources.is_empty());
    }

    #[test]
    fn road_next_to_own_road_is_valid() {
        let session = session_with_network();
        assert!(session.is_valid_road(0, 10, 1));
        assert!(session.is_valid_road(0, 10, 5));
        // Nothing of player 0's touches edge 3.
        assert!(!session.is_valid_road(0, 10, 3));
        // Player 1 has no adjacent road anywhere.
        assert!(!session.is_valid_road(1, 10, 1));
    }

    #[test]
    fn occupied_edge_is_never_valid() {
        let mut session = session_with_network();
        assert!(!session.is_valid_road(0, 10, 0));
        grant_road_cost(&mut session, 0);
        session.place_road(0, 10, 1).unwrap();
        // Round-trip: a committed road invalidates its own edge.
        assert!(!session.is_valid_road(0, 10, 1));
        // Also from the sharing hex across the boundary.
        assert!(!session.is_valid_road(1, 10, 1));
    }

    #[test]
    fn opposing_building_severs_the_connection() {
        let mut session = session_with_network();
        assert!(session.is_valid_road(0, 10, 1));
        // Force an opposing settlement at the corner between edges 0 and 1,
        // bypassing the validator: the board trusts its caller.
        session
            .board
            .place_building(Building::Settlement { owner: 1 }, 10, 1)
            .unwrap();
        assert!(!session.is_valid_road(0, 10, 1));
        // The player's own building at that corner would not sever it.
        session
            .board
            .place_building(Building::Settlement { owner: 0 }, 10, 1)
            .unwrap();
        assert!(session.is_valid_road(0, 10, 1));
    }

    #[test]
    fn place_road_is_atomic_without_resources() {
        let mut session = session_with_network();
        session.grant(0, Resource::Brick, 1).unwrap();
        let before_pool = session.players[0].roads_remaining;
        assert_eq!(
            session.place_road(0, 10, 1),
            Err(PlacementError::InsufficientResources)
        );
        assert_eq!(session.players[0].resources.get(Resource::Brick), 1);
        assert_eq!(session.players[0].roads_remaining, before_pool);
        assert_eq!(session.board.road_at(10, 1).unwrap(), None);
    }

    #[test]
    fn place_road_charges_wood_and_brick() {
        let mut session = session_with_network();
        grant_road_cost(&mut session, 0);
        session.place_road(0, 10, 1).unwrap();
        assert!(session.players[0].resources.is_empty());
        assert_eq!(session.players[0].roads_remaining, ROAD_SUPPLY - 2);
        assert_eq!(session.board.road_at(10, 1).unwrap(), Some(0));
    }

    #[test]
    fn place_road_rejects_invalid_position_first() {
        let mut session = session_with_network();
        grant_road_cost(&mut session, 0);
        assert_eq!(
            session.place_road(0, 10, 3),
            Err(PlacementError::InvalidPosition)
        );
        assert_eq!(session.players[0].resources.total(), 2);
    }

    #[test]
    fn settlement_distance_rule() {
        let mut session = session_with_network();
        grant_road_cost(&mut session, 0);
        session.place_road(0, 10, 1).unwrap();
        grant_settlement_cost(&mut session, 0);
        // Corner 1 is one edge from the settlement at corner 0.
        assert!(!session.is_valid_settlement(0, 10, 1, true));
        assert_eq!(
            session.place_settlement(0, 10, 1),
            Err(PlacementError::InvalidPosition)
        );
        // Corner 2 is two edges away and touched by the road on edge 1.
        assert!(session.is_valid_settlement(0, 10, 2, true));
        session.place_settlement(0, 10, 2).unwrap();
        assert!(session.players[0].resources.is_empty());
        assert_eq!(
            session.board.building_at(10, 2).unwrap(),
            Some(Building::Settlement { owner: 0 })
        );
    }

    #[test]
    fn settlement_requires_road_connectivity_outside_setup() {
        let mut session = session_with_network();
        grant_settlement_cost(&mut session, 0);
        // Corner 4 satisfies the distance rule but touches no road of
        // player 0.
        assert!(session.is_valid_settlement(0, 10, 4, false));
        assert!(!session.is_valid_settlement(0, 10, 4, true));
        assert_eq!(
            session.place_settlement(0, 10, 4),
            Err(PlacementError::InvalidPosition)
        );
    }

    #[test]
    fn settlement_pool_exhaustion() {
        let mut session = session_with_network();
        grant_road_cost(&mut session, 0);
        session.place_road(0, 10, 1).unwrap();
        grant_settlement_cost(&mut session, 0);
        session.players[0].settlements_remaining = 0;
        assert_eq!(
            session.place_settlement(0, 10, 2),
            Err(PlacementError::NoPiecesLeft)
        );
        assert_eq!(session.players[0].resources.total(), 4);
    }

    #[test]
    fn city_upgrade_returns_the_settlement() {
        let mut session = session_with_network();
        session.grant(0, Resource::Wheat, 2).unwrap();
        session.grant(0, Resource::Ore, 3).unwrap();
        let settlements_before = session.players[0].settlements_remaining;
        session.upgrade_to_city(0, 10, 0).unwrap();
        assert_eq!(
            session.board.building_at(10, 0).unwrap(),
            Some(Building::City { owner: 0 })
        );
        assert_eq!(
            session.players[0].settlements_remaining,
            settlements_before + 1
        );
        assert_eq!(session.players[0].cities_remaining, 3);
        assert!(session.players[0].resources.is_empty());
        // No settlement remains there to upgrade again.
        assert_eq!(
            session.upgrade_to_city(0, 10, 0),
            Err(PlacementError::InvalidPosition)
        );
    }

    #[test]
    fn city_upgrade_rejects_foreign_settlements() {
        let mut session = session_with_network();
        session.grant(1, Resource::Wheat, 2).unwrap();
        session.grant(1, Resource::Ore, 3).unwrap();
        assert_eq!(
            session.upgrade_to_city(1, 10, 0),
            Err(PlacementError::InvalidPosition)
        );
    }

    #[test]
    fn out_of_range_inputs_fail_typed() {
        let mut session = session();
        assert!(matches!(
            session.place_road(0, 20, 0),
            Err(PlacementError::OutOfRange { .. })
        ));
        assert!(matches!(
            session.place_settlement(0, 10, 6),
            Err(PlacementError::OutOfRange { .. })
        ));
        assert!(matches!(
            session.place_road(9, 10, 0),
            Err(PlacementError::OutOfRange { .. })
        ));
        assert!(matches!(
            session.grant(9, Resource::Wood, 1),
            Err(PlacementError::OutOfRange { .. })
        ));
    }

    #[test]
    fn dice_stay_in_range_and_reproduce_under_a_seed() {
        let mut a = session();
        let mut b = session();
        for _ in 0..200 {
            let roll = a.roll_dice();
            assert!((1..=6).contains(&roll.die1));
            assert!((1..=6).contains(&roll.die2));
            assert_eq!(roll.sum, roll.die1 + roll.die2);
            assert_eq!(roll, b.roll_dice());
        }
    }

    #[test]
    fn buildings_adjacent_reports_all_corner_occupants() {
        let mut session = session_with_network();
        session
            .board
            .place_building(Building::City { owner: 1 }, 10, 3)
            .unwrap();
        let found = session.buildings_adjacent(10).unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().any(|(_, b)| *b == Building::Settlement { owner: 0 }));
        assert!(found.iter().any(|(_, b)| *b == Building::City { owner: 1 }));
    }

    #[test]
    fn reroll_restores_pools_and_clears_the_board() {
        let mut session = session_with_network();
        session.reroll();
        assert_eq!(session.players[0].roads_remaining, ROAD_SUPPLY);
        assert_eq!(session.players[0].settlements_remaining, SETTLEMENT_SUPPLY);
        assert_eq!(session.board.building_at(10, 0).unwrap(), None);
        assert_eq!(session.board.road_at(10, 0).unwrap(), None);
        assert!(session.board.desert_label().is_some());
    }
}
