use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::coords::{Axial, Direction};
use crate::types::Terrain;

pub const NUM_HEXES: usize = 19;
pub const CENTER_LABEL: u8 = 10;

/// Globally unique id of a physical corner (54 on the standard board).
pub type CornerId = u16;
/// An edge is the pair of corners it connects, smaller id first (72 total).
pub type EdgeId = (CornerId, CornerId);

pub fn edge_between(a: CornerId, b: CornerId) -> EdgeId {
    if a <= b { (a, b) } else { (b, a) }
}

/// Hex labels 1..=19 in row-major order: rows of 3, 4, 5, 4, 3 from the top.
/// Axial coordinates q, r each span [-2, 2]; 11 combinations fall off-board.
static LABEL_COORDS: [Axial; NUM_HEXES] = [
    Axial::new(0, -2),
    Axial::new(1, -2),
    Axial::new(2, -2),
    Axial::new(-1, -1),
    Axial::new(0, -1),
    Axial::new(1, -1),
    Axial::new(2, -1),
    Axial::new(-2, 0),
    Axial::new(-1, 0),
    Axial::new(0, 0),
    Axial::new(1, 0),
    Axial::new(2, 0),
    Axial::new(-2, 1),
    Axial::new(-1, 1),
    Axial::new(0, 1),
    Axial::new(1, 1),
    Axial::new(-2, 2),
    Axial::new(-1, 2),
    Axial::new(0, 2),
];

static AXIAL_INDEX: Lazy<HashMap<Axial, u8>> = Lazy::new(|| {
    LABEL_COORDS
        .iter()
        .enumerate()
        .map(|(idx, coord)| (*coord, idx as u8 + 1))
        .collect()
});

/// Ring one step out from the center, clockwise starting from hex 5.
pub const MIDDLE_RING: [u8; 6] = [5, 6, 11, 15, 14, 9];

/// Ring two steps out, clockwise starting from hex 1.
pub const OUTER_RING: [u8; 12] = [1, 2, 3, 7, 12, 16, 19, 18, 17, 13, 8, 4];

/// The 18 probability tokens in fixed rank order (alphabet order of the
/// physical chits). Consumed from the end backwards during setup.
pub const TOKEN_VALUES: [u8; 18] = [5, 2, 6, 3, 8, 10, 9, 12, 11, 4, 8, 10, 9, 4, 5, 6, 3, 11];

/// The fixed terrain pool: 4 wood, 4 wheat, 4 sheep, 3 brick, 3 ore, 1 desert.
pub static TERRAIN_POOL: [Terrain; NUM_HEXES] = [
    Terrain::Wood,
    Terrain::Wood,
    Terrain::Wood,
    Terrain::Wood,
    Terrain::Wheat,
    Terrain::Wheat,
    Terrain::Wheat,
    Terrain::Wheat,
    Terrain::Sheep,
    Terrain::Sheep,
    Terrain::Sheep,
    Terrain::Sheep,
    Terrain::Brick,
    Terrain::Brick,
    Terrain::Brick,
    Terrain::Ore,
    Terrain::Ore,
    Terrain::Ore,
    Terrain::Desert,
];

/// Where the outer walk picks up after the middle walk, keyed by the middle
/// hex under the cursor when the walk ends.
fn clockwise_outer_start(middle: u8) -> u8 {
    match middle {
        5 => 4,
        6 => 2,
        11 => 7,
        15 => 16,
        14 => 18,
        _ => 13,
    }
}

fn counter_clockwise_outer_start(middle: u8) -> u8 {
    match middle {
        5 => 2,
        6 => 7,
        11 => 16,
        15 => 18,
        14 => 13,
        _ => 4,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("position violates placement rules")]
    InvalidPosition,
    #[error("insufficient resources")]
    InsufficientResources,
    #[error("no unplaced pieces of that kind left")]
    NoPiecesLeft,
    #[error("{what} {value} outside valid range")]
    OutOfRange { what: &'static str, value: i64 },
}

/// A settlement or city occupying one corner. A city supersedes a settlement
/// at the same corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Building {
    Settlement { owner: usize },
    City { owner: usize },
}

impl Building {
    pub fn owner(&self) -> usize {
        match self {
            Building::Settlement { owner } | Building::City { owner } => *owner,
        }
    }

    pub fn is_city(&self) -> bool {
        matches!(self, Building::City { .. })
    }
}

/// One tile of the board. Corner ids are shared with every hex touching the
/// same physical corner; edge `i` connects corners `i` and `i + 1`, and
/// corner `i` is the shared endpoint of edges `i - 1` and `i`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hex {
    pub label: u8,
    pub coord: Axial,
    pub terrain: Terrain,
    pub number: u8,
    corners: [CornerId; 6],
}

impl Hex {
    pub fn corner_id(&self, corner: usize) -> CornerId {
        self.corners[corner]
    }

    pub fn edge_id(&self, edge: usize) -> EdgeId {
        edge_between(self.corners[edge], self.corners[(edge + 1) % 6])
    }

    pub fn corner_ids(&self) -> [CornerId; 6] {
        self.corners
    }

    pub fn edge_ids(&self) -> [EdgeId; 6] {
        std::array::from_fn(|edge| self.edge_id(edge))
    }
}

/// The 19-hex board. Topology is wired once at construction and never
/// changes; `clear` and `randomize` only touch per-hex content and the
/// occupancy registries.
///
/// Placed pieces live in canonical registries keyed by [`CornerId`] and
/// [`EdgeId`], so a road or building written through one hex is observed
/// unchanged from every other hex sharing that edge or corner. The board
/// performs no legality checks beyond index validation; rule enforcement
/// belongs to the caller.
#[derive(Debug, Clone)]
pub struct Board {
    hexes: Vec<Hex>,
    corner_edges: HashMap<CornerId, Vec<EdgeId>>,
    corner_neighbors: HashMap<CornerId, Vec<CornerId>>,
    corner_hexes: HashMap<CornerId, Vec<u8>>,
    roads: HashMap<EdgeId, usize>,
    buildings: HashMap<CornerId, Building>,
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Board {
    /// Builds the wired but unrandomized board: every hex starts as a desert
    /// with number 0 until [`Board::randomize`] runs.
    pub fn new() -> Self {
        let corner_slots = assign_corner_ids();

        let hexes: Vec<Hex> = (0..NUM_HEXES)
            .map(|idx| Hex {
                label: idx as u8 + 1,
                coord: LABEL_COORDS[idx],
                terrain: Terrain::Desert,
                number: 0,
                corners: corner_slots[idx],
            })
            .collect();

        let mut corner_edges: HashMap<CornerId, Vec<EdgeId>> = HashMap::new();
        let mut corner_neighbors: HashMap<CornerId, Vec<CornerId>> = HashMap::new();
        let mut corner_hexes: HashMap<CornerId, Vec<u8>> = HashMap::new();
        let mut seen_edges: HashSet<EdgeId> = HashSet::new();

        for hex in &hexes {
            for corner in 0..6 {
                corner_hexes
                    .entry(hex.corner_id(corner))
                    .or_default()
                    .push(hex.label);
                let edge = hex.edge_id(corner);
                if seen_edges.insert(edge) {
                    let (a, b) = edge;
                    corner_edges.entry(a).or_default().push(edge);
                    corner_edges.entry(b).or_default().push(edge);
                    corner_neighbors.entry(a).or_default().push(b);
                    corner_neighbors.entry(b).or_default().push(a);
                }
            }
        }

        debug_assert_eq!(corner_edges.len(), 54);
        debug_assert_eq!(seen_edges.len(), 72);

        Self {
            hexes,
            corner_edges,
            corner_neighbors,
            corner_hexes,
            roads: HashMap::new(),
            buildings: HashMap::new(),
        }
    }

    /// Builds and randomizes a fresh board in one step.
    pub fn generate(rng: &mut impl Rng) -> Self {
        let mut board = Board::new();
        board.randomize(rng);
        board
    }

    pub fn hex(&self, label: u8) -> Result<&Hex, PlacementError> {
        if !(1..=NUM_HEXES as u8).contains(&label) {
            return Err(PlacementError::OutOfRange {
                what: "hex label",
                value: label as i64,
            });
        }
        Ok(&self.hexes[(label - 1) as usize])
    }

    fn hex_mut(&mut self, label: u8) -> &mut Hex {
        &mut self.hexes[(label - 1) as usize]
    }

    pub fn hex_at(&self, q: i8, r: i8) -> Option<&Hex> {
        AXIAL_INDEX
            .get(&Axial::new(q, r))
            .map(|&label| &self.hexes[(label - 1) as usize])
    }

    pub fn hexes(&self) -> &[Hex] {
        &self.hexes
    }

    pub fn neighbor(&self, label: u8, direction: Direction) -> Result<Option<&Hex>, PlacementError> {
        let coord = self.hex(label)?.coord.neighbor(direction);
        Ok(self.hex_at(coord.q, coord.r))
    }

    /// Resolves a (label, edge index) pair to the canonical edge, rejecting
    /// out-of-range input rather than wrapping it.
    pub fn edge_ref(&self, label: u8, edge: usize) -> Result<EdgeId, PlacementError> {
        let hex = self.hex(label)?;
        if edge >= 6 {
            return Err(PlacementError::OutOfRange {
                what: "edge index",
                value: edge as i64,
            });
        }
        Ok(hex.edge_id(edge))
    }

    pub fn corner_ref(&self, label: u8, corner: usize) -> Result<CornerId, PlacementError> {
        let hex = self.hex(label)?;
        if corner >= 6 {
            return Err(PlacementError::OutOfRange {
                what: "corner index",
                value: corner as i64,
            });
        }
        Ok(hex.corner_id(corner))
    }

    pub fn road_owner(&self, edge: EdgeId) -> Option<usize> {
        self.roads.get(&edge).copied()
    }

    pub fn building(&self, corner: CornerId) -> Option<Building> {
        self.buildings.get(&corner).copied()
    }

    pub fn road_at(&self, label: u8, edge: usize) -> Result<Option<usize>, PlacementError> {
        Ok(self.road_owner(self.edge_ref(label, edge)?))
    }

    pub fn building_at(&self, label: u8, corner: usize) -> Result<Option<Building>, PlacementError> {
        Ok(self.building(self.corner_ref(label, corner)?))
    }

    /// Commits a road with no legality checks beyond index validation.
    pub fn place_road(&mut self, owner: usize, label: u8, edge: usize) -> Result<(), PlacementError> {
        let edge = self.edge_ref(label, edge)?;
        self.roads.insert(edge, owner);
        Ok(())
    }

    /// Commits a building with no legality checks beyond index validation.
    /// Overwrites whatever occupied the corner, so a city placed over a
    /// settlement supersedes it.
    pub fn place_building(
        &mut self,
        building: Building,
        label: u8,
        corner: usize,
    ) -> Result<(), PlacementError> {
        let corner = self.corner_ref(label, corner)?;
        self.buildings.insert(corner, building);
        Ok(())
    }

    pub fn remove_building(
        &mut self,
        label: u8,
        corner: usize,
    ) -> Result<Option<Building>, PlacementError> {
        let corner = self.corner_ref(label, corner)?;
        Ok(self.buildings.remove(&corner))
    }

    /// Empties every edge and corner slot. Pool restitution for owned pieces
    /// is the session's job; unowned pieces are simply discarded.
    pub fn clear(&mut self) {
        self.roads.clear();
        self.buildings.clear();
    }

    pub fn corner_edges(&self, corner: CornerId) -> &[EdgeId] {
        self.corner_edges.get(&corner).map_or(&[], Vec::as_slice)
    }

    pub fn corner_neighbors(&self, corner: CornerId) -> &[CornerId] {
        self.corner_neighbors.get(&corner).map_or(&[], Vec::as_slice)
    }

    pub fn corner_hexes(&self, corner: CornerId) -> &[u8] {
        self.corner_hexes.get(&corner).map_or(&[], Vec::as_slice)
    }

    pub fn corner_count(&self) -> usize {
        self.corner_edges.len()
    }

    pub fn hexes_with_number(&self, number: u8) -> Vec<u8> {
        self.hexes
            .iter()
            .filter(|hex| hex.number == number && hex.number != 0)
            .map(|hex| hex.label)
            .collect()
    }

    pub fn desert_label(&self) -> Option<u8> {
        self.hexes
            .iter()
            .find(|hex| hex.terrain.is_desert())
            .map(|hex| hex.label)
    }

    pub fn set_terrain(&mut self, label: u8, terrain: Terrain) -> Result<(), PlacementError> {
        self.hex(label)?;
        self.hex_mut(label).terrain = terrain;
        Ok(())
    }

    pub fn set_number(&mut self, label: u8, number: u8) -> Result<(), PlacementError> {
        self.hex(label)?;
        self.hex_mut(label).number = number;
        Ok(())
    }

    /// Runs the full setup: shuffles the terrain pool across labels 1..=19,
    /// zeroes the desert, then walks the token spiral.
    pub fn randomize(&mut self, rng: &mut impl Rng) {
        let mut pool = TERRAIN_POOL.to_vec();
        pool.shuffle(rng);
        self.clear();
        for (hex, terrain) in self.hexes.iter_mut().zip(pool) {
            hex.terrain = terrain;
            hex.number = 0;
        }
        self.distribute_tokens(rng);
    }

    /// Walks tokens outward from the center: center hex, then the middle ring
    /// from a random offset, then the outer ring continuing in the same
    /// rotational direction. Desert hexes advance the walk without consuming
    /// a token. Tokens are taken from the end of [`TOKEN_VALUES`] backwards.
    fn distribute_tokens(&mut self, rng: &mut impl Rng) {
        let clockwise = rng.gen_bool(0.5);
        let mut remaining = TOKEN_VALUES.len();

        let mut take = |hexes: &mut Vec<Hex>, label: u8| {
            let hex = &mut hexes[(label - 1) as usize];
            if !hex.terrain.is_desert() {
                remaining -= 1;
                hex.number = TOKEN_VALUES[remaining];
            }
        };

        take(&mut self.hexes, CENTER_LABEL);

        let mut cursor = rng.gen_range(0..MIDDLE_RING.len());
        for _ in 0..MIDDLE_RING.len() {
            take(&mut self.hexes, MIDDLE_RING[cursor]);
            cursor = if clockwise {
                (cursor + 1) % MIDDLE_RING.len()
            } else {
                (cursor + MIDDLE_RING.len() - 1) % MIDDLE_RING.len()
            };
        }

        // After six steps the cursor is back on the starting hex; that hex
        // keys the pivot table into the outer ring.
        let pivot = MIDDLE_RING[cursor];
        let start = if clockwise {
            clockwise_outer_start(pivot)
        } else {
            counter_clockwise_outer_start(pivot)
        };
        let mut cursor = OUTER_RING
            .iter()
            .position(|&label| label == start)
            .expect("pivot table yields an outer-ring hex");
        for _ in 0..OUTER_RING.len() {
            take(&mut self.hexes, OUTER_RING[cursor]);
            cursor = if clockwise {
                (cursor + 1) % OUTER_RING.len()
            } else {
                (cursor + OUTER_RING.len() - 1) % OUTER_RING.len()
            };
        }

        debug_assert_eq!(remaining, 0, "every token assigned exactly once");
    }
}

/// Allocates globally unique corner ids hex by hex in label order, reusing
/// ids already assigned by previously built neighbors. For the neighbor
/// across edge `i`, our corner `i` is their corner `i + 4` and our corner
/// `i + 1` is their corner `i + 3` (mod 6).
fn assign_corner_ids() -> Vec<[CornerId; 6]> {
    let mut assigned: Vec<[Option<CornerId>; 6]> = vec![[None; 6]; NUM_HEXES];
    let mut next: CornerId = 0;

    for idx in 0..NUM_HEXES {
        let coord = LABEL_COORDS[idx];
        let mut slots = [None; 6];
        for (i, direction) in Direction::ALL.iter().enumerate() {
            let neighbor = coord.neighbor(*direction);
            let Some(&nb_label) = AXIAL_INDEX.get(&neighbor) else {
                continue;
            };
            let nb_idx = (nb_label - 1) as usize;
            if nb_idx >= idx {
                continue;
            }
            let nb = &assigned[nb_idx];
            slots[i] = nb[(i + 4) % 6];
            slots[(i + 1) % 6] = nb[(i + 3) % 6];
        }
        for slot in slots.iter_mut() {
            if slot.is_none() {
                *slot = Some(next);
                next += 1;
            }
        }
        assigned[idx] = slots;
    }

    assigned
        .into_iter()
        .map(|slots| slots.map(|slot| slot.expect("every corner assigned")))
        .collect()
}
