use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The six edge directions of a pointy-top hex, in clockwise order starting
/// from East. The position of a direction in [`Direction::ALL`] is also the
/// edge index it corresponds to on every hex, so `Direction::SouthEast` is
/// edge 1, and corner `i` sits between edges `i - 1` and `i`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    East,
    SouthEast,
    SouthWest,
    West,
    NorthWest,
    NorthEast,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::East,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
        Direction::NorthEast,
    ];

    /// Edge index this direction corresponds to.
    pub fn index(self) -> usize {
        match self {
            Direction::East => 0,
            Direction::SouthEast => 1,
            Direction::SouthWest => 2,
            Direction::West => 3,
            Direction::NorthWest => 4,
            Direction::NorthEast => 5,
        }
    }

    pub fn from_index(index: usize) -> Direction {
        Self::ALL[index % 6]
    }

    pub fn opposite(self) -> Direction {
        Self::from_index(self.index() + 3)
    }

    /// Axial step taken when crossing this edge.
    pub fn offset(self) -> (i8, i8) {
        match self {
            Direction::East => (1, 0),
            Direction::SouthEast => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (0, -1),
            Direction::NorthEast => (1, -1),
        }
    }
}

/// Axial hex coordinate. `q` grows to the east, `r` to the south-east; the
/// implicit third cube coordinate is `-q - r`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Axial {
    pub q: i8,
    pub r: i8,
}

impl Axial {
    pub const fn new(q: i8, r: i8) -> Self {
        Self { q, r }
    }

    pub const fn s(self) -> i8 {
        -self.q - self.r
    }

    pub fn neighbor(self, direction: Direction) -> Axial {
        let (dq, dr) = direction.offset();
        Axial::new(self.q + dq, self.r + dr)
    }

    pub fn neighbors(self) -> [Axial; 6] {
        Direction::ALL.map(|direction| self.neighbor(direction))
    }

    /// Hex-grid distance in steps.
    pub fn distance_to(self, other: Axial) -> u8 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = (self.s() - other.s()).abs();
        ((dq + dr + ds) / 2) as u8
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn opposite_round_trips() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
            let (dq, dr) = direction.offset();
            let (oq, or) = direction.opposite().offset();
            assert_eq!((dq + oq, dr + or), (0, 0));
        }
    }

    #[test]
    fn neighbors_are_distinct_and_adjacent() {
        let center = Axial::new(0, 0);
        let neighbors = center.neighbors();
        let unique: HashSet<_> = neighbors.iter().collect();
        assert_eq!(unique.len(), 6);
        for neighbor in neighbors {
            assert_eq!(center.distance_to(neighbor), 1);
        }
    }

    #[test]
    fn direction_index_is_positional() {
        for (index, direction) in Direction::ALL.iter().enumerate() {
            assert_eq!(direction.index(), index);
            assert_eq!(Direction::from_index(index), *direction);
        }
    }
}
