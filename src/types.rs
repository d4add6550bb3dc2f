use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The five resource card kinds. Deserts produce nothing, so there is no
/// desert card.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Resource {
    Wood,
    Brick,
    Wheat,
    Ore,
    Sheep,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::Wood,
        Resource::Brick,
        Resource::Wheat,
        Resource::Ore,
        Resource::Sheep,
    ];
}

/// What a tile face shows: one of the five producing terrains, or desert.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Terrain {
    Wood,
    Brick,
    Wheat,
    Ore,
    Sheep,
    Desert,
}

impl Terrain {
    /// The card this terrain yields, or `None` for desert.
    pub fn resource(self) -> Option<Resource> {
        match self {
            Terrain::Wood => Some(Resource::Wood),
            Terrain::Brick => Some(Resource::Brick),
            Terrain::Wheat => Some(Resource::Wheat),
            Terrain::Ore => Some(Resource::Ore),
            Terrain::Sheep => Some(Resource::Sheep),
            Terrain::Desert => None,
        }
    }

    pub fn is_desert(self) -> bool {
        matches!(self, Terrain::Desert)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Color {
    Red,
    Blue,
    Orange,
    White,
}

impl Color {
    pub const ORDERED: [Color; 4] = [Color::Red, Color::Blue, Color::Orange, Color::White];
}
