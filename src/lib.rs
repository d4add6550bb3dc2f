#![warn(clippy::all)]
#![deny(rust_2018_idioms)]

pub mod board;
pub mod coords;
pub mod game;
pub mod render;
pub mod types;

pub use board::{Board, Building, CornerId, EdgeId, Hex, PlacementError};
pub use coords::{Axial, Direction};
pub use game::{DiceRoll, GameSession, PlayerState, ResourceBundle, SessionConfig};
pub use types::{Color, Resource, Terrain};
