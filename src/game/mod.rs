pub mod players;
pub mod resources;
pub mod session;

pub use players::{CITY_SUPPLY, PlayerState, ROAD_SUPPLY, SETTLEMENT_SUPPLY};
pub use resources::{COST_CITY, COST_ROAD, COST_SETTLEMENT, ResourceBundle};
pub use session::{DiceRoll, GameSession, SessionConfig};
