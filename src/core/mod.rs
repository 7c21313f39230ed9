pub mod config;
pub mod error;
pub mod types;

pub use config::{GameConfig, WalkabilityRules};
pub use error::{ConquestError, Result};
pub use types::{Coord, Faction, Owner, Turn};
