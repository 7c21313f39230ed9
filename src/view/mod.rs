//! View layer - what renderers and UI panels read after each turn

pub mod snapshot;
pub mod viewport;

pub use snapshot::{ArmySnapshot, CitySnapshot, GameSnapshot};
pub use viewport::Viewport;
