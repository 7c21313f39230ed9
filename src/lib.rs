//! Tile Conquest - turn-based territorial strategy simulation
//!
//! Cities earn gold and train armies; armies march along A* routes to settle
//! land, reinforce allies, or storm enemy cities; an AI opponent does the
//! same every turn.

pub mod campaign;
pub mod core;
pub mod view;
