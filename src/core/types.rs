//! Core type definitions used throughout the codebase

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Turn counter (simulation time unit)
pub type Turn = u32;

/// Grid coordinate (x = column, y = row)
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[display(fmt = "({}, {})", x, y)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The four orthogonal neighbours: up, down, left, right
    pub fn neighbors(&self) -> [Coord; 4] {
        [
            Coord::new(self.x, self.y - 1),
            Coord::new(self.x, self.y + 1),
            Coord::new(self.x - 1, self.y),
            Coord::new(self.x + 1, self.y),
        ]
    }

    /// Manhattan distance in tile steps
    pub fn manhattan(&self, other: &Coord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Coord {
        Coord::new(self.x + dx, self.y + dy)
    }
}

/// A side that can command armies
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    #[display(fmt = "Player")]
    Player,
    #[display(fmt = "AI")]
    Ai,
}

/// Ownership of a city
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    #[display(fmt = "Player")]
    Player,
    #[display(fmt = "AI")]
    Ai,
    #[display(fmt = "Neutral")]
    Neutral,
}

impl Owner {
    /// The commanding faction, if this owner is not neutral
    pub fn faction(&self) -> Option<Faction> {
        match self {
            Owner::Player => Some(Faction::Player),
            Owner::Ai => Some(Faction::Ai),
            Owner::Neutral => None,
        }
    }
}

impl From<Faction> for Owner {
    fn from(faction: Faction) -> Self {
        match faction {
            Faction::Player => Owner::Player,
            Faction::Ai => Owner::Ai,
        }
    }
}

impl PartialEq<Faction> for Owner {
    fn eq(&self, other: &Faction) -> bool {
        *self == Owner::from(*other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan_distance() {
        let a = Coord::new(0, 0);
        assert_eq!(a.manhattan(&Coord::new(3, -4)), 7);
        assert_eq!(a.manhattan(&a), 0);
    }

    #[test]
    fn test_neighbors_are_adjacent() {
        let center = Coord::new(5, 5);
        for n in center.neighbors() {
            assert_eq!(center.manhattan(&n), 1);
        }
    }

    #[test]
    fn test_owner_faction_roundtrip() {
        assert_eq!(Owner::from(Faction::Ai).faction(), Some(Faction::Ai));
        assert_eq!(Owner::Neutral.faction(), None);
        assert!(Owner::Player == Faction::Player);
        assert!(Owner::Neutral != Faction::Player);
    }

    #[test]
    fn test_coord_display() {
        assert_eq!(Coord::new(3, 7).to_string(), "(3, 7)");
        assert_eq!(Faction::Ai.to_string(), "AI");
    }
}
