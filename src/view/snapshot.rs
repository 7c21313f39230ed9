//! Read-only snapshots of game state for renderers and UI panels

use serde::Serialize;

use crate::campaign::map::TileKind;
use crate::campaign::route::{Army, ArmyId};
use crate::campaign::turn::GameState;
use crate::core::error::Result;
use crate::core::types::{Coord, Faction, Owner, Turn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CitySnapshot {
    pub position: Coord,
    pub kind: TileKind,
    pub name: String,
    pub owner: Owner,
    pub gold: u32,
    pub armies: u32,
    pub barracks: bool,
    pub training_queue: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArmySnapshot {
    pub id: ArmyId,
    pub owner: Faction,
    pub from: Coord,
    pub to: Coord,
    pub position: Coord,
    pub units: u32,
    pub remaining_steps: usize,
}

impl From<&Army> for ArmySnapshot {
    fn from(army: &Army) -> Self {
        Self {
            id: army.id,
            owner: army.owner,
            from: army.from,
            to: army.to,
            position: army.current_pos,
            units: army.units,
            remaining_steps: army.remaining_steps(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub turn: Turn,
    pub player_gold: u64,
    pub cities: Vec<CitySnapshot>,
    pub armies: Vec<ArmySnapshot>,
}

impl GameSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl GameState {
    /// Capture everything a renderer needs after a turn
    pub fn snapshot(&self) -> GameSnapshot {
        let cities = self
            .grid
            .cities()
            .map(|(position, city)| CitySnapshot {
                position,
                kind: city.kind(),
                name: city.name.clone(),
                owner: city.owner,
                gold: city.gold,
                armies: city.armies,
                barracks: city.barracks,
                training_queue: city.training_queue,
            })
            .collect();

        GameSnapshot {
            turn: self.turn,
            player_gold: self.player_gold,
            cities,
            armies: self.marches.armies().iter().map(ArmySnapshot::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameConfig;

    #[test]
    fn test_snapshot_lists_cities_and_armies() {
        let mut state = GameState::new_game(GameConfig::default(), 42).unwrap();
        let capital = Coord::new(50, 50);
        state.grid.city_at_mut(capital).unwrap().armies = 12;
        state
            .dispatch_march(capital, Coord::new(50, 47), 5, Faction::Player)
            .unwrap();

        let snap = state.snapshot();

        assert_eq!(snap.turn, 1);
        assert_eq!(snap.player_gold, 250);
        assert_eq!(snap.armies.len(), 1);
        assert_eq!(snap.armies[0].units, 5);
        assert_eq!(snap.armies[0].remaining_steps, 3);
        let capital_snap = snap.cities.iter().find(|c| c.position == capital).unwrap();
        assert_eq!(capital_snap.kind, TileKind::PlayerCapital);
        assert_eq!(capital_snap.armies, 7);
    }

    #[test]
    fn test_snapshot_json() {
        let state = GameState::new_game(GameConfig::default(), 1).unwrap();
        let json = state.snapshot().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["turn"], 1);
        assert!(value["cities"].as_array().unwrap().len() >= 5);
        assert!(json.contains("\"Capital\""));
    }
}
