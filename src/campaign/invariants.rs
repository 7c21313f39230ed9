//! Game invariants - sanity checks that detect bugs.
//!
//! These should never fire for a state built and advanced through the
//! public API. Tests and the driver's debug mode run them after each turn.

use super::map::TileKind;
use super::turn::GameState;
use crate::core::types::Owner;

/// Invariant violation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

fn violation(message: String) -> InvariantViolation {
    InvariantViolation { message }
}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let grid = &state.grid;

    for army in state.marches.armies() {
        if army.units == 0 {
            violations.push(violation(format!("{} is marching with no units", army.id)));
        }

        if army.path_index + 1 >= army.path.len() {
            violations.push(violation(format!(
                "{} is still active at path index {} of {}",
                army.id,
                army.path_index,
                army.path.len()
            )));
        } else if army.path[army.path_index] != army.current_pos {
            violations.push(violation(format!(
                "{} stands at {} but its path says {}",
                army.id, army.current_pos, army.path[army.path_index]
            )));
        }

        if army.path.first() != Some(&army.from) || army.path.last() != Some(&army.to) {
            violations.push(violation(format!(
                "{} path does not run from {} to {}",
                army.id, army.from, army.to
            )));
        }

        if let Some(bad) = army.path.iter().find(|c| !grid.in_bounds(**c)) {
            violations.push(violation(format!("{} path leaves the map at {}", army.id, bad)));
        }

        if army.path.windows(2).any(|w| w[0].manhattan(&w[1]) != 1) {
            violations.push(violation(format!("{} path is not 4-connected", army.id)));
        }
    }

    let capitals = grid
        .cities_owned_by(Owner::Player)
        .filter(|(_, city)| city.kind() == TileKind::PlayerCapital)
        .count();
    if capitals > 1 {
        violations.push(violation(format!("Player holds {} capitals", capitals)));
    }

    violations
}

/// Assert all game invariants hold (debug builds only).
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &GameState) {
    let violations = check_invariants(state);
    if !violations.is_empty() {
        for v in &violations {
            tracing::error!("{}", v);
        }
        panic!(
            "Game invariants violated at turn {}: {} violation(s)",
            state.turn,
            violations.len()
        );
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &GameState) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::map::City;
    use crate::core::config::GameConfig;
    use crate::core::types::{Coord, Faction};

    #[test]
    fn test_fresh_game_is_clean() {
        let state = GameState::new_game(GameConfig::default(), 42).unwrap();
        assert!(check_invariants(&state).is_empty());
    }

    #[test]
    fn test_invariants_hold_over_many_turns() {
        let mut state = GameState::new_game(GameConfig::default(), 9).unwrap();
        let capital = Coord::new(50, 50);
        state.grid.city_at_mut(capital).unwrap().armies = 40;
        state
            .dispatch_march(capital, Coord::new(50, 44), 15, Faction::Player)
            .unwrap();

        for _ in 0..30 {
            state.end_turn();
            assert_invariants(&state);
        }
    }

    #[test]
    fn test_detects_two_capitals() {
        let mut state = GameState::empty(GameConfig {
            map_size: 6,
            view_size: 6,
            ..GameConfig::default()
        });
        state.grid.set_tile(Coord::new(0, 0), City::new("a", Owner::Player).as_capital().into()).unwrap();
        state.grid.set_tile(Coord::new(5, 5), City::new("b", Owner::Player).as_capital().into()).unwrap();

        let violations = check_invariants(&state);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].to_string().contains("2 capitals"));
    }
}
