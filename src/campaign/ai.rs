//! AI opponent
//!
//! Each AI city decides on its own every turn: buy a training batch when it
//! can afford one, then attack the first Player city found in a small square
//! around it if it has enough stationed units. No global planning, no
//! retreats, no coordination between cities.

use super::events::CampaignEvent;
use super::map::Grid;
use super::turn::GameState;
use crate::core::error::ConquestError;
use crate::core::types::{Coord, Faction, Owner};

/// Player cities within `radius` of `center`, in row-major scan order
pub fn targets_in_range(grid: &Grid, center: Coord, radius: i32) -> Vec<Coord> {
    let mut targets = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx == 0 && dy == 0 {
                continue;
            }
            let coord = center.offset(dx, dy);
            if let Some(city) = grid.city_at(coord) {
                if city.owner == Owner::Player {
                    targets.push(coord);
                }
            }
        }
    }
    targets
}

/// Run the AI decision phase for every AI city
pub fn run_ai_phase(state: &mut GameState) -> Vec<CampaignEvent> {
    let mut events = Vec::new();
    let cost = state.config.ai_train_cost;
    let batch = state.config.ai_train_batch;
    let threshold = state.config.ai_attack_threshold;
    let attack_units = state.config.ai_attack_units;
    let radius = state.config.ai_scan_radius;

    for position in state.grid.coords_of(Owner::Ai) {
        let Some(city) = state.grid.city_at_mut(position) else {
            continue;
        };

        if city.barracks && city.gold >= cost {
            city.gold -= cost;
            city.training_queue += batch;
            tracing::debug!("AI {} queued {} units", city.name, batch);
            events.push(CampaignEvent::AiTrainingQueued {
                position,
                units: batch,
                cost,
            });
        }

        if city.armies < threshold {
            continue;
        }

        for target in targets_in_range(&state.grid, position, radius) {
            match state.dispatch_march(position, target, attack_units, Faction::Ai) {
                Ok(army) => {
                    tracing::debug!("AI attacking {} from {} with {}", target, position, army);
                    events.push(CampaignEvent::AiMarchDispatched {
                        army,
                        from: position,
                        to: target,
                        units: attack_units,
                    });
                    break;
                }
                Err(ConquestError::Unreachable { .. }) => continue,
                Err(err) => {
                    tracing::warn!("AI dispatch from {} failed: {}", position, err);
                    break;
                }
            }
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::map::City;
    use crate::core::config::GameConfig;

    fn state_with(size: i32) -> GameState {
        GameState::empty(GameConfig {
            map_size: size,
            view_size: size.min(20),
            ..GameConfig::default()
        })
    }

    #[test]
    fn test_scan_order_is_row_major() {
        let mut grid = Grid::new(20);
        let center = Coord::new(10, 10);
        grid.set_tile(Coord::new(12, 8), City::new("b", Owner::Player).into()).unwrap();
        grid.set_tile(Coord::new(7, 8), City::new("a", Owner::Player).into()).unwrap();
        grid.set_tile(Coord::new(10, 14), City::new("c", Owner::Player).into()).unwrap();
        grid.set_tile(Coord::new(10, 15), City::new("far", Owner::Player).into()).unwrap();
        grid.set_tile(Coord::new(9, 9), City::new("own", Owner::Ai).into()).unwrap();

        let targets = targets_in_range(&grid, center, 4);

        assert_eq!(
            targets,
            vec![Coord::new(7, 8), Coord::new(12, 8), Coord::new(10, 14)]
        );
    }

    #[test]
    fn test_scan_clips_at_map_edge() {
        let mut grid = Grid::new(5);
        grid.set_tile(Coord::new(0, 0), City::new("p", Owner::Player).into()).unwrap();
        assert_eq!(targets_in_range(&grid, Coord::new(1, 1), 4), vec![Coord::new(0, 0)]);
    }

    #[test]
    fn test_ai_trains_and_attacks() {
        let mut state = state_with(20);
        let ai = Coord::new(10, 10);
        let player = Coord::new(12, 11);
        state
            .grid
            .set_tile(ai, City::new("Enemy", Owner::Ai).with_gold(25).with_barracks().with_armies(10).into())
            .unwrap();
        state
            .grid
            .set_tile(player, City::new("Border", Owner::Player).with_armies(1).into())
            .unwrap();

        let events = run_ai_phase(&mut state);

        let city = state.grid.city_at(ai).unwrap();
        assert_eq!(city.gold, 5);
        assert_eq!(city.training_queue, 5);
        assert_eq!(city.armies, 0);
        assert_eq!(state.marches.len(), 1);
        let army = &state.marches.armies()[0];
        assert_eq!(army.owner, Faction::Ai);
        assert_eq!(army.to, player);
        assert_eq!(army.units, 10);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_ai_without_barracks_or_gold_does_not_train() {
        let mut state = state_with(10);
        let poor = Coord::new(2, 2);
        let unbuilt = Coord::new(7, 7);
        state
            .grid
            .set_tile(poor, City::new("Poor", Owner::Ai).with_gold(19).with_barracks().into())
            .unwrap();
        state
            .grid
            .set_tile(unbuilt, City::new("Unbuilt", Owner::Ai).with_gold(100).into())
            .unwrap();

        let events = run_ai_phase(&mut state);

        assert!(events.is_empty());
        assert_eq!(state.grid.city_at(poor).unwrap().training_queue, 0);
        assert_eq!(state.grid.city_at(unbuilt).unwrap().gold, 100);
    }

    #[test]
    fn test_ai_holds_below_threshold() {
        let mut state = state_with(10);
        let ai = Coord::new(4, 4);
        state
            .grid
            .set_tile(ai, City::new("Enemy", Owner::Ai).with_armies(9).into())
            .unwrap();
        state
            .grid
            .set_tile(Coord::new(5, 5), City::new("p", Owner::Player).into())
            .unwrap();

        run_ai_phase(&mut state);

        assert!(state.marches.is_empty());
        assert_eq!(state.grid.city_at(ai).unwrap().armies, 9);
    }

    #[test]
    fn test_ai_skips_unreachable_target() {
        let mut state = state_with(12);
        let ai = Coord::new(5, 5);
        state
            .grid
            .set_tile(ai, City::new("Enemy", Owner::Ai).with_armies(20).into())
            .unwrap();

        // First target in scan order, walled in by neutral cities
        let sealed = Coord::new(1, 1);
        state.grid.set_tile(sealed, City::new("Sealed", Owner::Player).into()).unwrap();
        for n in sealed.neighbors() {
            state.grid.set_tile(n, City::new("wall", Owner::Neutral).into()).unwrap();
        }
        let open = Coord::new(8, 8);
        state.grid.set_tile(open, City::new("Open", Owner::Player).into()).unwrap();

        run_ai_phase(&mut state);

        assert_eq!(state.marches.len(), 1);
        assert_eq!(state.marches.armies()[0].to, open);
        assert_eq!(state.grid.city_at(ai).unwrap().armies, 10);
    }

    #[test]
    fn test_one_attack_per_city_per_turn() {
        let mut state = state_with(12);
        let ai = Coord::new(5, 5);
        state
            .grid
            .set_tile(ai, City::new("Enemy", Owner::Ai).with_armies(30).into())
            .unwrap();
        state.grid.set_tile(Coord::new(3, 5), City::new("a", Owner::Player).into()).unwrap();
        state.grid.set_tile(Coord::new(7, 5), City::new("b", Owner::Player).into()).unwrap();

        run_ai_phase(&mut state);

        assert_eq!(state.marches.len(), 1);
        assert_eq!(state.grid.city_at(ai).unwrap().armies, 20);
    }
}
