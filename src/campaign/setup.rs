//! Initial world generation

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::map::{City, CityNamer, Grid};
use super::turn::GameState;
use crate::core::config::{GameConfig, STARTING_CITY_OFFSETS};
use crate::core::error::{ConquestError, Result};
use crate::core::types::{Coord, Owner};

/// Minimum Manhattan distance between a new neutral city and any other city
const NEUTRAL_CITY_SPACING: u32 = 3;

/// Placement attempts per requested neutral city before giving up
const PLACEMENT_ATTEMPTS: u32 = 200;


impl GameState {
    /// Build the opening position for a new game
    ///
    /// The same config and seed always produce the same world.
    pub fn new_game(config: GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let mut state = GameState::empty(config);
        let center = Coord::new(state.config.map_size / 2, state.config.map_size / 2);

        let capital = City::new("Capital", Owner::Player)
            .as_capital()
            .with_gold(state.config.capital_gold)
            .with_barracks();
        state.grid.set_tile(center, capital.into())?;

        let mut founded = 0;
        for (i, (dx, dy)) in STARTING_CITY_OFFSETS.iter().enumerate() {
            let coord = center.offset(*dx, *dy);
            if !state.grid.in_bounds(coord) {
                continue;
            }
            let city = City::new(format!("City {}", i + 1), Owner::Player)
                .with_gold(state.config.city_gold)
                .with_barracks();
            state.grid.set_tile(coord, city.into())?;
            founded = i as u32 + 1;
        }
        state.names = CityNamer::starting_after(founded);

        let (ox, oy) = state.config.ai_capital_offset;
        let ai_capital = center.offset(ox, oy);
        if state.grid.tile_at(ai_capital)?.city().is_some() {
            return Err(ConquestError::Config(format!(
                "AI capital at {} would replace an existing city",
                ai_capital
            )));
        }
        let enemy = City::new("Enemy Capital", Owner::Ai)
            .as_capital()
            .with_gold(state.config.capital_gold)
            .with_armies(state.config.ai_starting_armies)
            .with_barracks();
        state.grid.set_tile(ai_capital, enemy.into())?;

        let placed = place_neutral_cities(&mut state.grid, &state.config, &mut state.names, seed)?;
        state.recompute_player_gold();

        tracing::info!(
            "New game: {}x{} map, seed {}, capital at {}, AI at {}, {} neutral cities",
            state.config.map_size,
            state.config.map_size,
            seed,
            center,
            ai_capital,
            placed
        );

        Ok(state)
    }
}

fn too_close_to_city(grid: &Grid, coord: Coord) -> bool {
    let r = NEUTRAL_CITY_SPACING as i32 - 1;
    for dy in -r..=r {
        for dx in -r..=r {
            let other = coord.offset(dx, dy);
            if coord.manhattan(&other) < NEUTRAL_CITY_SPACING && grid.city_at(other).is_some() {
                return true;
            }
        }
    }
    false
}

/// Scatter garrisoned neutral cities over empty land; returns how many fit
fn place_neutral_cities(
    grid: &mut Grid,
    config: &GameConfig,
    names: &mut CityNamer,
    seed: u64,
) -> Result<u32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let size = grid.size();
    let mut placed = 0;
    let mut attempts = 0;
    let max_attempts = config.neutral_city_count.saturating_mul(PLACEMENT_ATTEMPTS);

    while placed < config.neutral_city_count && attempts < max_attempts {
        attempts += 1;
        let coord = Coord::new(rng.gen_range(0..size), rng.gen_range(0..size));
        if too_close_to_city(grid, coord) {
            continue;
        }

        let garrison = rng.gen_range(config.neutral_garrison_min..=config.neutral_garrison_max);
        let city = City::new(names.next_name(), Owner::Neutral).with_armies(garrison);
        grid.set_tile(coord, city.into())?;
        placed += 1;
    }

    if placed < config.neutral_city_count {
        tracing::warn!(
            "Only placed {} of {} neutral cities",
            placed,
            config.neutral_city_count
        );
    }

    Ok(placed)
}
