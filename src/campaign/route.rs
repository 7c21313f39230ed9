//! Army marches for campaign layer
//!
//! Armies are groups of units walking a precomputed route between two
//! tiles. They advance one tile per turn and are resolved when they reach
//! the end of their route.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use super::battle::{apply_battle, BattleReport};
use super::map::{City, CityNamer, Grid, Tile};
use crate::core::config::GameConfig;
use crate::core::error::{ConquestError, Result};
use crate::core::types::{Coord, Faction, Owner};

/// Unique identifier for an army
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[display(fmt = "army #{}", _0)]
pub struct ArmyId(pub u32);

/// Lifecycle of a marching army
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarchState {
    Marching,
    Arrived,
}

/// A marching group on the campaign map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Army {
    pub id: ArmyId,
    pub owner: Faction,
    pub from: Coord,
    pub to: Coord,
    pub current_pos: Coord,
    pub units: u32,
    pub path: Vec<Coord>,
    /// Index of `current_pos` in `path`
    pub path_index: usize,
}

impl Army {
    fn new(id: ArmyId, owner: Faction, path: Vec<Coord>, units: u32) -> Self {
        let from = path[0];
        let to = path[path.len() - 1];
        Self {
            id,
            owner,
            from,
            to,
            current_pos: from,
            units,
            path,
            path_index: 0,
        }
    }

    pub fn state(&self) -> MarchState {
        if self.path_index + 1 >= self.path.len() {
            MarchState::Arrived
        } else {
            MarchState::Marching
        }
    }

    /// Tiles left to walk before arrival
    pub fn remaining_steps(&self) -> usize {
        self.path.len().saturating_sub(self.path_index + 1)
    }

    /// Move one tile along the route
    fn step(&mut self) -> MarchState {
        if self.path_index + 1 < self.path.len() {
            self.path_index += 1;
            self.current_pos = self.path[self.path_index];
        }
        self.state()
    }
}

/// Result of advancing one army by one turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarchStep {
    Moved { army: ArmyId, position: Coord },
    /// The army reached its destination and left the active list
    Arrived(Army),
}

/// What happened when an army reached its destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArrivalOutcome {
    /// Joined a friendly garrison
    Reinforced { position: Coord, city: String, units: u32 },
    /// Founded a city on a bare tile
    Settled { position: Coord, city: String, owner: Faction, units: u32 },
    /// Attacked a city held by someone else
    Battle(BattleReport),
}

/// Active marches, kept in registration order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarchEngine {
    armies: Vec<Army>,
    next_army_id: u32,
}

impl MarchEngine {
    pub fn new() -> Self {
        Self {
            armies: Vec::new(),
            next_army_id: 1,
        }
    }

    /// Register a new army on a route from `path[0]` to its last tile
    ///
    /// The caller has already removed the units from the source city.
    pub fn enqueue(&mut self, owner: Faction, path: Vec<Coord>, units: u32) -> Result<ArmyId> {
        if units == 0 {
            return Err(ConquestError::invalid("an army needs at least one unit"));
        }
        if path.len() < 2 {
            return Err(ConquestError::invalid("a march needs at least one step"));
        }

        // Engines restored from a snapshot start at 0
        self.next_army_id = self.next_army_id.max(1);
        let id = ArmyId(self.next_army_id);
        self.next_army_id += 1;

        let army = Army::new(id, owner, path, units);
        tracing::debug!(
            "{} ({}) marching {} -> {} with {} units, {} steps",
            id,
            owner,
            army.from,
            army.to,
            units,
            army.remaining_steps()
        );
        self.armies.push(army);
        Ok(id)
    }

    /// Advance every army by one tile, in registration order
    ///
    /// Arrived armies are removed and returned inside the step list so the
    /// caller can resolve them in the same order.
    pub fn advance(&mut self) -> Vec<MarchStep> {
        let mut steps = Vec::with_capacity(self.armies.len());
        let mut marching = Vec::with_capacity(self.armies.len());

        for mut army in self.armies.drain(..) {
            match army.step() {
                MarchState::Marching => {
                    steps.push(MarchStep::Moved {
                        army: army.id,
                        position: army.current_pos,
                    });
                    marching.push(army);
                }
                MarchState::Arrived => steps.push(MarchStep::Arrived(army)),
            }
        }

        self.armies = marching;
        steps
    }

    pub fn armies(&self) -> &[Army] {
        &self.armies
    }

    pub fn get(&self, id: ArmyId) -> Option<&Army> {
        self.armies.iter().find(|a| a.id == id)
    }

    /// All armies currently standing on a tile
    pub fn armies_at(&self, position: Coord) -> Vec<&Army> {
        self.armies.iter().filter(|a| a.current_pos == position).collect()
    }

    /// Armies of one faction still on the road
    pub fn armies_of(&self, owner: Faction) -> impl Iterator<Item = &Army> {
        self.armies.iter().filter(move |a| a.owner == owner)
    }

    pub fn len(&self) -> usize {
        self.armies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.armies.is_empty()
    }
}

/// Resolve an army that reached its destination
pub fn resolve_arrival(
    grid: &mut Grid,
    army: &Army,
    names: &mut CityNamer,
    config: &GameConfig,
) -> Result<ArrivalOutcome> {
    let position = army.to;
    let holder = grid.tile_at(position)?.city().map(|city| city.owner);

    match holder {
        Some(owner) if owner == army.owner => {
            let city = grid
                .city_at_mut(position)
                .ok_or(ConquestError::OutOfBounds(position))?;
            city.armies += army.units;
            tracing::debug!("{} reinforced {} with {} units", army.id, city.name, army.units);
            Ok(ArrivalOutcome::Reinforced {
                position,
                city: city.name.clone(),
                units: army.units,
            })
        }
        Some(_) => {
            let report = apply_battle(grid, position, army.owner, army.units, config.casualty_percent)?;
            Ok(ArrivalOutcome::Battle(report))
        }
        None => {
            let name = names.next_name();
            let city = City::new(name.clone(), Owner::from(army.owner))
                .with_gold(config.settlement_gold)
                .with_armies(army.units);
            grid.set_tile(position, Tile::City(city))?;
            tracing::info!("{} founded {} at {} with {} units", army.owner, name, position, army.units);
            Ok(ArrivalOutcome::Settled {
                position,
                city: name,
                owner: army.owner,
                units: army.units,
            })
        }
    }
}
