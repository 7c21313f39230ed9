//! Game state and turn resolution
//!
//! `GameState` owns everything a game needs. Commands mutate it
//! immediately; `end_turn` runs the fixed resolution pipeline:
//! income and training, marches and arrivals, AI decisions, then the turn
//! counter and the player's gold total.

use serde::{Deserialize, Serialize};

use super::ai::run_ai_phase;
use super::events::CampaignEvent;
use super::map::{CityNamer, Grid};
use super::pathfinding::{find_path, Walkability};
use super::route::{resolve_arrival, ArmyId, MarchEngine, MarchStep};
use crate::core::config::GameConfig;
use crate::core::error::{ConquestError, Result};
use crate::core::types::{Coord, Faction, Owner, Turn};

/// What the caller needs to refresh after a turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSummary {
    /// The turn that is now starting
    pub turn: Turn,
    /// Sum of gold over all Player cities
    pub player_gold: u64,
    pub events: Vec<CampaignEvent>,
}

/// Complete state of one game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub grid: Grid,
    pub marches: MarchEngine,
    pub turn: Turn,
    pub player_gold: u64,
    pub config: GameConfig,
    pub(crate) names: CityNamer,
}

impl GameState {
    /// A game on a bare grid, starting at turn 1
    pub fn empty(config: GameConfig) -> Self {
        Self {
            grid: Grid::new(config.map_size),
            marches: MarchEngine::new(),
            turn: 1,
            player_gold: 0,
            config,
            names: CityNamer::default(),
        }
    }

    pub fn walkability(&self) -> Walkability {
        Walkability::new(self.config.walkability)
    }

    /// Recompute the displayed gold total from Player cities
    pub fn recompute_player_gold(&mut self) -> u64 {
        self.player_gold = self
            .grid
            .cities_owned_by(Owner::Player)
            .map(|(_, city)| u64::from(city.gold))
            .sum();
        self.player_gold
    }

    /// Pay for `units` soldiers in the city at `at`; they join at end of turn
    pub fn dispatch_train(&mut self, at: Coord, units: u32) -> Result<()> {
        if units == 0 {
            return Err(ConquestError::invalid("enter a positive number of soldiers to train"));
        }

        let unit_cost = self.config.unit_train_cost;
        let city = self
            .grid
            .tile_at_mut(at)?
            .city_mut()
            .ok_or_else(|| ConquestError::invalid(format!("no city at {}", at)))?;

        if city.owner == Owner::Neutral {
            return Err(ConquestError::invalid(format!("{} takes no orders", city.name)));
        }
        if !city.barracks {
            return Err(ConquestError::invalid(format!("{} has no barracks", city.name)));
        }

        let cost = units
            .checked_mul(unit_cost)
            .ok_or_else(|| ConquestError::invalid("training order too large"))?;
        if cost > city.gold {
            return Err(ConquestError::invalid(format!(
                "not enough gold: {} units cost {}, {} has {}",
                units, cost, city.name, city.gold
            )));
        }

        let queued = city
            .training_queue
            .checked_add(units)
            .ok_or_else(|| ConquestError::invalid(format!("{} cannot queue that many units", city.name)))?;

        city.gold -= cost;
        city.training_queue = queued;
        tracing::debug!("{} queued {} units for {} gold", city.name, units, cost);

        self.recompute_player_gold();
        Ok(())
    }

    /// Build barracks in the city at `at`
    pub fn build_barracks(&mut self, at: Coord) -> Result<()> {
        let cost = self.config.barracks_cost;
        let city = self
            .grid
            .tile_at_mut(at)?
            .city_mut()
            .ok_or_else(|| ConquestError::invalid(format!("no city at {}", at)))?;

        if city.owner == Owner::Neutral {
            return Err(ConquestError::invalid(format!("{} takes no orders", city.name)));
        }
        if city.barracks {
            return Err(ConquestError::invalid(format!("{} already has barracks", city.name)));
        }
        if city.gold < cost {
            return Err(ConquestError::invalid(format!(
                "not enough gold: barracks cost {}, {} has {}",
                cost, city.name, city.gold
            )));
        }

        city.gold -= cost;
        city.barracks = true;
        tracing::debug!("{} built barracks", city.name);

        self.recompute_player_gold();
        Ok(())
    }

    /// Send `units` from the city at `from` toward `to`
    ///
    /// The route is fixed now; units leave the city immediately and take one
    /// step per turn. Nothing changes if any check fails.
    pub fn dispatch_march(
        &mut self,
        from: Coord,
        to: Coord,
        units: u32,
        owner: Faction,
    ) -> Result<ArmyId> {
        if units == 0 {
            return Err(ConquestError::invalid("enter a positive number of units to send"));
        }
        if !self.grid.in_bounds(to) {
            return Err(ConquestError::OutOfBounds(to));
        }

        let city = self
            .grid
            .tile_at(from)?
            .city()
            .ok_or_else(|| ConquestError::invalid(format!("no city at {}", from)))?;

        if city.owner != owner {
            return Err(ConquestError::invalid(format!(
                "{} is not held by {}",
                city.name, owner
            )));
        }
        if units > city.armies {
            return Err(ConquestError::invalid(format!(
                "{} has only {} units, cannot send {}",
                city.name, city.armies, units
            )));
        }
        if from == to {
            return Err(ConquestError::invalid("destination is the source city"));
        }

        let path = find_path(&self.grid, from, to, &self.walkability())
            .ok_or(ConquestError::Unreachable { from, to })?;

        let id = self.marches.enqueue(owner, path, units)?;
        if let Some(city) = self.grid.city_at_mut(from) {
            city.armies -= units;
        }
        Ok(id)
    }

    /// Step 1: income for every city, then finish queued training
    pub fn collect_income(&mut self) -> Vec<CampaignEvent> {
        let mut events = Vec::new();
        let config = &self.config;

        for (position, city) in self.grid.cities_mut() {
            city.gold = city.gold.saturating_add(config.income_for(city.owner));

            if city.training_queue > 0 {
                let units = city.training_queue;
                city.armies = city.armies.saturating_add(units);
                city.training_queue = 0;
                tracing::debug!("{} finished training {} units", city.name, units);
                events.push(CampaignEvent::TrainingCompleted { position, units });
            }
        }

        events
    }

    /// Step 2: move every army and resolve arrivals in registration order
    pub fn advance_marches(&mut self) -> Vec<CampaignEvent> {
        let mut events = Vec::new();

        for step in self.marches.advance() {
            match step {
                MarchStep::Moved { army, position } => {
                    events.push(CampaignEvent::ArmyMoved { army, position });
                }
                MarchStep::Arrived(army) => {
                    match resolve_arrival(&mut self.grid, &army, &mut self.names, &self.config) {
                        Ok(outcome) => events.push(CampaignEvent::ArmyArrived {
                            army: army.id,
                            owner: army.owner,
                            outcome,
                        }),
                        Err(err) => {
                            debug_assert!(false, "arrival of {} failed: {}", army.id, err);
                            tracing::error!("Dropping {} after failed arrival: {}", army.id, err);
                        }
                    }
                }
            }
        }

        events
    }

    /// Resolve the current turn and start the next one
    pub fn end_turn(&mut self) -> TurnSummary {
        let mut events = self.collect_income();
        events.extend(self.advance_marches());
        events.extend(run_ai_phase(self));

        self.turn += 1;
        let player_gold = self.recompute_player_gold();
        events.push(CampaignEvent::TurnEnded {
            turn: self.turn,
            player_gold,
        });

        tracing::info!(
            "Turn {} begins: player gold {}, {} armies marching",
            self.turn,
            player_gold,
            self.marches.len()
        );

        TurnSummary {
            turn: self.turn,
            player_gold,
            events,
        }
    }
}
