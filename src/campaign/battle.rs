//! Battle resolution for campaign layer
//!
//! When an army arrives at a city held by another owner, both sides deal a
//! fixed share of their strength as damage in a single exchange. There is no
//! randomness and no retreat: attackers that fail to take the city are lost.

use serde::{Deserialize, Serialize};

use crate::campaign::map::Grid;
use crate::core::error::{ConquestError, Result};
use crate::core::types::{Coord, Faction, Owner};

/// Outcome of a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    /// Defenders wiped out with attackers left standing; the city changes hands
    Captured,
    /// The city holds; surviving attackers are lost
    Repelled,
}

/// Pure numeric result of one exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleResult {
    pub attacker_remaining: u32,
    pub defender_remaining: u32,
    pub outcome: BattleOutcome,
}

/// Battle as applied to the map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleReport {
    pub position: Coord,
    pub city: String,
    pub attacker: Faction,
    pub defender: Owner,
    pub attacker_units: u32,
    pub defender_units: u32,
    pub attacker_remaining: u32,
    pub defender_remaining: u32,
    pub outcome: BattleOutcome,
}

/// Damage dealt by `units` at the given casualty percentage, rounded down
pub fn casualties(units: u32, casualty_percent: u32) -> u32 {
    (u64::from(units) * u64::from(casualty_percent) / 100) as u32
}

/// Resolve one exchange between an attacking army and a garrison
pub fn resolve_battle(attacker_units: u32, defender_units: u32, casualty_percent: u32) -> BattleResult {
    let damage_to_defender = casualties(attacker_units, casualty_percent);
    let damage_to_attacker = casualties(defender_units, casualty_percent);

    let attacker_remaining = attacker_units.saturating_sub(damage_to_attacker);
    let defender_remaining = defender_units.saturating_sub(damage_to_defender);

    let outcome = if attacker_remaining > 0 && defender_remaining == 0 {
        BattleOutcome::Captured
    } else {
        BattleOutcome::Repelled
    };

    BattleResult {
        attacker_remaining,
        defender_remaining,
        outcome,
    }
}

/// Fight for the city at `position` and write the result back to the grid
pub fn apply_battle(
    grid: &mut Grid,
    position: Coord,
    attacker: Faction,
    attacker_units: u32,
    casualty_percent: u32,
) -> Result<BattleReport> {
    let city = grid
        .city_at_mut(position)
        .ok_or_else(|| ConquestError::invalid(format!("no city to attack at {}", position)))?;

    let defender = city.owner;
    let defender_units = city.armies;
    let result = resolve_battle(attacker_units, defender_units, casualty_percent);

    match result.outcome {
        BattleOutcome::Captured => {
            city.owner = attacker.into();
            city.capital = false;
            city.armies = result.attacker_remaining;
            tracing::info!(
                "{} captured {} at {} ({} survivors)",
                attacker,
                city.name,
                position,
                result.attacker_remaining
            );
        }
        BattleOutcome::Repelled => {
            city.armies = result.defender_remaining;
            tracing::info!(
                "{} held {} at {} against {} ({} defenders left)",
                defender,
                city.name,
                position,
                attacker,
                result.defender_remaining
            );
        }
    }

    Ok(BattleReport {
        position,
        city: city.name.clone(),
        attacker,
        defender,
        attacker_units,
        defender_units,
        attacker_remaining: result.attacker_remaining,
        defender_remaining: result.defender_remaining,
        outcome: result.outcome,
    })
}
