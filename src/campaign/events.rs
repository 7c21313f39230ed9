//! Events emitted while a turn resolves

use serde::{Deserialize, Serialize};

use super::route::{ArmyId, ArrivalOutcome};
use crate::core::types::{Coord, Faction, Turn};

/// Something that happened during a turn, in resolution order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CampaignEvent {
    TrainingCompleted { position: Coord, units: u32 },
    ArmyMoved { army: ArmyId, position: Coord },
    ArmyArrived { army: ArmyId, owner: Faction, outcome: ArrivalOutcome },
    AiTrainingQueued { position: Coord, units: u32, cost: u32 },
    AiMarchDispatched { army: ArmyId, from: Coord, to: Coord, units: u32 },
    TurnEnded { turn: Turn, player_gold: u64 },
}

impl CampaignEvent {
    /// Short human-readable description for logs and terminals
    pub fn describe(&self) -> String {
        match self {
            CampaignEvent::TrainingCompleted { position, units } => {
                format!("{} units finished training at {}", units, position)
            }
            CampaignEvent::ArmyMoved { army, position } => {
                format!("{} moved to {}", army, position)
            }
            CampaignEvent::ArmyArrived { army, owner, outcome } => match outcome {
                ArrivalOutcome::Reinforced { city, units, .. } => {
                    format!("{} ({}) reinforced {} with {} units", army, owner, city, units)
                }
                ArrivalOutcome::Settled { city, position, units, .. } => {
                    format!("{} ({}) founded {} at {} with {} units", army, owner, city, position, units)
                }
                ArrivalOutcome::Battle(report) => format!(
                    "{} ({}) attacked {} ({}): {:?}, {} attackers and {} defenders left",
                    army,
                    owner,
                    report.city,
                    report.defender,
                    report.outcome,
                    report.attacker_remaining,
                    report.defender_remaining
                ),
            },
            CampaignEvent::AiTrainingQueued { position, units, cost } => {
                format!("AI queued {} units at {} for {} gold", units, position, cost)
            }
            CampaignEvent::AiMarchDispatched { army, from, to, units } => {
                format!("AI sent {} ({} units) from {} toward {}", army, units, from, to)
            }
            CampaignEvent::TurnEnded { turn, player_gold } => {
                format!("Turn {} begins, player gold {}", turn, player_gold)
            }
        }
    }
}
