pub mod ai;
pub mod battle;
pub mod events;
pub mod invariants;
pub mod map;
pub mod pathfinding;
pub mod route;
pub mod setup;
pub mod turn;

pub use ai::{run_ai_phase, targets_in_range};
pub use battle::{apply_battle, resolve_battle, BattleOutcome, BattleReport, BattleResult};
pub use events::CampaignEvent;
pub use invariants::{assert_invariants, check_invariants, InvariantViolation};
pub use map::{City, CityNamer, Grid, Tile, TileKind};
pub use pathfinding::{find_path, path_steps, Walkability};
pub use route::{resolve_arrival, Army, ArmyId, ArrivalOutcome, MarchEngine, MarchState, MarchStep};
pub use turn::{GameState, TurnSummary};
