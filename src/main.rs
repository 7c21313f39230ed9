//! Tile Conquest - Entry Point
//!
//! Builds a game from a seed and optional TOML rules, then either runs a
//! fixed number of turns headless or reads commands from stdin.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tile_conquest::campaign::{assert_invariants, GameState, TileKind, TurnSummary};
use tile_conquest::core::{Coord, Faction, GameConfig, Owner, Result};
use tile_conquest::view::Viewport;

/// Turn-based territorial strategy on a scrolling grid
#[derive(Parser, Debug)]
#[command(name = "tile-conquest")]
#[command(about = "Play a game of Tile Conquest in the terminal")]
struct Args {
    /// Random seed for world generation
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// TOML file overriding the default rules
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run this many turns without prompting, then print a summary
    #[arg(long)]
    turns: Option<u32>,

    /// Print a JSON snapshot after every turn
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tile_conquest=info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GameConfig::load_from_toml(path)?,
        None => GameConfig::default(),
    };

    let mut state = GameState::new_game(config, args.seed)?;
    let center = Coord::new(state.config.map_size / 2, state.config.map_size / 2);
    let mut viewport = Viewport::centered_on(center, state.config.view_size, state.config.map_size);

    if let Some(turns) = args.turns {
        for _ in 0..turns {
            let summary = state.end_turn();
            report_turn(&state, &summary, args.json)?;
        }
        display_status(&state);
        return Ok(());
    }

    println!("\n=== TILE CONQUEST ===");
    println!();
    println!("Commands:");
    println!("  end / e                     - End the turn");
    println!("  run <n>                     - End n turns");
    println!("  train <x> <y> <n>           - Train n soldiers in a city");
    println!("  barracks <x> <y>            - Build barracks in a city");
    println!("  march <x> <y> <tx> <ty> <n> - Send n units from a city to a tile");
    println!("  city <x> <y>                - Show a city");
    println!("  view [<x> <y>]              - Draw the map window (optionally recentred)");
    println!("  pan <dx> <dy>               - Scroll the map window");
    println!("  armies                      - List marching armies");
    println!("  snapshot                    - Print the game state as JSON");
    println!("  quit / q                    - Exit");
    println!();

    let stdin = io::stdin();
    loop {
        display_status(&state);
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let words: Vec<&str> = input.split_whitespace().collect();
        let Some((&command, rest)) = words.split_first() else {
            continue;
        };
        let nums: Option<Vec<i64>> = rest.iter().map(|w| w.parse().ok()).collect();
        let Some(nums) = nums else {
            println!("Arguments must be numbers");
            continue;
        };
        let Ok(nums) = nums
            .iter()
            .map(|n| i32::try_from(*n))
            .collect::<std::result::Result<Vec<i32>, _>>()
        else {
            println!("Arguments must fit in {}..={}", i32::MIN, i32::MAX);
            continue;
        };

        match (command, nums.as_slice()) {
            ("quit" | "q", _) => break,
            ("end" | "e", []) => {
                let summary = state.end_turn();
                report_turn(&state, &summary, args.json)?;
            }
            ("run", [n]) => {
                for _ in 0..*n {
                    let summary = state.end_turn();
                    report_turn(&state, &summary, args.json)?;
                }
            }
            ("train", [x, y, n]) => {
                let at = coord(*x, *y);
                match state.dispatch_train(at, count(*n)) {
                    Ok(()) => println!("Queued {} soldiers at {}", n, at),
                    Err(err) => reject(err),
                }
            }
            ("barracks", [x, y]) => match state.build_barracks(coord(*x, *y)) {
                Ok(()) => println!("Barracks built"),
                Err(err) => reject(err),
            },
            ("march", [x, y, tx, ty, n]) => {
                let from = coord(*x, *y);
                let to = coord(*tx, *ty);
                match state.dispatch_march(from, to, count(*n), Faction::Player) {
                    Ok(id) => println!("{} marching from {} to {}", id, from, to),
                    Err(err) => reject(err),
                }
            }
            ("city", [x, y]) => display_city(&state, coord(*x, *y)),
            ("view", []) => draw_map(&state, &viewport),
            ("view", [x, y]) => {
                viewport = Viewport::centered_on(
                    coord(*x, *y),
                    state.config.view_size,
                    state.config.map_size,
                );
                draw_map(&state, &viewport);
            }
            ("pan", [dx, dy]) => {
                viewport.pan(*dx, *dy, state.config.map_size);
                draw_map(&state, &viewport);
            }
            ("armies", []) => display_armies(&state),
            ("snapshot", []) => println!("{}", state.snapshot().to_json()?),
            _ => println!("Unknown command: {}", input.trim()),
        }
    }

    Ok(())
}

fn coord(x: i32, y: i32) -> Coord {
    Coord::new(x, y)
}

/// Negative counts become zero and are rejected by the command itself
fn count(n: i32) -> u32 {
    u32::try_from(n).unwrap_or(0)
}

fn reject(err: tile_conquest::core::ConquestError) {
    tracing::warn!("Command rejected: {}", err);
    println!("Rejected: {}", err);
}

fn report_turn(state: &GameState, summary: &TurnSummary, json: bool) -> Result<()> {
    for event in &summary.events {
        println!("  {}", event.describe());
    }
    assert_invariants(state);
    if json {
        println!("{}", state.snapshot().to_json()?);
    }
    Ok(())
}

fn display_status(state: &GameState) {
    println!(
        "--- Turn {} | Gold {} | Cities: player {}, AI {}, neutral {} | Marching {} ---",
        state.turn,
        state.player_gold,
        state.grid.count_cities(Owner::Player),
        state.grid.count_cities(Owner::Ai),
        state.grid.count_cities(Owner::Neutral),
        state.marches.len()
    );
}

fn display_city(state: &GameState, at: Coord) {
    match state.grid.city_at(at) {
        Some(city) => {
            println!("{} ({:?}) at {}", city.name, city.kind(), at);
            println!("  Owner:    {}", city.owner);
            println!("  Gold:     {}", city.gold);
            println!("  Armies:   {}", city.armies);
            println!("  Barracks: {}", if city.barracks { "Built" } else { "None" });
            println!("  Training: {}", city.training_queue);
        }
        None => println!("No city at {}", at),
    }
}

fn display_armies(state: &GameState) {
    if state.marches.is_empty() {
        println!("No armies on the march");
        return;
    }
    for army in state.marches.armies() {
        println!(
            "  {} ({}) {} units at {} -> {} ({} steps left)",
            army.id,
            army.owner,
            army.units,
            army.current_pos,
            army.to,
            army.remaining_steps()
        );
    }
}

/// One character per tile; marching armies drawn over the terrain
fn draw_map(state: &GameState, viewport: &Viewport) {
    let mut row = String::new();
    let mut current_y = viewport.y;
    println!("Window at ({}, {}), size {}", viewport.x, viewport.y, viewport.size);

    for (at, tile) in viewport.visible_tiles(&state.grid) {
        if at.y != current_y {
            println!("{}", row);
            row.clear();
            current_y = at.y;
        }
        let glyph = if let Some(army) = state.marches.armies_at(at).first() {
            match army.owner {
                Faction::Player => '>',
                Faction::Ai => '<',
            }
        } else {
            match tile.kind() {
                TileKind::Neutral => '.',
                TileKind::PlayerCity => 'p',
                TileKind::PlayerCapital => 'P',
                TileKind::NeutralCity => 'n',
                TileKind::AiCity => 'A',
            }
        };
        row.push(glyph);
    }
    if !row.is_empty() {
        println!("{}", row);
    }
}
