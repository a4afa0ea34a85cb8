//! Headless playtest
//!
//! Plays a seeded match with a greedy driver and prints the final board as JSON.

use aergewin::core::config::PlayerConfig;
use aergewin::core::types::ResourceKind;
use aergewin::entity::GameEntity;
use aergewin::random::SeededRandomness;
use aergewin::terrain::tile_at;
use aergewin::{GameConfig, GameEngine, Result};
use clap::Parser;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Hard stop in case every player keeps passing
const MAX_STEPS: u32 = 10_000;

/// Headless playtest - greedy players on a seeded board
#[derive(Parser, Debug)]
#[command(name = "playtest")]
#[command(about = "Play a seeded match headlessly and print the final board")]
struct Args {
    /// Match configuration (TOML). Defaults apply when omitted.
    #[arg(long)]
    config: Option<String>,

    /// Comma separated player names, overriding the configuration roster
    #[arg(long, value_delimiter = ',')]
    players: Vec<String>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Number of days to play
    #[arg(long, default_value_t = 5)]
    days: u32,
}

#[derive(Serialize)]
struct PlayerReport {
    name: String,
    position: [i32; 2],
    hp: u32,
    experience: u32,
    inventory: Vec<(ResourceKind, u32)>,
}

#[derive(Serialize)]
struct Report {
    seed: u64,
    turn: u32,
    steps: u32,
    tiles: usize,
    known_cells: usize,
    village_hp: u32,
    barricades: u32,
    village_stock: Vec<(ResourceKind, u32)>,
    current_events: Vec<String>,
    players: Vec<PlayerReport>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("aergewin=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::from_toml_str(&std::fs::read_to_string(path)?)?,
        None => GameConfig::with_players(["Alice", "Bob", "Chloé", "Dimitri"]),
    };
    if !args.players.is_empty() {
        config.players = args.players.iter().map(PlayerConfig::new).collect();
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut driver = ChaCha8Rng::seed_from_u64(seed.wrapping_add(1));
    let mut engine = GameEngine::new(config, SeededRandomness::new(seed))?;
    engine.start().await?;

    let mut steps = 0;
    while engine.current_turn()? <= args.days && steps < MAX_STEPS {
        play_step(&mut engine, &mut driver)?;
        steps += 1;
    }

    let report = build_report(&engine, seed, steps)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Unload at the village, use the zone if possible, otherwise walk somewhere
fn play_step(engine: &mut GameEngine, driver: &mut ChaCha8Rng) -> Result<()> {
    let name = engine.current_player()?.name().to_string();

    for resource in ResourceKind::all() {
        while engine.drop_resource(resource)? {}
    }

    if let Some(action) = engine.available_actions()?.first() {
        engine.activate_zone(&name, action.name)?;
        return Ok(());
    }

    let position = engine.current_player()?.position();
    let mut targets: Vec<_> = engine
        .grid()
        .neighbors_of(position)
        .into_iter()
        .filter(|cell| *cell != position)
        .filter(|cell| tile_at(engine.terrain(), *cell).is_some() || !engine.terrain_deck().is_empty())
        .collect();
    targets.dedup();
    targets.shuffle(driver);

    for cell in targets {
        if engine.move_current_player_to(cell)? {
            return Ok(());
        }
    }

    engine.go_to_next_player()?;
    Ok(())
}

fn build_report(engine: &GameEngine, seed: u64, steps: u32) -> Result<Report> {
    let village = engine.village();
    Ok(Report {
        seed,
        turn: engine.current_turn()?,
        steps,
        tiles: engine.terrain().len(),
        known_cells: engine.grid().len(),
        village_hp: village.hp(),
        barricades: village.barricades(),
        village_stock: engine
            .village_inventory()
            .map(|stock| stock.entries())
            .unwrap_or_default(),
        current_events: engine.current_events().iter().map(|e| e.name.clone()).collect(),
        players: engine
            .players()
            .iter()
            .map(|p| PlayerReport {
                name: p.name().to_string(),
                position: [p.position().q, p.position().r],
                hp: p.hp(),
                experience: p.experience(),
                inventory: p.inventory().entries(),
            })
            .collect(),
    })
}
