use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use game_core::{
    Command, CommandOutcome, ContentPack, DIRECTIONS, Game, InputMode, ItemPlace, Pos, Tile,
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    steps: u32,
    /// Write the accepted-command journal here when the run stops
    #[arg(long)]
    journal_out: Option<PathBuf>,
    /// Content pack TOML (defaults to the built-in pack)
    #[arg(short, long)]
    content: Option<PathBuf>,
    /// Print the summary as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Summary {
    seed: u64,
    commands: u32,
    turns: u64,
    rejected: u32,
    player_alive: bool,
    snapshot_hash: u64,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn random_command(rng: &mut ChaCha8Rng, game: &Game) -> Command {
    if let InputMode::Targeting(_) = game.mode() {
        if rng.next_u32() % 5 == 0 {
            return Command::CancelTargeting;
        }
        let map = &game.world().map;
        let x = (rng.next_u64() % map.width as u64) as i32;
        let y = (rng.next_u64() % map.height as u64) as i32;
        return Command::SelectTarget { pos: Pos::new(x, y) };
    }
    let (dx, dy) = choose(rng, &DIRECTIONS);
    let slot = (rng.next_u32() % 3) as usize;
    // Bias to movement; the rest exercise inventory paths
    choose(
        rng,
        &[
            Command::Bump { dx, dy },
            Command::Bump { dx, dy },
            Command::Bump { dx, dy },
            Command::Wait,
            Command::PickUp,
            Command::Use { slot },
            Command::Drop { slot },
        ],
    )
}

fn check_invariants(game: &Game) -> Result<()> {
    let world = game.world();
    for (id, actor) in &world.actors {
        let hp = actor.fighter.hp();
        if !(0..=actor.fighter.max_hp()).contains(&hp) {
            bail!("Invariant failed: {} has hp {hp}", actor.name);
        }
        if actor.inventory.len() > actor.inventory.capacity {
            bail!("Invariant failed: {} is over capacity", actor.name);
        }
        if actor.is_alive() && world.map.tile_at(actor.pos) == Tile::Wall {
            bail!("Invariant failed: {} inside wall", actor.name);
        }
        for item in actor.inventory.items() {
            if world.items.get(*item).map(|i| i.place) != Some(ItemPlace::Carried(id)) {
                bail!("Invariant failed: {} holds a misplaced item", actor.name);
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let content = match &args.content {
        Some(path) => ContentPack::load(path)
            .with_context(|| format!("Failed to load content pack: {}", path.display()))?,
        None => ContentPack::default(),
    };

    tracing::info!(seed = args.seed, steps = args.steps, "starting fuzz harness");
    let mut game = Game::new(args.seed, &content).context("Failed to build starting arena")?;
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let mut commands = 0;
    let mut rejected = 0;
    while commands < args.steps && game.mode() != InputMode::GameOver {
        let command = random_command(&mut rng, &game);
        let outcome = game
            .handle_command(command)
            .with_context(|| format!("Driver refused {command:?} in mode {:?}", game.mode()))?;
        if outcome == CommandOutcome::Rejected {
            rejected += 1;
        }
        commands += 1;
        check_invariants(&game).with_context(|| format!("after command #{commands}"))?;
    }

    if let Some(path) = &args.journal_out {
        let json = game.journal().to_json().context("Failed to encode journal")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write journal: {}", path.display()))?;
    }

    let summary = Summary {
        seed: args.seed,
        commands,
        turns: game.turn(),
        rejected,
        player_alive: game.player_alive(),
        snapshot_hash: game.snapshot_hash(),
    };
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "Fuzzing completed: {} commands, {} turns, {} rejected, player alive: {}",
            summary.commands, summary.turns, summary.rejected, summary.player_alive
        );
        println!("Snapshot Hash: {}", summary.snapshot_hash);
    }
    Ok(())
}
