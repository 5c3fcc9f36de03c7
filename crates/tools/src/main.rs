use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use game_core::{ContentPack, InputJournal, ReplayResult, replay::replay_to_end};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the journal JSON file to replay
    #[arg(short, long)]
    journal: PathBuf,
    /// Content pack TOML to replay against (defaults to the built-in pack)
    #[arg(short, long)]
    content: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let journal_data = fs::read_to_string(&args.journal)
        .with_context(|| format!("Failed to read journal file: {}", args.journal.display()))?;
    let journal: InputJournal =
        serde_json::from_str(&journal_data).context("Failed to deserialize journal JSON")?;

    let content = match &args.content {
        Some(path) => ContentPack::load(path)
            .with_context(|| format!("Failed to load content pack: {}", path.display()))?,
        None => ContentPack::default(),
    };

    let result: ReplayResult =
        replay_to_end(&content, &journal).context("Replay failed during execution")?;

    println!("Replay complete.");
    println!("Inputs: {}", journal.inputs.len());
    println!("Final Turn: {}", result.final_turn);
    println!("Player Alive: {}", result.player_alive);
    println!("Snapshot Hash: {}", result.final_snapshot_hash);

    Ok(())
}
