use crate::{
    content::ContentPack,
    error::{ContentError, GameError},
    game::Game,
    journal::InputJournal,
};

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("journal was recorded against content {recorded:#x}, replaying with {actual:#x}")]
    ContentMismatch { recorded: u64, actual: u64 },
    #[error("content pack cannot build the starting arena")]
    Content(#[from] ContentError),
    #[error("journal input {seq} was refused")]
    Command {
        seq: u64,
        #[source]
        source: GameError,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayResult {
    pub final_turn: u64,
    pub final_snapshot_hash: u64,
    pub player_alive: bool,
}

/// Rebuilds the run from `journal.seed` and re-applies every recorded command.
pub fn replay_to_end(
    content: &ContentPack,
    journal: &InputJournal,
) -> Result<ReplayResult, ReplayError> {
    let actual = content.content_hash();
    if journal.content_hash != actual {
        return Err(ReplayError::ContentMismatch { recorded: journal.content_hash, actual });
    }
    let mut game = Game::new(journal.seed, content)?;
    for record in &journal.inputs {
        game.handle_command(record.command)
            .map_err(|source| ReplayError::Command { seq: record.seq, source })?;
    }
    tracing::debug!(inputs = journal.inputs.len(), turn = game.turn(), "replay finished");
    Ok(ReplayResult {
        final_turn: game.turn(),
        final_snapshot_hash: game.snapshot_hash(),
        player_alive: game.player_alive(),
    })
}
