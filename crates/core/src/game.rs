//! Turn-resolution core: the `Game` aggregate and its focused submodules.
//! Each submodule adds one concern to `Game` (actions, combat, AI, consumables, targeting,
//! the turn driver) so the driver can catch action failures in a single place.

use rand_chacha::ChaCha8Rng;

use crate::content::Rules;
use crate::error::{GameError, Impossible};
use crate::journal::InputJournal;
use crate::map::Map;
use crate::messages::{MessageLog, capitalize};
use crate::state::{Ai, ItemPlace, World};
use crate::types::*;

mod actions;
mod ai;
mod bootstrap;
mod combat;
mod consumables;
mod engine;
mod hash;
mod pathfinding;
mod targeting;
mod visibility;

#[cfg(test)]
mod test_support;

pub use actions::{Action, ActionKind};
pub use consumables::Activation;
pub use pathfinding::path_to;
pub use targeting::{InputMode, PendingTarget};
pub use visibility::compute_fov;

pub struct Game {
    seed: u64,
    turn: u64,
    rng: ChaCha8Rng,
    rules: Rules,
    world: World,
    log: MessageLog,
    mode: InputMode,
    journal: InputJournal,
    next_input_seq: u64,
}

impl Game {
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of completed turns.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct access for scenario setup and tooling; turn rules are not applied here.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn journal(&self) -> &InputJournal {
        &self.journal
    }

    pub fn player_alive(&self) -> bool {
        self.world.player().is_alive()
    }

    fn actor_name(&self, id: EntityId) -> String {
        self.world.actors[id].name.clone()
    }
}
