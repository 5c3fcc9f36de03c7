//! Starting world construction for a new run.
//! This module exists to isolate initialization details from runtime turn flow.
//! It does not own turn advancement or command handling once a run has started.

use rand_chacha::rand_core::SeedableRng;

use super::*;
use crate::content::{ContentPack, keys};
use crate::error::ContentError;

/// Three rooms over a long hall. Letters mark spawns; see `spawn_key`.
const ARENA: [&str; 14] = [
    "##############################",
    "#........#...........#.......#",
    "#..@.....#...........#...R...#",
    "#..!.....#....j......#.......#",
    "#........#...........#.......#",
    "#....=...................c...#",
    "#........#...........#.......#",
    "#........#.....*.....#...~...#",
    "#........#...........#.......#",
    "#####.#######.############.###",
    "#............................#",
    "#.....j..........C...........#",
    "#............................#",
    "##############################",
];

enum Spawn {
    Actor(&'static str),
    Item(&'static str),
}

fn spawn_key(marker: char) -> Option<Spawn> {
    match marker {
        'j' => Some(Spawn::Actor(keys::JUNKIE)),
        'R' => Some(Spawn::Actor(keys::ROIDER)),
        'c' => Some(Spawn::Actor(keys::DUST_GOON)),
        'C' => Some(Spawn::Actor(keys::DUST_SICARIO)),
        '!' => Some(Spawn::Item(keys::SMART_BANDAGE)),
        '=' => Some(Spawn::Item(keys::PRINTED_GUN)),
        '~' => Some(Spawn::Item(keys::MACE_SPRAY)),
        '*' => Some(Spawn::Item(keys::EXPLOSIVE_GRENADE)),
        _ => None,
    }
}

fn marked_cells() -> impl Iterator<Item = (Pos, char)> {
    ARENA.iter().enumerate().flat_map(|(y, row)| {
        row.chars()
            .enumerate()
            .filter(|(_, ch)| *ch != '#' && *ch != '.')
            .map(move |(x, ch)| (Pos { y: y as i32, x: x as i32 }, ch))
    })
}

impl Game {
    /// Builds the starting arena from `content`. Every spawn key must exist in the pack.
    pub fn new(seed: u64, content: &ContentPack) -> Result<Self, ContentError> {
        let player_pos = marked_cells()
            .find(|(_, ch)| *ch == '@')
            .map(|(pos, _)| pos)
            .expect("arena layout has a player marker");
        let mut world =
            World::new(Map::from_rows(&ARENA), content.require_actor(keys::PLAYER)?, player_pos);

        for (pos, marker) in marked_cells() {
            match spawn_key(marker) {
                Some(Spawn::Actor(key)) => {
                    world.spawn_actor(content.require_actor(key)?, pos);
                }
                Some(Spawn::Item(key)) => {
                    world.spawn_item(content.require_item(key)?, pos);
                }
                None => {}
            }
        }

        let mut game = Self::from_world(seed, world, content.rules.clone());
        game.journal.content_hash = content.content_hash();
        game.log.add("You step into the back streets. Stay sharp.", MessageTag::Welcome);
        tracing::info!(
            seed,
            actors = game.world.actors.len(),
            items = game.world.items.len(),
            "run started"
        );
        Ok(game)
    }

    /// Wraps a caller-built world. Visibility is computed from the player's position.
    pub fn from_world(seed: u64, world: World, rules: Rules) -> Self {
        let mut game = Self {
            seed,
            turn: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            rules,
            world,
            log: MessageLog::new(),
            mode: InputMode::Main,
            journal: InputJournal::new(seed, 0),
            next_input_seq: 0,
        };
        game.refresh_visibility();
        game
    }
}
