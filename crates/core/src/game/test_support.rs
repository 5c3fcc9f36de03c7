//! Shared test fixtures for the `game` submodule test suites.
//! This module exists to avoid repeating world and actor setup across many tests.
//! It does not own production gameplay logic.

use super::*;
use crate::content::{ContentPack, ItemTemplate, keys};

pub(super) const FIXTURE_SEED: u64 = 7;

/// Floor area with a wall border and the player at `player_pos`.
pub(super) fn open_world(width: usize, height: usize, player_pos: Pos) -> World {
    let content = ContentPack::default();
    let player = content.actor(keys::PLAYER).expect("player template");
    World::new(Map::new(width, height), player, player_pos)
}

pub(super) fn spawn(world: &mut World, key: &str, pos: Pos) -> EntityId {
    let content = ContentPack::default();
    let template = content.actor(key).expect("actor template");
    world.spawn_actor(template, pos)
}

/// 12x12 open room, player at (5, 5), every cell visible.
pub(super) fn arena_game() -> Game {
    let mut game =
        Game::from_world(FIXTURE_SEED, open_world(12, 12, Pos::new(5, 5)), Rules::default());
    reveal_all(&mut game);
    game
}

pub(super) fn reveal_all(game: &mut Game) {
    game.world.map.visible.fill(true);
    game.world.map.explored.fill(true);
}

pub(super) fn add_enemy(game: &mut Game, key: &str, pos: Pos) -> EntityId {
    spawn(&mut game.world, key, pos)
}

pub(super) fn drop_item(game: &mut Game, key: &str, pos: Pos) -> ItemId {
    let content = ContentPack::default();
    let template = content.item(key).expect("item template");
    game.world.spawn_item(template, pos)
}

pub(super) fn give(game: &mut Game, key: &str) -> ItemId {
    let content = ContentPack::default();
    let template = content.item(key).expect("item template");
    let player = game.world.player_id;
    game.world.give_item(player, template).expect("inventory has room")
}

pub(super) fn inert_item(name: &str) -> ItemTemplate {
    ItemTemplate {
        key: name.to_string(),
        name: name.to_string(),
        glyph: '?',
        color: Rgb::WHITE,
        consumable: None,
    }
}

pub(super) fn message_texts(game: &Game) -> Vec<String> {
    game.log.messages().iter().map(|m| m.text.clone()).collect()
}
