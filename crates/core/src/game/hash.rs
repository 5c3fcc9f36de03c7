//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from turn control code.
//! It does not own replay execution or journal persistence.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl Game {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.turn);
        hasher.write_u64(self.next_input_seq);
        hasher.write_u8(match self.mode {
            InputMode::Main => 0,
            InputMode::Targeting(_) => 1,
            InputMode::GameOver => 2,
        });

        for actor in self.world.actors.values() {
            hasher.write_i32(actor.pos.x);
            hasher.write_i32(actor.pos.y);
            hasher.write_i32(actor.fighter.hp());
            hasher.write_u8(match &actor.ai {
                None => 0,
                Some(Ai::Hostile { .. }) => 1,
                Some(Ai::Confused { ticks, .. }) => 2 + (*ticks).min(250) as u8,
            });
            hasher.write_usize(actor.inventory.len());
        }
        for item in self.world.items.values() {
            match item.place {
                ItemPlace::Floor(pos) => {
                    hasher.write_u8(0);
                    hasher.write_i32(pos.x);
                    hasher.write_i32(pos.y);
                }
                ItemPlace::Carried(_) => hasher.write_u8(1),
            }
        }
        hasher.write_u64(self.log.total_added());
        hasher.finish()
    }
}
