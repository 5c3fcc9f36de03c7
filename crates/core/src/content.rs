//! Actor and item templates plus the handful of tunable rules.
//! The built-in pack mirrors `data/content.toml`; either can seed a run.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::consumable::Consumable;
use crate::error::ContentError;
use crate::types::Rgb;

pub mod keys {
    pub const PLAYER: &str = "player";
    pub const JUNKIE: &str = "junkie";
    pub const ROIDER: &str = "roider";
    pub const DUST_GOON: &str = "dust_goon";
    pub const DUST_SICARIO: &str = "dust_sicario";

    pub const SMART_BANDAGE: &str = "smart_bandage";
    pub const PRINTED_GUN: &str = "printed_gun";
    pub const MACE_SPRAY: &str = "mace_spray";
    pub const EXPLOSIVE_GRENADE: &str = "explosive_grenade";
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    pub fov_radius: i32,
}

impl Default for Rules {
    fn default() -> Self {
        Self { fov_radius: 8 }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorTemplate {
    pub key: String,
    pub name: String,
    pub glyph: char,
    pub color: Rgb,
    pub hp: i32,
    pub defense: i32,
    pub power: i32,
    #[serde(default)]
    pub capacity: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTemplate {
    pub key: String,
    pub name: String,
    pub glyph: char,
    pub color: Rgb,
    #[serde(default)]
    pub consumable: Option<Consumable>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPack {
    #[serde(default)]
    pub rules: Rules,
    pub actors: Vec<ActorTemplate>,
    pub items: Vec<ItemTemplate>,
}

fn actor(key: &str, name: &str, glyph: char, color: Rgb, stats: (i32, i32, i32)) -> ActorTemplate {
    let (hp, defense, power) = stats;
    ActorTemplate {
        key: key.to_string(),
        name: name.to_string(),
        glyph,
        color,
        hp,
        defense,
        power,
        capacity: 0,
    }
}

fn item(key: &str, name: &str, glyph: char, color: Rgb, consumable: Consumable) -> ItemTemplate {
    ItemTemplate {
        key: key.to_string(),
        name: name.to_string(),
        glyph,
        color,
        consumable: Some(consumable),
    }
}

impl Default for ContentPack {
    fn default() -> Self {
        let mut player = actor(keys::PLAYER, "player", '@', Rgb::WHITE, (30, 2, 5));
        player.capacity = 26;
        Self {
            rules: Rules::default(),
            actors: vec![
                player,
                actor(keys::JUNKIE, "junkie", 'j', Rgb(218, 192, 96), (10, 0, 3)),
                actor(keys::ROIDER, "roider", 'R', Rgb(208, 64, 192), (18, 1, 5)),
                actor(keys::DUST_GOON, "duster goon", 'c', Rgb(255, 202, 57), (14, 0, 3)),
                actor(keys::DUST_SICARIO, "sicario", 'C', Rgb(197, 145, 0), (16, 3, 5)),
            ],
            items: vec![
                item(
                    keys::SMART_BANDAGE,
                    "smart bandage",
                    '!',
                    Rgb(255, 0, 127),
                    Consumable::Healing { amount: 8 },
                ),
                item(
                    keys::PRINTED_GUN,
                    "printed gun",
                    '=',
                    Rgb(201, 108, 182),
                    Consumable::Ballistic { damage: 15, max_range: 6 },
                ),
                item(
                    keys::MACE_SPRAY,
                    "mace spray",
                    '~',
                    Rgb(201, 63, 255),
                    Consumable::Confusion { ticks: 4 },
                ),
                item(
                    keys::EXPLOSIVE_GRENADE,
                    "explosive grenade",
                    '*',
                    Rgb(255, 135, 0),
                    Consumable::Explosion { damage: 10, radius: 2 },
                ),
            ],
        }
    }
}

impl ContentPack {
    pub fn from_toml_str(source: &str) -> Result<Self, ContentError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let source = fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn actor(&self, key: &str) -> Option<&ActorTemplate> {
        self.actors.iter().find(|template| template.key == key)
    }

    pub fn item(&self, key: &str) -> Option<&ItemTemplate> {
        self.items.iter().find(|template| template.key == key)
    }

    pub fn require_actor(&self, key: &str) -> Result<&ActorTemplate, ContentError> {
        self.actor(key).ok_or_else(|| ContentError::MissingTemplate(key.to_string()))
    }

    pub fn require_item(&self, key: &str) -> Result<&ItemTemplate, ContentError> {
        self.item(key).ok_or_else(|| ContentError::MissingTemplate(key.to_string()))
    }

    /// Stable digest identifying this pack, recorded in journals.
    pub fn content_hash(&self) -> u64 {
        let encoded = serde_json::to_vec(self).expect("content pack should always encode");
        xxh3_64(&encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const BUNDLED: &str = include_str!("../data/content.toml");

    #[test]
    fn bundled_toml_matches_builtin_pack() {
        let parsed = ContentPack::from_toml_str(BUNDLED).expect("bundled content parses");
        assert_eq!(parsed, ContentPack::default());
    }

    #[test]
    fn rules_default_when_table_is_missing() {
        let source = r#"
            actors = []

            [[items]]
            key = "rock"
            name = "rock"
            glyph = "o"
            color = [120, 120, 120]
        "#;
        let pack = ContentPack::from_toml_str(source).expect("parses");
        assert_eq!(pack.rules, Rules::default());
        assert_eq!(pack.item("rock").and_then(|t| t.consumable), None);
    }

    #[test]
    fn load_reads_pack_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(BUNDLED.as_bytes()).expect("write");
        let pack = ContentPack::load(file.path()).expect("load");
        assert!(pack.actor(keys::JUNKIE).is_some());
    }

    #[test]
    fn missing_template_is_reported_by_key() {
        let pack = ContentPack::default();
        let err = pack.require_actor("dragon").expect_err("no dragons here");
        assert!(matches!(err, ContentError::MissingTemplate(key) if key == "dragon"));
    }

    #[test]
    fn content_hash_changes_with_stats() {
        let base = ContentPack::default();
        let mut tweaked = base.clone();
        tweaked.actors[1].power += 1;
        assert_eq!(base.content_hash(), ContentPack::default().content_hash());
        assert_ne!(base.content_hash(), tweaked.content_hash());
    }
}
