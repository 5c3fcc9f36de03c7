//! Entity model: actors, items and the world that owns them.
//! This module exists so the action and AI layers share one data model with explicit ownership.
//! It does not own turn order, combat outcomes or message emission.

use std::collections::VecDeque;

use slotmap::SlotMap;

use crate::consumable::Consumable;
use crate::content::{ActorTemplate, ItemTemplate};
use crate::map::Map;
use crate::types::*;

/// Combat stats. Hit points are clamped to `[0, max_hp]` on every write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fighter {
    max_hp: i32,
    hp: i32,
    pub defense: i32,
    pub power: i32,
}

impl Fighter {
    pub fn new(max_hp: i32, defense: i32, power: i32) -> Self {
        let max_hp = max_hp.max(0);
        Self { max_hp, hp: max_hp, defense, power }
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    pub fn is_full(&self) -> bool {
        self.hp >= self.max_hp
    }

    /// Plain assignment. Death is decided by the combat resolver, never by this write.
    pub fn set_hp(&mut self, value: i32) {
        self.hp = value.clamp(0, self.max_hp);
    }

    /// Returns the number of hit points actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.set_hp(before.saturating_add(amount.max(0)));
        self.hp - before
    }

    pub(crate) fn take_damage(&mut self, amount: i32) {
        self.set_hp(self.hp.saturating_sub(amount.max(0)));
    }
}

/// Ordered item storage. Capacity is enforced when picking up, not on every mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Inventory {
    pub capacity: usize,
    items: Vec<ItemId>,
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Self { capacity, items: Vec::new() }
    }

    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn get(&self, slot: usize) -> Option<ItemId> {
        self.items.get(slot).copied()
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.items.contains(&item)
    }

    pub(crate) fn push(&mut self, item: ItemId) {
        self.items.push(item);
    }

    pub(crate) fn remove(&mut self, item: ItemId) -> bool {
        let Some(index) = self.items.iter().position(|id| *id == item) else {
            return false;
        };
        self.items.remove(index);
        true
    }
}

/// Per-actor decision state. An actor without one is inert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Ai {
    /// Chases the player, keeping the last computed path while the player is out of sight.
    Hostile { path: VecDeque<Pos> },
    /// Stumbles randomly for `ticks` turns, then restores `previous` unchanged.
    Confused { previous: Option<Box<Ai>>, ticks: u32 },
}

impl Ai {
    pub fn hostile() -> Self {
        Ai::Hostile { path: VecDeque::new() }
    }

    pub fn confused(previous: Option<Ai>, ticks: u32) -> Self {
        Ai::Confused { previous: previous.map(Box::new), ticks }
    }
}

#[derive(Clone, Debug)]
pub struct Actor {
    pub id: EntityId,
    pub name: String,
    pub glyph: char,
    pub color: Rgb,
    pub render_order: RenderOrder,
    pub blocks_movement: bool,
    pub pos: Pos,
    pub fighter: Fighter,
    pub ai: Option<Ai>,
    pub inventory: Inventory,
}

impl Actor {
    pub fn from_template(template: &ActorTemplate, pos: Pos) -> Self {
        Self {
            id: EntityId::default(),
            name: template.name.clone(),
            glyph: template.glyph,
            color: template.color,
            render_order: RenderOrder::Actor,
            blocks_movement: true,
            pos,
            fighter: Fighter::new(template.hp, template.defense, template.power),
            ai: Some(Ai::hostile()),
            inventory: Inventory::new(template.capacity),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.ai.is_some()
    }
}

/// Where an item currently lives. An item is never on the floor and carried at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemPlace {
    Floor(Pos),
    Carried(EntityId),
}

#[derive(Clone, Debug)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub glyph: char,
    pub color: Rgb,
    pub place: ItemPlace,
    pub consumable: Option<Consumable>,
}

impl Item {
    pub fn from_template(template: &ItemTemplate, place: ItemPlace) -> Self {
        Self {
            id: ItemId::default(),
            name: template.name.clone(),
            glyph: template.glyph,
            color: template.color,
            place,
            consumable: template.consumable,
        }
    }
}

/// The map together with every entity placed on it or carried by an actor on it.
pub struct World {
    pub map: Map,
    pub actors: SlotMap<EntityId, Actor>,
    pub items: SlotMap<ItemId, Item>,
    pub player_id: EntityId,
}

impl World {
    /// The player carries a hostile mind like every other actor so that liveness reads the
    /// same everywhere; the turn driver never runs it.
    pub fn new(map: Map, player: &ActorTemplate, pos: Pos) -> Self {
        let mut actors = SlotMap::with_key();
        let player_id = actors.insert(Actor::from_template(player, pos));
        actors[player_id].id = player_id;
        Self { map, actors, items: SlotMap::with_key(), player_id }
    }

    pub fn player(&self) -> &Actor {
        &self.actors[self.player_id]
    }

    pub fn spawn_actor(&mut self, template: &ActorTemplate, pos: Pos) -> EntityId {
        let id = self.actors.insert(Actor::from_template(template, pos));
        self.actors[id].id = id;
        id
    }

    pub fn spawn_item(&mut self, template: &ItemTemplate, pos: Pos) -> ItemId {
        let id = self.items.insert(Item::from_template(template, ItemPlace::Floor(pos)));
        self.items[id].id = id;
        id
    }

    /// Places a new item straight into `owner`'s inventory. Returns `None` when it is full.
    pub fn give_item(&mut self, owner: EntityId, template: &ItemTemplate) -> Option<ItemId> {
        if self.actors.get(owner)?.inventory.is_full() {
            return None;
        }
        let id = self.items.insert(Item::from_template(template, ItemPlace::Carried(owner)));
        self.items[id].id = id;
        self.actors[owner].inventory.push(id);
        Some(id)
    }

    pub fn blocking_entity_at(&self, pos: Pos) -> Option<EntityId> {
        self.actors
            .iter()
            .find(|(_, actor)| actor.blocks_movement && actor.pos == pos)
            .map(|(id, _)| id)
    }

    /// The living actor standing at `pos`, if any.
    pub fn actor_at(&self, pos: Pos) -> Option<EntityId> {
        self.living_actors().find(|(_, actor)| actor.pos == pos).map(|(id, _)| id)
    }

    pub fn living_actors(&self) -> impl Iterator<Item = (EntityId, &Actor)> {
        self.actors.iter().filter(|(_, actor)| actor.is_alive())
    }

    /// First floor item at `pos` in arena order.
    pub fn floor_item_at(&self, pos: Pos) -> Option<ItemId> {
        self.items
            .iter()
            .find(|(_, item)| item.place == ItemPlace::Floor(pos))
            .map(|(id, _)| id)
    }

    pub fn floor_items(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.items.iter().filter(|(_, item)| matches!(item.place, ItemPlace::Floor(_)))
    }
}
