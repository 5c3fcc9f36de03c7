//! Discrete actions an actor can attempt during its turn.
//! This module exists so player input and AI decisions resolve through the same rules.
//! It does not own turn order or the handling of failed preconditions.

use super::*;

/// One attempted intent, bound to the actor performing it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Action {
    pub actor: EntityId,
    pub kind: ActionKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionKind {
    Wait,
    Movement { dx: i32, dy: i32 },
    Melee { dx: i32, dy: i32 },
    /// Melee when a living actor stands at the destination, movement otherwise.
    Bump { dx: i32, dy: i32 },
    PickUp,
    Drop { item: ItemId },
    /// `target` defaults to the actor's own cell.
    UseItem { item: ItemId, target: Option<Pos> },
}

impl Action {
    pub fn new(actor: EntityId, kind: ActionKind) -> Self {
        Self { actor, kind }
    }

    pub fn wait(actor: EntityId) -> Self {
        Self::new(actor, ActionKind::Wait)
    }

    pub fn bump(actor: EntityId, dx: i32, dy: i32) -> Self {
        Self::new(actor, ActionKind::Bump { dx, dy })
    }

    pub fn use_item(actor: EntityId, item: ItemId, target: Option<Pos>) -> Self {
        Self::new(actor, ActionKind::UseItem { item, target })
    }

    /// Applies the action to `game`. On `Err` nothing observable has changed.
    pub fn perform(self, game: &mut Game) -> Result<(), Impossible> {
        let actor = self.actor;
        match self.kind {
            ActionKind::Wait => Ok(()),
            ActionKind::Movement { dx, dy } => game.perform_movement(actor, dx, dy),
            ActionKind::Melee { dx, dy } => game.perform_melee(actor, dx, dy),
            ActionKind::Bump { dx, dy } => {
                let dest = game.world.actors[actor].pos.shift(dx, dy);
                if game.world.actor_at(dest).is_some() {
                    game.perform_melee(actor, dx, dy)
                } else {
                    game.perform_movement(actor, dx, dy)
                }
            }
            ActionKind::PickUp => game.perform_pickup(actor),
            ActionKind::Drop { item } => game.perform_drop(actor, item),
            ActionKind::UseItem { item, target } => game.perform_item_action(actor, item, target),
        }
    }
}

impl Game {
    fn perform_movement(&mut self, actor: EntityId, dx: i32, dy: i32) -> Result<(), Impossible> {
        let dest = self.world.actors[actor].pos.shift(dx, dy);
        if !self.world.map.in_bounds(dest)
            || !self.world.map.is_walkable(dest)
            || self.world.blocking_entity_at(dest).is_some()
        {
            return Err(Impossible::new("That way is blocked."));
        }
        self.world.actors[actor].pos = dest;
        Ok(())
    }

    fn perform_melee(&mut self, actor: EntityId, dx: i32, dy: i32) -> Result<(), Impossible> {
        let dest = self.world.actors[actor].pos.shift(dx, dy);
        let Some(target) = self.world.actor_at(dest) else {
            return Err(Impossible::new("Nothing to attack."));
        };
        self.resolve_melee(actor, target);
        Ok(())
    }

    fn perform_pickup(&mut self, actor: EntityId) -> Result<(), Impossible> {
        let pos = self.world.actors[actor].pos;
        let Some(item) = self.world.floor_item_at(pos) else {
            return Err(Impossible::new("There is nothing here to pick up."));
        };
        if self.world.actors[actor].inventory.is_full() {
            return Err(Impossible::new("Your inventory is full."));
        }
        self.world.items[item].place = ItemPlace::Carried(actor);
        self.world.actors[actor].inventory.push(item);
        let name = &self.world.items[item].name;
        self.log.add(format!("You picked up the {name}!"), MessageTag::Plain);
        Ok(())
    }

    fn perform_drop(&mut self, actor: EntityId, item: ItemId) -> Result<(), Impossible> {
        let removed = self.world.actors[actor].inventory.remove(item);
        assert!(removed, "dropped item must be carried by the acting actor");
        let pos = self.world.actors[actor].pos;
        self.world.items[item].place = ItemPlace::Floor(pos);
        let name = &self.world.items[item].name;
        self.log.add(format!("You dropped the {name}."), MessageTag::Plain);
        Ok(())
    }

    fn perform_item_action(
        &mut self,
        actor: EntityId,
        item: ItemId,
        target: Option<Pos>,
    ) -> Result<(), Impossible> {
        let target = target.unwrap_or(self.world.actors[actor].pos);
        let entry = &self.world.items[item];
        let Some(consumable) = entry.consumable else {
            return Err(Impossible::new(format!("The {} cannot be used.", entry.name)));
        };
        self.activate(consumable, actor, item, target)
    }
}
