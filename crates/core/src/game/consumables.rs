//! Consumable activation: how an item turns into an action and what using it does.
//! This module exists so each effect checks its preconditions before touching any state.
//! It does not own the input mode; deferred targets are handed to `targeting`.

use super::*;
use crate::consumable::{Consumable, TargetShape};

/// What using an item produces before anything is performed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    Ready(Action),
    AwaitingTarget(PendingTarget),
}

impl Game {
    /// Immediate effects yield an action at once; area and single-cell effects need a cell first.
    pub fn item_activation(&self, actor: EntityId, item: ItemId) -> Activation {
        let shape =
            self.world.items[item].consumable.map_or(TargetShape::Immediate, |c| c.target_shape());
        match shape {
            TargetShape::Immediate => Activation::Ready(Action::use_item(actor, item, None)),
            TargetShape::Single | TargetShape::Area { .. } => {
                Activation::AwaitingTarget(PendingTarget { actor, item, shape })
            }
        }
    }

    pub(super) fn activate(
        &mut self,
        consumable: Consumable,
        actor: EntityId,
        item: ItemId,
        target: Pos,
    ) -> Result<(), Impossible> {
        match consumable {
            Consumable::Healing { amount } => self.activate_healing(actor, item, amount),
            Consumable::Confusion { ticks } => self.activate_confusion(item, target, ticks),
            Consumable::Explosion { damage, radius } => {
                self.activate_explosion(item, target, damage, radius)
            }
            Consumable::Ballistic { damage, max_range } => {
                self.activate_ballistic(actor, item, damage, max_range)
            }
        }
    }

    fn activate_healing(
        &mut self,
        actor: EntityId,
        item: ItemId,
        amount: i32,
    ) -> Result<(), Impossible> {
        let fighter = &mut self.world.actors[actor].fighter;
        if fighter.is_full() {
            return Err(Impossible::new("Your health is already full."));
        }
        // Non-positive amounts restore nothing and leave hit points untouched.
        let restored = fighter.heal(amount);
        if restored == 0 {
            return Err(Impossible::new("Your health is already full."));
        }
        let name = self.world.items[item].name.clone();
        self.log.add(
            format!("You use the {name}, recovering {restored} health."),
            MessageTag::HealthRecovered,
        );
        self.consume(item);
        Ok(())
    }

    fn activate_confusion(
        &mut self,
        item: ItemId,
        target: Pos,
        ticks: u32,
    ) -> Result<(), Impossible> {
        if !self.world.map.is_visible(target) {
            return Err(Impossible::new("You cannot target an area that you cannot see."));
        }
        let Some(victim) = self.world.actor_at(target) else {
            return Err(Impossible::new("You must select an enemy to target."));
        };
        let victim = &mut self.world.actors[victim];
        victim.ai = Some(Ai::confused(victim.ai.take(), ticks));
        let text = format!("{} is left stumbling, swiping at the air.", capitalize(&victim.name));
        self.log.add(text, MessageTag::StatusEffect);
        self.consume(item);
        Ok(())
    }

    fn activate_explosion(
        &mut self,
        item: ItemId,
        target: Pos,
        damage: i32,
        radius: i32,
    ) -> Result<(), Impossible> {
        if !self.world.map.is_visible(target) {
            return Err(Impossible::new("You cannot target an area that you cannot see."));
        }
        let radius_sq = i64::from(radius) * i64::from(radius);
        let caught: Vec<EntityId> = self
            .world
            .living_actors()
            .filter(|(_, actor)| actor.pos.distance_sq(target) <= radius_sq)
            .map(|(id, _)| id)
            .collect();

        if caught.is_empty() {
            let text = "The explosion booms in the cramped space, but no one is hurt.";
            self.log.add(text, MessageTag::Plain);
        }
        for id in caught {
            let name = self.actor_name(id);
            let text = format!("The blast catches the {name}, dealing {damage} damage.");
            self.log.add(text, MessageTag::Plain);
            self.apply_damage(id, damage);
        }
        self.consume(item);
        Ok(())
    }

    fn activate_ballistic(
        &mut self,
        actor: EntityId,
        item: ItemId,
        damage: i32,
        max_range: i32,
    ) -> Result<(), Impossible> {
        let origin = self.world.actors[actor].pos;
        // Anything nearer than one cell past `max_range` is in reach.
        let mut closest = f64::from(max_range) + 1.0;
        let mut chosen = None;
        for (id, other) in self.world.living_actors() {
            if id == actor || !self.world.map.is_visible(other.pos) {
                continue;
            }
            let distance = origin.distance(other.pos);
            if distance < closest {
                closest = distance;
                chosen = Some(id);
            }
        }
        let Some(target) = chosen else {
            return Err(Impossible::new("No enemy is close enough to shoot."));
        };

        let shooter = capitalize(&self.world.actors[actor].name);
        let name = self.actor_name(target);
        let text = format!("{shooter} shoots the {name}, dealing {damage} damage.");
        self.log.add(text, MessageTag::Plain);
        self.apply_damage(target, damage);
        self.consume(item);
        Ok(())
    }

    /// Removes a used item from its owner's inventory and from the world.
    fn consume(&mut self, item: ItemId) {
        let Some(used) = self.world.items.remove(item) else {
            return;
        };
        if let ItemPlace::Carried(owner) = used.place
            && let Some(owner) = self.world.actors.get_mut(owner)
        {
            owner.inventory.remove(item);
        }
        tracing::debug!(item = %used.name, "item consumed");
    }
}
