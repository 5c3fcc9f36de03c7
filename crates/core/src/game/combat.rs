//! Damage resolution and the death transition.
//! This module exists so melee, explosions and ranged hits share one damage path.
//! It does not own target selection; callers decide who is hit.

use super::*;

impl Game {
    /// Resolves one melee exchange. Damage is `power - defense`; zero or less is a miss.
    pub(super) fn resolve_melee(&mut self, attacker: EntityId, defender: EntityId) {
        let power = self.world.actors[attacker].fighter.power;
        let defense = self.world.actors[defender].fighter.defense;
        let damage = power - defense;

        let description = format!(
            "{} attacks {}",
            capitalize(&self.world.actors[attacker].name),
            self.world.actors[defender].name
        );
        let tag = if attacker == self.world.player_id {
            MessageTag::PlayerAttack
        } else {
            MessageTag::EnemyAttack
        };
        if damage > 0 {
            self.log.add(format!("{description} for {damage} hit points."), tag);
            self.apply_damage(defender, damage);
        } else {
            self.log.add(format!("{description} but does no damage."), tag);
        }
    }

    /// Lowers hit points and fires the death transition exactly once when they reach zero.
    pub(super) fn apply_damage(&mut self, target: EntityId, amount: i32) {
        let actor = &mut self.world.actors[target];
        actor.fighter.take_damage(amount);
        tracing::debug!(victim = %actor.name, amount, hp = actor.fighter.hp(), "damage applied");
        if actor.fighter.hp() == 0 && actor.is_alive() {
            self.die(target);
        }
    }

    fn die(&mut self, target: EntityId) {
        let is_player = target == self.world.player_id;
        let actor = &mut self.world.actors[target];
        let (text, tag) = if is_player {
            ("You died!".to_string(), MessageTag::PlayerDie)
        } else {
            (format!("{} is dead!", capitalize(&actor.name)), MessageTag::EnemyDie)
        };
        tracing::info!(name = %actor.name, player = is_player, "actor died");

        actor.glyph = '%';
        actor.color = Rgb::CORPSE;
        actor.blocks_movement = false;
        actor.ai = None;
        actor.name = format!("remains of {}", actor.name);
        actor.render_order = RenderOrder::Corpse;

        self.log.add(text, tag);
        if is_player {
            self.mode = InputMode::GameOver;
        }
    }
}
