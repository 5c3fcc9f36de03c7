//! Per-actor decision making for non-player turns.
//! This module exists so hostile chasing and confused stumbling share one turn entry point.
//! It does not own failure handling; an impossible AI action is reported to the driver.

use std::collections::VecDeque;

use rand_chacha::rand_core::Rng;

use super::*;

impl Game {
    /// Runs one turn of `actor`'s current mind. Inert actors do nothing.
    pub(super) fn take_ai_turn(&mut self, actor: EntityId) -> Result<(), Impossible> {
        let Some(ai) = self.world.actors[actor].ai.take() else {
            return Ok(());
        };
        let (next, action) = match ai {
            Ai::Hostile { path } => self.hostile_decision(actor, path),
            Ai::Confused { previous, ticks } => self.confused_decision(actor, previous, ticks),
        };
        self.world.actors[actor].ai = next;
        match action {
            Some(action) => {
                let name = &self.world.actors[actor].name;
                tracing::debug!(actor = %name, kind = ?action.kind, "ai acts");
                action.perform(self)
            }
            None => Ok(()),
        }
    }

    fn hostile_decision(
        &self,
        actor: EntityId,
        mut path: VecDeque<Pos>,
    ) -> (Option<Ai>, Option<Action>) {
        let pos = self.world.actors[actor].pos;
        let target = self.world.player().pos;
        let dx = target.x - pos.x;
        let dy = target.y - pos.y;
        let in_view = self.world.map.is_visible(pos);

        if in_view && pos.chebyshev(target) <= 1 {
            let melee = Action::new(actor, ActionKind::Melee { dx, dy });
            return (Some(Ai::Hostile { path }), Some(melee));
        }
        if in_view {
            path = path_to(&self.world, pos, target);
            tracing::trace!(from = ?pos, to = ?target, steps = path.len(), "path recomputed");
        }
        let action = match path.pop_front() {
            Some(next) => {
                Action::new(actor, ActionKind::Movement { dx: next.x - pos.x, dy: next.y - pos.y })
            }
            None => Action::wait(actor),
        };
        (Some(Ai::Hostile { path }), Some(action))
    }

    fn confused_decision(
        &mut self,
        actor: EntityId,
        previous: Option<Box<Ai>>,
        ticks: u32,
    ) -> (Option<Ai>, Option<Action>) {
        if ticks == 0 {
            let name = capitalize(&self.world.actors[actor].name);
            self.log.add(format!("{name} shakes it off."), MessageTag::StatusEffect);
            return (previous.map(|ai| *ai), None);
        }
        let (dx, dy) = DIRECTIONS[(self.rng.next_u32() % DIRECTIONS.len() as u32) as usize];
        (Some(Ai::Confused { previous, ticks: ticks - 1 }), Some(Action::bump(actor, dx, dy)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::keys;
    use crate::game::test_support::*;

    fn hostile_path(game: &Game, actor: EntityId) -> VecDeque<Pos> {
        match &game.world.actors[actor].ai {
            Some(Ai::Hostile { path }) => path.clone(),
            other => panic!("expected hostile ai, got {other:?}"),
        }
    }

    #[test]
    fn adjacent_visible_hostile_attacks() {
        let mut game = arena_game();
        let junkie = add_enemy(&mut game, keys::JUNKIE, Pos::new(6, 6));

        game.take_ai_turn(junkie).expect("attack lands");
        assert_eq!(game.world.player().fighter.hp(), 29);
        assert_eq!(game.world.actors[junkie].pos, Pos::new(6, 6));
    }

    #[test]
    fn visible_hostile_steps_along_a_fresh_path() {
        let mut game = arena_game();
        let junkie = add_enemy(&mut game, keys::JUNKIE, Pos::new(9, 5));

        game.take_ai_turn(junkie).expect("moves");
        assert_eq!(game.world.actors[junkie].pos, Pos::new(8, 5));
        let expected = VecDeque::from([Pos::new(7, 5), Pos::new(6, 5), Pos::new(5, 5)]);
        assert_eq!(hostile_path(&game, junkie), expected);
    }

    #[test]
    fn unseen_hostile_follows_its_remembered_path() {
        let mut game = arena_game();
        let junkie = add_enemy(&mut game, keys::JUNKIE, Pos::new(9, 9));
        game.world.map.visible.fill(false);
        game.world.actors[junkie].ai =
            Some(Ai::Hostile { path: VecDeque::from([Pos::new(9, 8), Pos::new(9, 7)]) });

        game.take_ai_turn(junkie).expect("moves");
        assert_eq!(game.world.actors[junkie].pos, Pos::new(9, 8));
        assert_eq!(hostile_path(&game, junkie), VecDeque::from([Pos::new(9, 7)]));
    }

    #[test]
    fn unseen_hostile_without_a_path_waits() {
        let mut game = arena_game();
        let junkie = add_enemy(&mut game, keys::JUNKIE, Pos::new(9, 9));
        game.world.map.visible.fill(false);

        game.take_ai_turn(junkie).expect("waits");
        assert_eq!(game.world.actors[junkie].pos, Pos::new(9, 9));
    }

    #[test]
    fn adjacent_but_unseen_hostile_does_not_attack() {
        let mut game = arena_game();
        let junkie = add_enemy(&mut game, keys::JUNKIE, Pos::new(6, 5));
        game.world.map.visible.fill(false);

        game.take_ai_turn(junkie).expect("waits");
        assert_eq!(game.world.player().fighter.hp(), 30);
    }

    #[test]
    fn confused_actor_stumbles_then_recovers_its_previous_mind() {
        let mut game = arena_game();
        let junkie = add_enemy(&mut game, keys::JUNKIE, Pos::new(9, 9));
        let remembered = Ai::Hostile { path: VecDeque::from([Pos::new(8, 8), Pos::new(7, 7)]) };
        game.world.actors[junkie].ai = Some(Ai::confused(Some(remembered.clone()), 2));

        for expected_ticks in [1, 0] {
            let _ = game.take_ai_turn(junkie);
            match &game.world.actors[junkie].ai {
                Some(Ai::Confused { ticks, .. }) => assert_eq!(*ticks, expected_ticks),
                other => panic!("expected confused ai, got {other:?}"),
            }
        }

        let pos_before = game.world.actors[junkie].pos;
        game.take_ai_turn(junkie).expect("recovery never fails");
        assert_eq!(game.world.actors[junkie].ai, Some(remembered));
        assert_eq!(game.world.actors[junkie].pos, pos_before, "recovery turn does not move");
        assert_eq!(game.log.last().map(|m| m.text.as_str()), Some("Junkie shakes it off."));
    }

    #[test]
    fn confusion_with_no_ticks_recovers_at_once_without_moving() {
        let mut game = arena_game();
        let junkie = add_enemy(&mut game, keys::JUNKIE, Pos::new(9, 9));
        let remembered = Ai::Hostile { path: VecDeque::from([Pos::new(10, 10), Pos::new(9, 10)]) };
        game.world.actors[junkie].ai = Some(Ai::confused(Some(remembered.clone()), 0));

        game.take_ai_turn(junkie).expect("recovery never fails");
        assert_eq!(game.world.actors[junkie].ai, Some(remembered));
        assert_eq!(game.world.actors[junkie].pos, Pos::new(9, 9));
        assert_eq!(game.log.last().map(|m| m.text.as_str()), Some("Junkie shakes it off."));
    }

    #[test]
    fn confused_stumbling_is_seed_deterministic() {
        let run = || {
            let mut game = arena_game();
            let junkie = add_enemy(&mut game, keys::JUNKIE, Pos::new(8, 8));
            game.world.actors[junkie].ai = Some(Ai::confused(Some(Ai::hostile()), 4));
            for _ in 0..4 {
                let _ = game.take_ai_turn(junkie);
            }
            game.world.actors[junkie].pos
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn corpses_take_no_turn() {
        let mut game = arena_game();
        let junkie = add_enemy(&mut game, keys::JUNKIE, Pos::new(6, 5));
        game.apply_damage(junkie, 100);
        game.take_ai_turn(junkie).expect("inert");
        assert_eq!(game.world.player().fighter.hp(), 30);
        assert!(game.world.actors[junkie].ai.is_none());
    }
}
