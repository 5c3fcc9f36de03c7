//! Turn driver: maps commands to actions and advances the world one turn at a time.
//! This module exists as the single place where action failures are caught and reported.
//! It does not own action rules or AI decisions; it only sequences them.

use super::*;
use crate::journal::InputRecord;

impl Game {
    /// Applies one player command. Accepted commands are journaled.
    pub fn handle_command(&mut self, command: Command) -> Result<CommandOutcome, GameError> {
        let player = self.world.player_id;
        let outcome = match (self.mode, command) {
            (InputMode::GameOver, _) => return Err(GameError::GameOver),
            (InputMode::Targeting(pending), Command::SelectTarget { pos }) => {
                self.select_target(pending, pos)
            }
            (InputMode::Targeting(_), _) => self.cancel_targeting(),
            (InputMode::Main, Command::SelectTarget { .. } | Command::CancelTargeting) => {
                return Err(GameError::NotTargeting);
            }
            (InputMode::Main, Command::Bump { dx, dy }) => {
                self.take_player_turn(Action::bump(player, dx, dy))
            }
            (InputMode::Main, Command::Wait) => self.take_player_turn(Action::wait(player)),
            (InputMode::Main, Command::PickUp) => {
                self.take_player_turn(Action::new(player, ActionKind::PickUp))
            }
            (InputMode::Main, Command::Drop { slot }) => match self.inventory_slot(slot) {
                Some(item) => self.take_player_turn(Action::new(player, ActionKind::Drop { item })),
                None => CommandOutcome::Rejected,
            },
            (InputMode::Main, Command::Use { slot }) => match self.inventory_slot(slot) {
                Some(item) => match self.item_activation(player, item) {
                    Activation::Ready(action) => self.take_player_turn(action),
                    Activation::AwaitingTarget(pending) => self.begin_targeting(pending),
                },
                None => CommandOutcome::Rejected,
            },
        };
        self.journal.inputs.push(InputRecord { seq: self.next_input_seq, command });
        self.next_input_seq += 1;
        Ok(outcome)
    }

    fn take_player_turn(&mut self, action: Action) -> CommandOutcome {
        if self.perform_player_action(action) {
            CommandOutcome::TurnTaken
        } else {
            CommandOutcome::Rejected
        }
    }

    fn inventory_slot(&mut self, slot: usize) -> Option<ItemId> {
        let item = self.world.player().inventory.get(slot);
        if item.is_none() {
            self.log.add("There is nothing in that slot.", MessageTag::Invalid);
        }
        item
    }

    /// Performs `action` for the player. On success every living hostile acts, then
    /// visibility is refreshed. On failure the reason is logged and no turn passes.
    pub fn perform_player_action(&mut self, action: Action) -> bool {
        if let Err(impossible) = action.perform(self) {
            tracing::debug!(reason = impossible.reason(), "player action impossible");
            self.log.add(impossible.reason(), MessageTag::Impossible);
            return false;
        }
        tracing::debug!(kind = ?action.kind, turn = self.turn, "player acted");
        self.handle_enemy_turns();
        self.refresh_visibility();
        self.turn += 1;
        true
    }

    fn handle_enemy_turns(&mut self) {
        let player = self.world.player_id;
        let order: Vec<EntityId> = self.world.actors.keys().filter(|id| *id != player).collect();
        for id in order {
            if !self.player_alive() {
                break;
            }
            if !self.world.actors.get(id).is_some_and(|actor| actor.is_alive()) {
                continue;
            }
            // The message log speaks to the player; a failed enemy step is only diagnostic.
            if let Err(impossible) = self.take_ai_turn(id) {
                tracing::debug!(
                    actor = %self.world.actors[id].name,
                    reason = impossible.reason(),
                    "ai action impossible"
                );
            }
        }
    }

    pub(super) fn refresh_visibility(&mut self) {
        let origin = self.world.player().pos;
        compute_fov(&mut self.world.map, origin, self.rules.fov_radius);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::keys;
    use crate::game::test_support::*;
    use crate::map::Tile;

    #[test]
    fn successful_command_takes_a_turn_and_enemies_respond() {
        let mut game = arena_game();
        let junkie = add_enemy(&mut game, keys::JUNKIE, Pos::new(7, 5));

        let outcome = game.handle_command(Command::Bump { dx: 1, dy: 0 }).expect("main mode");
        assert_eq!(outcome, CommandOutcome::TurnTaken);
        assert_eq!(game.turn(), 1);
        assert_eq!(game.world.actors[junkie].fighter.hp(), 10);
        assert_eq!(game.world.player().fighter.hp(), 29, "the junkie closed in and struck");
    }

    #[test]
    fn impossible_command_logs_once_and_freezes_the_world() {
        let mut game = arena_game();
        let junkie = add_enemy(&mut game, keys::JUNKIE, Pos::new(9, 9));
        game.world.actors[game.world.player_id].pos = Pos::new(1, 1);
        let before = game.log.total_added();

        let outcome = game.handle_command(Command::Bump { dx: -1, dy: 0 }).expect("main mode");
        assert_eq!(outcome, CommandOutcome::Rejected);
        assert_eq!(game.turn(), 0);
        assert_eq!(game.log.total_added(), before + 1);
        assert_eq!(game.log.last().map(|m| m.tag), Some(MessageTag::Impossible));
        assert_eq!(game.world.actors[junkie].pos, Pos::new(9, 9), "enemies did not act");
    }

    #[test]
    fn failed_enemy_step_is_silent_and_the_rest_still_act() {
        let mut game = arena_game();
        let boxed_in = add_enemy(&mut game, keys::JUNKIE, Pos::new(9, 9));
        for (dx, dy) in DIRECTIONS {
            game.world.map.set_tile(Pos::new(9 + dx, 9 + dy), Tile::Wall);
        }
        game.world.actors[boxed_in].ai = Some(Ai::confused(Some(Ai::hostile()), 3));
        let chaser = add_enemy(&mut game, keys::JUNKIE, Pos::new(7, 5));
        let before = game.log.total_added();

        assert_eq!(game.handle_command(Command::Wait), Ok(CommandOutcome::TurnTaken));
        assert_eq!(game.log.total_added(), before, "no message for the blocked stumble");
        assert!(matches!(game.world.actors[boxed_in].ai, Some(Ai::Confused { ticks: 2, .. })));
        assert_eq!(game.world.actors[boxed_in].pos, Pos::new(9, 9));
        assert_eq!(game.world.actors[chaser].pos, Pos::new(6, 5));
        assert_eq!(game.turn(), 1);
    }

    #[test]
    fn empty_slot_is_rejected_without_a_turn() {
        let mut game = arena_game();
        for command in [Command::Use { slot: 0 }, Command::Drop { slot: 3 }] {
            assert_eq!(game.handle_command(command), Ok(CommandOutcome::Rejected));
        }
        assert_eq!(game.turn(), 0);
        assert_eq!(
            game.log.last().map(|m| m.full_text()),
            Some("There is nothing in that slot. (x2)".to_string())
        );
    }

    #[test]
    fn targeting_commands_outside_targeting_are_protocol_errors() {
        let mut game = arena_game();
        assert_eq!(
            game.handle_command(Command::SelectTarget { pos: Pos::new(2, 2) }),
            Err(GameError::NotTargeting)
        );
        assert_eq!(game.handle_command(Command::CancelTargeting), Err(GameError::NotTargeting));
        assert!(game.journal().inputs.is_empty());
    }

    #[test]
    fn deferred_item_waits_for_a_cell_then_resolves() {
        let mut game = arena_game();
        let junkie = add_enemy(&mut game, keys::JUNKIE, Pos::new(9, 9));
        give(&mut game, keys::MACE_SPRAY);

        let outcome = game.handle_command(Command::Use { slot: 0 });
        assert_eq!(outcome, Ok(CommandOutcome::AwaitingTarget));
        assert!(matches!(game.mode(), InputMode::Targeting(_)));
        assert_eq!(game.turn(), 0);

        let outcome = game.handle_command(Command::SelectTarget { pos: Pos::new(9, 9) });
        assert_eq!(outcome, Ok(CommandOutcome::TurnTaken));
        assert_eq!(game.mode(), InputMode::Main);
        assert!(matches!(game.world.actors[junkie].ai, Some(Ai::Confused { .. })));
    }

    #[test]
    fn impossible_target_keeps_the_prompt_open() {
        let mut game = arena_game();
        let mace = give(&mut game, keys::MACE_SPRAY);
        game.handle_command(Command::Use { slot: 0 }).expect("main mode");

        let outcome = game.handle_command(Command::SelectTarget { pos: Pos::new(3, 3) });
        assert_eq!(outcome, Ok(CommandOutcome::Rejected));
        assert!(matches!(game.mode(), InputMode::Targeting(pending) if pending.item == mace));
        assert!(game.world.player().inventory.contains(mace));
    }

    #[test]
    fn any_other_command_or_off_map_cell_cancels_targeting() {
        let mut game = arena_game();
        give(&mut game, keys::EXPLOSIVE_GRENADE);

        game.handle_command(Command::Use { slot: 0 }).expect("main mode");
        assert_eq!(game.handle_command(Command::Wait), Ok(CommandOutcome::TargetingCancelled));
        assert_eq!(game.mode(), InputMode::Main);

        game.handle_command(Command::Use { slot: 0 }).expect("main mode");
        let outcome = game.handle_command(Command::SelectTarget { pos: Pos::new(-4, 40) });
        assert_eq!(outcome, Ok(CommandOutcome::TargetingCancelled));
        assert_eq!(game.turn(), 0);
        assert_eq!(game.world.player().inventory.len(), 1);
    }

    #[test]
    fn player_death_stops_enemy_turns_and_locks_input() {
        let mut game = arena_game();
        let player = game.world.player_id;
        game.world.actors[player].fighter.set_hp(3);
        let first = add_enemy(&mut game, keys::ROIDER, Pos::new(6, 5));
        let second = add_enemy(&mut game, keys::JUNKIE, Pos::new(4, 5));

        assert_eq!(game.handle_command(Command::Wait), Ok(CommandOutcome::TurnTaken));
        assert!(!game.player_alive());
        assert_eq!(game.mode(), InputMode::GameOver);
        assert_eq!(game.world.player().fighter.hp(), 0);
        assert!(game.world.actors[first].is_alive());
        assert!(game.world.actors[second].is_alive());
        assert_eq!(game.handle_command(Command::Wait), Err(GameError::GameOver));
    }

    #[test]
    fn accepted_commands_are_journaled_in_order() {
        let mut game = arena_game();
        game.handle_command(Command::Wait).expect("wait");
        game.handle_command(Command::PickUp).expect("rejected but accepted");

        let commands: Vec<Command> = game.journal().inputs.iter().map(|r| r.command).collect();
        assert_eq!(commands, vec![Command::Wait, Command::PickUp]);
        assert_eq!(game.journal().inputs[1].seq, 1);
    }
}
