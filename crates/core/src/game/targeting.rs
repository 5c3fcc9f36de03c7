//! Input modes and the deferred-target handshake.
//! This module exists so a pending item use is plain data the driver can hold between commands.
//! It does not own effect resolution; a resolved target becomes an ordinary item action.

use super::*;
use crate::consumable::TargetShape;

/// An item use waiting for the player to choose a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingTarget {
    pub actor: EntityId,
    pub item: ItemId,
    pub shape: TargetShape,
}

impl PendingTarget {
    pub fn resolve(self, pos: Pos) -> Action {
        Action::use_item(self.actor, self.item, Some(pos))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Main,
    Targeting(PendingTarget),
    GameOver,
}

impl Game {
    pub(super) fn begin_targeting(&mut self, pending: PendingTarget) -> CommandOutcome {
        self.log.add("Select a target location.", MessageTag::NeedsTarget);
        self.mode = InputMode::Targeting(pending);
        tracing::debug!(shape = ?pending.shape, "awaiting target");
        CommandOutcome::AwaitingTarget
    }

    /// A successful use returns to the main mode; an impossible one leaves the prompt open.
    pub(super) fn select_target(&mut self, pending: PendingTarget, pos: Pos) -> CommandOutcome {
        if !self.world.map.in_bounds(pos) {
            return self.cancel_targeting();
        }
        self.mode = InputMode::Main;
        if self.perform_player_action(pending.resolve(pos)) {
            CommandOutcome::TurnTaken
        } else {
            self.mode = InputMode::Targeting(pending);
            CommandOutcome::Rejected
        }
    }

    pub(super) fn cancel_targeting(&mut self) -> CommandOutcome {
        self.mode = InputMode::Main;
        tracing::debug!("targeting cancelled");
        CommandOutcome::TargetingCancelled
    }

    /// Cells an area item would affect if confirmed at `center`, for highlighting.
    pub fn target_area(&self, center: Pos) -> Vec<Pos> {
        let InputMode::Targeting(pending) = self.mode else {
            return Vec::new();
        };
        let radius = match pending.shape {
            TargetShape::Area { radius } => radius,
            TargetShape::Single | TargetShape::Immediate => 0,
        };
        let radius_sq = i64::from(radius) * i64::from(radius);
        let mut cells = Vec::new();
        for y in (center.y - radius)..=(center.y + radius) {
            for x in (center.x - radius)..=(center.x + radius) {
                let pos = Pos { y, x };
                if self.world.map.in_bounds(pos) && center.distance_sq(pos) <= radius_sq {
                    cells.push(pos);
                }
            }
        }
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::keys;
    use crate::game::test_support::*;

    #[test]
    fn pending_target_resolves_to_item_action_on_the_cell() {
        let mut game = arena_game();
        let player = game.world.player_id;
        let grenade = give(&mut game, keys::EXPLOSIVE_GRENADE);
        let shape = TargetShape::Area { radius: 2 };
        let pending = PendingTarget { actor: player, item: grenade, shape };
        assert_eq!(
            pending.resolve(Pos::new(3, 4)),
            Action::use_item(player, grenade, Some(Pos::new(3, 4)))
        );
    }

    #[test]
    fn target_area_covers_blast_radius_inside_bounds() {
        let mut game = arena_game();
        let player = game.world.player_id;
        let grenade = give(&mut game, keys::EXPLOSIVE_GRENADE);
        game.begin_targeting(PendingTarget {
            actor: player,
            item: grenade,
            shape: TargetShape::Area { radius: 1 },
        });

        let cells = game.target_area(Pos::new(0, 0));
        assert_eq!(cells, vec![Pos::new(0, 0), Pos::new(1, 0), Pos::new(0, 1)]);
        assert_eq!(game.target_area(Pos::new(5, 5)).len(), 5);
    }

    #[test]
    fn target_area_is_empty_outside_targeting() {
        let game = arena_game();
        assert!(game.target_area(Pos::new(5, 5)).is_empty());
    }
}
