//! Consumable effect descriptors carried by items.
//! Activation lives in `game::consumables`; this module only describes what an item does
//! and how its target is chosen.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Consumable {
    /// Restores up to `amount` hit points to the user.
    Healing { amount: i32 },
    /// Replaces the target's behavior with random stumbling for `ticks` turns.
    Confusion { ticks: u32 },
    /// Damages every living actor within `radius` of the chosen cell.
    Explosion { damage: i32, radius: i32 },
    /// Damages the nearest visible actor closer than `max_range + 1` to the user.
    Ballistic { damage: i32, max_range: i32 },
}

/// How an item's target is resolved when it is used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetShape {
    /// Resolved during activation; no cell selection needed.
    Immediate,
    /// Needs one cell, selected by the player.
    Single,
    /// Needs one cell; everything within `radius` of it is affected.
    Area { radius: i32 },
}

impl Consumable {
    pub fn target_shape(self) -> TargetShape {
        match self {
            Consumable::Healing { .. } | Consumable::Ballistic { .. } => TargetShape::Immediate,
            Consumable::Confusion { .. } => TargetShape::Single,
            Consumable::Explosion { radius, .. } => TargetShape::Area { radius },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_and_auto_targeted_effects_need_no_selection() {
        assert_eq!(Consumable::Healing { amount: 4 }.target_shape(), TargetShape::Immediate);
        assert_eq!(
            Consumable::Ballistic { damage: 15, max_range: 6 }.target_shape(),
            TargetShape::Immediate
        );
    }

    #[test]
    fn area_effects_report_their_radius() {
        assert_eq!(
            Consumable::Explosion { damage: 10, radius: 2 }.target_shape(),
            TargetShape::Area { radius: 2 }
        );
        assert_eq!(Consumable::Confusion { ticks: 4 }.target_shape(), TargetShape::Single);
    }

    #[test]
    fn descriptors_use_kind_tag_in_serialized_form() {
        let json = serde_json::to_string(&Consumable::Confusion { ticks: 4 }).expect("serialize");
        assert_eq!(json, r#"{"kind":"confusion","ticks":4}"#);
    }
}
