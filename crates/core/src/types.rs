use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct EntityId;
    pub struct ItemId;
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    /// Saturates at the `i32` range, so an oversized delta lands off any map.
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self { y: self.y.saturating_add(dy), x: self.x.saturating_add(dx) }
    }

    /// King-move distance; two cells are adjacent when this is 1.
    pub fn chebyshev(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    pub fn distance_sq(self, other: Pos) -> i64 {
        let dx = i64::from(self.x - other.x);
        let dy = i64::from(self.y - other.y);
        dx * dx + dy * dy
    }

    /// Straight-line distance, used for ranged selection and blast radii.
    pub fn distance(self, other: Pos) -> f64 {
        (self.distance_sq(other) as f64).sqrt()
    }
}

/// The eight neighbor offsets as `(dx, dy)`, clockwise from north-west.
pub const DIRECTIONS: [(i32, i32); 8] =
    [(-1, -1), (0, -1), (1, -1), (-1, 0), (1, 0), (-1, 1), (0, 1), (1, 1)];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xFF, 0xFF, 0xFF);
    pub const CORPSE: Rgb = Rgb(0xBF, 0x00, 0x00);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RenderOrder {
    Corpse,
    Item,
    Actor,
}

/// Presentation hint carried with every log message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageTag {
    Plain,
    Welcome,
    PlayerAttack,
    EnemyAttack,
    PlayerDie,
    EnemyDie,
    Invalid,
    Impossible,
    HealthRecovered,
    NeedsTarget,
    StatusEffect,
}

/// Player input after device mapping. Slots index the player's inventory in pickup order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Bump { dx: i32, dy: i32 },
    Wait,
    PickUp,
    Drop { slot: usize },
    Use { slot: usize },
    SelectTarget { pos: Pos },
    CancelTargeting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The player acted, every living hostile acted, and visibility was refreshed.
    TurnTaken,
    /// The command failed its precondition; one message was logged and nothing changed.
    Rejected,
    /// A deferred-target item is waiting for a cell.
    AwaitingTarget,
    TargetingCancelled,
}
