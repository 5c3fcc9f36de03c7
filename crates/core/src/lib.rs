pub mod consumable;
pub mod content;
pub mod error;
pub mod game;
pub mod journal;
pub mod map;
pub mod messages;
pub mod replay;
pub mod state;
pub mod types;

pub use consumable::{Consumable, TargetShape};
pub use content::{ContentPack, Rules};
pub use error::{ContentError, GameError, Impossible};
pub use game::{Action, ActionKind, Activation, Game, InputMode, PendingTarget};
pub use journal::{InputJournal, InputRecord};
pub use map::{Map, Tile};
pub use messages::{Message, MessageLog};
pub use replay::*;
pub use state::{Actor, Ai, Fighter, Inventory, Item, ItemPlace, World};
pub use types::*;
