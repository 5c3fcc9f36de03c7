//! Failure kinds surfaced by the turn core.
//!
//! `Impossible` is the only failure an action may raise during normal play. It is caught
//! once, by the turn driver, around a single action. Everything else here describes misuse
//! of the driver or of content files.

use std::io;

/// An action's precondition was not met. Displays as the user-facing reason.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct Impossible {
    reason: String,
}

impl Impossible {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Errors returned by the turn driver when a command does not fit the current input mode.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("the run is over")]
    GameOver,
    #[error("no target selection is pending")]
    NotTargeting,
}

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to read content file")]
    Io(#[from] io::Error),
    #[error("failed to parse content file")]
    Parse(#[from] toml::de::Error),
    #[error("content pack has no template named `{0}`")]
    MissingTemplate(String),
}
