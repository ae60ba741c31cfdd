//! Error types for the player.

use thiserror::Error;

/// Result type for player commands.
pub type PlayerResult<T> = Result<T, PlayerError>;

/// A problem shown to the player on the error screen.
///
/// These never escape the controller as failures; they are a state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayError {
    /// The adventure payload could not be decoded.
    #[error("Could not load adventure: {0}")]
    Decode(String),

    /// A scene id did not resolve.
    #[error("Scene \"{0}\" not found!")]
    SceneNotFound(String),
}

/// A command the current screen does not offer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayerError {
    /// The choice number is not on screen.
    #[error("invalid choice: {0}")]
    InvalidChoice(usize),

    /// Choices are only offered while exploring.
    #[error("no choices are available right now")]
    NotExploring,

    /// Battle actions are only offered during a battle.
    #[error("there is no battle in progress")]
    NotInBattle,

    /// This battle does not offer the action.
    #[error("{0} is not available in this battle")]
    ActionUnavailable(&'static str),

    /// Only the error screen offers a return to start.
    #[error("nothing to recover from")]
    NothingToRecover,

    /// The session was left or shut down.
    #[error("the session has ended")]
    SessionEnded,
}
