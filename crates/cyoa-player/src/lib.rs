//! Playing branching adventures.
//!
//! [`NavigationController`] owns one playthrough: the document, the current
//! scene, the battle state, and the timed continuations that drive a battle
//! forward. Front ends feed it player commands and elapsed time, and render
//! the [`View`] it returns.

/// Session configuration.
pub mod config;
/// The navigation state machine.
pub mod controller;
/// Error types for the player.
pub mod error;
/// Timed continuations on a logical clock.
pub mod scheduler;
/// Render-ready snapshots of a session.
pub mod view;

pub use config::PlayerConfig;
pub use controller::{Mode, NavigationController};
pub use error::{PlayError, PlayerError, PlayerResult};
pub use scheduler::{ScheduledTask, Scheduler, TaskKind};
pub use view::{BattleAction, BattlePanel, View};
