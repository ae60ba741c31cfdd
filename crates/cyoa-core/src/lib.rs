//! Core types for branching adventures: scenes, choices, and battle settings.
//!
//! This crate defines the adventure document that the editor produces and
//! every player consumes. It is independent of any front end: you can build
//! an [`Adventure`] programmatically, edit it through [`Editor`] events, or
//! decode one from any of the supported transports.

/// Scenes, choices, battle configuration, and export metadata.
pub mod document;
/// Message-driven document editing.
pub mod editor;
/// Error types used throughout the crate.
pub mod error;
/// Exact-match scene lookup.
pub mod resolve;
/// Moving documents across process boundaries.
pub mod transport;
/// Authoring checks over a document.
pub mod validate;

/// Re-export document types.
pub use document::{Adventure, AdventureMeta, BattleConfig, Choice, ControlToken, Scene};
/// Re-export editor types.
pub use editor::{Editor, EditorEvent, ScenePatch, starter_adventure};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export the scene resolver.
pub use resolve::{SceneNotFound, resolve};
/// Re-export validation types.
pub use validate::{ValidationIssue, validate};

/// Scene id every session enters first and returns to on recovery.
pub const START_SCENE: &str = "start";
