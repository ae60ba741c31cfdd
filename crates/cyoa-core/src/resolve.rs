//! Exact-match scene lookup.
//!
//! Dangling choice targets are normal while an adventure is being written,
//! so a miss is a value the caller renders, not a failure of the document.

use crate::document::{Adventure, Scene};

/// A referenced scene id is absent from the document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Scene \"{0}\" not found!")]
pub struct SceneNotFound(pub String);

impl SceneNotFound {
    /// The id that failed to resolve.
    pub fn scene_id(&self) -> &str {
        &self.0
    }
}

/// Look up `scene_id` in `adventure`.
///
/// Case-sensitive, no trimming or normalization. The empty string is a
/// valid (usually missing) id.
pub fn resolve<'a>(adventure: &'a Adventure, scene_id: &str) -> Result<&'a Scene, SceneNotFound> {
    adventure
        .scene(scene_id)
        .ok_or_else(|| SceneNotFound(scene_id.to_string()))
}
