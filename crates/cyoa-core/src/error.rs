use crate::resolve::SceneNotFound;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when decoding, storing, or editing an adventure.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A transport payload could not be decoded (bad JSON or URI encoding).
    #[error("could not decode adventure: {0}")]
    Decode(String),

    /// A referenced scene does not exist in the document.
    #[error(transparent)]
    SceneNotFound(#[from] SceneNotFound),

    /// A scene with the same id already exists.
    #[error("scene already exists: \"{0}\"")]
    DuplicateScene(String),

    /// The id is reserved for a control token or is empty.
    #[error("scene id \"{0}\" is reserved")]
    ReservedSceneId(String),

    /// A choice index is outside the scene's choice list.
    #[error("scene \"{scene}\" has no choice #{index}")]
    ChoiceOutOfRange {
        /// The scene being edited.
        scene: String,
        /// The requested zero-based choice index.
        index: usize,
    },

    /// The scene has no battle configuration to edit.
    #[error("scene \"{0}\" has no battle")]
    NoBattle(String),

    /// Reading or writing a storage backend failed.
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
