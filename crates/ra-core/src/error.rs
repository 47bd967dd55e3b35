use crate::scene::{Direction, SceneId};

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when building or loading a story.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A required field is empty or out of range.
    #[error("invalid {field} in {context}")]
    InvalidField {
        /// Which scene or item the field belongs to.
        context: String,
        /// The offending field.
        field: &'static str,
    },

    /// A story must contain at least one scene.
    #[error("story \"{0}\" has no scenes")]
    EmptyStory(String),

    /// Two scenes share the same identifier.
    #[error("duplicate scene id: {0}")]
    DuplicateScene(SceneId),

    /// Two item keys in one scene collide once lower-cased.
    #[error("scene {scene} has more than one item under key \"{key}\"")]
    DuplicateItem {
        /// The scene holding the items.
        scene: SceneId,
        /// The colliding key as written.
        key: String,
    },

    /// An exit points at a scene that is not part of the story.
    #[error("scene {from} has a {direction} exit to unknown scene {target}")]
    MissingScene {
        /// The scene owning the exit.
        from: SceneId,
        /// The exit's direction.
        direction: Direction,
        /// The unresolved target scene.
        target: SceneId,
    },

    /// No bundled story matches the requested slug.
    #[error("unknown story: {0}")]
    UnknownStory(String),

    /// The story document is not valid JSON for the story format.
    #[error("malformed story data: {0}")]
    Json(#[from] serde_json::Error),
}
