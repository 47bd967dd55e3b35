//! Error types for the adventure engine.

use ra_core::{CoreError, Direction, SceneId};
use thiserror::Error;

use crate::machine::State;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by a game session.
///
/// Player mistakes never show up here: unparseable input and unresolvable
/// targets are reported through feedback text instead.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The event has no transition out of the current state.
    #[error("{event} is not supported in the {state} state")]
    Unsupported {
        /// The state the session was in.
        state: State,
        /// The rejected event.
        event: &'static str,
    },

    /// An exit leads to a scene that is not loaded. The story data is corrupt.
    #[error("scene {from} has a {direction} exit to unknown scene {target}")]
    Integrity {
        /// The scene owning the exit.
        from: SceneId,
        /// The exit's direction.
        direction: Direction,
        /// The unresolved target scene.
        target: SceneId,
    },

    /// Story loading error.
    #[error("{0}")]
    Core(#[from] CoreError),
}

/// Errors reported by a score store. Never fatal to a session.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The backing store could not be reached.
    #[error("score store unavailable: {0}")]
    Unavailable(String),

    /// The score could not be encoded for storage.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Reading or writing the backing store failed.
    #[error("score store I/O error: {0}")]
    Io(#[from] std::io::Error),
}
