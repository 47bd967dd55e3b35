//! Core types for Retro Adventure: scenes, exits, items, and stories.
//!
//! This crate defines the world graph a game session plays through. It has
//! no notion of players, commands or output; you can build a [`Story`]
//! programmatically or load one from JSON, and the bundled stories live in
//! [`catalog`].

/// Bundled stories shipped with the engine.
pub mod catalog;
/// Error types used throughout the crate.
pub mod error;
/// Interactable items.
pub mod item;
/// Scenes, exits, and directions.
pub mod scene;
/// Stories: ordered scene graphs plus their JSON data format.
pub mod story;

/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export item types.
pub use item::Item;
/// Re-export scene types.
pub use scene::{DEFAULT_PROMPT, Direction, Exit, Scene, SceneId};
/// Re-export story types.
pub use story::Story;
