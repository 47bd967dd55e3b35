//! Configuration for a game session.

use ra_core::{Story, catalog};
use uuid::Uuid;

use crate::error::EngineResult;

/// Who is playing. Scores are only persisted for identified players.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerIdentity {
    /// Stable player identifier.
    pub id: Uuid,
    /// Name shown on score tables.
    pub display_name: String,
}

impl PlayerIdentity {
    /// Create an identity with a fresh random id.
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            display_name: display_name.into(),
        }
    }

    /// Create an identity whose id is derived from the name, so the same
    /// name always maps to the same player.
    pub fn named(display_name: impl Into<String>) -> Self {
        let display_name = display_name.into();
        let id = Uuid::new_v5(&Uuid::NAMESPACE_OID, display_name.as_bytes());
        Self { id, display_name }
    }

    /// Create an identity with a known id.
    pub fn with_id(id: Uuid, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
        }
    }
}

/// Configuration for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// The story loaded on every power-on.
    pub story: Story,
    /// The player, if signed in.
    pub player: Option<PlayerIdentity>,
}

impl SessionConfig {
    /// Play `story` anonymously.
    pub fn new(story: Story) -> Self {
        Self {
            story,
            player: None,
        }
    }

    /// Play a bundled story by slug.
    pub fn from_catalog(slug: &str) -> EngineResult<Self> {
        Ok(Self::new(catalog::load(slug)?))
    }

    /// Set the player identity.
    pub fn with_player(mut self, player: PlayerIdentity) -> Self {
        self.player = Some(player);
        self
    }
}
