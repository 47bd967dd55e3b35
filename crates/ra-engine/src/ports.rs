//! Ports the session calls out through.
//!
//! Score persistence is the only outbound port: the engine hands a finished
//! game's [`ScoreRecord`] to a [`ScoreStore`] and never looks at how or where
//! it is kept.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::PlayerIdentity;
use crate::error::PersistenceError;

/// A finished game's score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Title of the story played.
    pub story_title: String,
    /// Final score.
    pub score: i64,
    /// Who played.
    pub player_id: Uuid,
    /// The player's display name.
    pub display_name: String,
    /// When the game ended.
    pub recorded_at: DateTime<Utc>,
}

impl ScoreRecord {
    /// Record `score` for `player` in `story_title`, timestamped now.
    pub fn new(story_title: impl Into<String>, score: i64, player: &PlayerIdentity) -> Self {
        Self {
            story_title: story_title.into(),
            score,
            player_id: player.id,
            display_name: player.display_name.clone(),
            recorded_at: Utc::now(),
        }
    }
}

/// Persists final scores.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    /// Save one score.
    async fn save(&self, record: ScoreRecord) -> Result<(), PersistenceError>;
}

/// Keeps scores in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    records: Arc<Mutex<Vec<ScoreRecord>>>,
}

impl MemoryScoreStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every saved record.
    pub fn records(&self) -> Vec<ScoreRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ScoreStore for MemoryScoreStore {
    async fn save(&self, record: ScoreRecord) -> Result<(), PersistenceError> {
        self.records
            .lock()
            .map_err(|e| PersistenceError::Unavailable(e.to_string()))?
            .push(record);
        Ok(())
    }
}

/// Discards every score.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullScoreStore;

#[async_trait]
impl ScoreStore for NullScoreStore {
    async fn save(&self, _record: ScoreRecord) -> Result<(), PersistenceError> {
        Ok(())
    }
}
