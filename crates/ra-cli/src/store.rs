//! Score store backed by a JSON-lines file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use ra_engine::{PersistenceError, ScoreRecord, ScoreStore};
use tokio::io::AsyncWriteExt;

/// Appends one JSON object per finished game to a file.
#[derive(Debug, Clone)]
pub struct JsonlScoreStore {
    path: PathBuf,
}

impl JsonlScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ScoreStore for JsonlScoreStore {
    async fn save(&self, record: ScoreRecord) -> Result<(), PersistenceError> {
        let mut line = serde_json::to_string(&record)
            .map_err(|e| PersistenceError::Serialization(e.to_string()))?;
        line.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

/// Read every record in a score file. A missing file holds no scores.
pub fn load(path: &Path) -> Result<Vec<ScoreRecord>, PersistenceError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| {
            serde_json::from_str(line)
                .map_err(|e| PersistenceError::Serialization(format!("line {}: {e}", n + 1)))
        })
        .collect()
}
