//! Game engine for Retro Adventure.
//!
//! Turns player input into commands, runs them through a closed state
//! machine against a loaded story, and reports every output change as an
//! effect the host can render. Finished games are handed to a score store
//! in the background.

/// Session configuration and player identity.
pub mod config;
/// Output effects and transcripts.
pub mod effect;
/// Error types for the engine.
pub mod error;
/// The session state machine.
pub mod machine;
/// Command grammar and parsing.
pub mod parser;
/// Outbound ports: score persistence.
pub mod ports;
/// Game session management.
pub mod session;

pub use config::{PlayerIdentity, SessionConfig};
pub use effect::{Effect, Transcript, Turn};
pub use error::{EngineError, EngineResult, PersistenceError};
pub use machine::{Event, State};
pub use parser::{CommandKind, CommandStatus, ParsedCommand, command_help, parse_command};
pub use ports::{MemoryScoreStore, NullScoreStore, ScoreRecord, ScoreStore};
pub use session::{Session, TickSubscriber};
