//! Command grammar, parsing, and help text.

mod command;
mod suggest;

pub use command::{
    CommandKind, CommandStatus, HELP_BANNER, ParsedCommand, command_help, parse_command,
};
pub use suggest::suggest_verb;
