//! Command parsing for player input.

use std::fmt;

use super::suggest::suggest_verb;

/// The verb of a parsed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Examine an item in the scene or inventory.
    Examine,
    /// Move through an exit.
    Go,
    /// Show help for one or all commands.
    Help,
    /// List the inventory.
    Inventory,
    /// Describe the current scene again.
    Look,
    /// Show the current score.
    Score,
    /// Take an item from the scene.
    Take,
    /// Input that matched no rule.
    Invalid,
}

impl CommandKind {
    /// The verb as typed by the player; empty for [`CommandKind::Invalid`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::Examine => "examine",
            Self::Go => "go",
            Self::Help => "help",
            Self::Inventory => "inventory",
            Self::Look => "look",
            Self::Score => "score",
            Self::Take => "take",
            Self::Invalid => "",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether the input matched the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// The input matched a rule. Stays valid even if the target is later
    /// found not to exist.
    Valid,
    /// The input matched no rule.
    Invalid,
}

/// A parsed player command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Whether the input matched the grammar.
    pub status: CommandStatus,
    /// Which command was recognized.
    pub kind: CommandKind,
    /// Lower-cased argument, words joined by single spaces; empty when absent.
    pub target: String,
    /// Outcome text filled in during resolution, or a hint for invalid input.
    pub message: String,
}

impl ParsedCommand {
    fn valid(kind: CommandKind, target: String) -> Self {
        Self {
            status: CommandStatus::Valid,
            kind,
            target,
            message: String::new(),
        }
    }

    /// An unrecognized command.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::Invalid,
            kind: CommandKind::Invalid,
            target: String::new(),
            message: message.into(),
        }
    }

    /// True when the input matched the grammar.
    pub fn is_valid(&self) -> bool {
        self.status == CommandStatus::Valid
    }
}

/// First lines of the full help listing.
pub const HELP_BANNER: [&str; 2] = ["***", "Valid commands are as follows:"];

const INVALID_MESSAGE: &str = "Invalid command";

/// What may follow the verb.
#[derive(Debug, Clone, Copy)]
enum Argument {
    None,
    OptionalWord,
    Word,
    /// One or two words.
    Target,
}

#[derive(Debug)]
struct Rule {
    kind: CommandKind,
    argument: Argument,
    help: &'static str,
}

/// The grammar. Each verb appears once, so at most one rule can match;
/// rules are still tried in this order and the first match wins.
const RULES: &[Rule] = &[
    Rule {
        kind: CommandKind::Examine,
        argument: Argument::Target,
        help: "examine <item> - Use to examine things in a scene",
    },
    Rule {
        kind: CommandKind::Go,
        argument: Argument::Word,
        help: "go <direction> - Use to move through scenes",
    },
    Rule {
        kind: CommandKind::Help,
        argument: Argument::OptionalWord,
        help: "help [command] - displays help for a specific command or all commands",
    },
    Rule {
        kind: CommandKind::Inventory,
        argument: Argument::None,
        help: "inventory - Show the items you've collected",
    },
    Rule {
        kind: CommandKind::Look,
        argument: Argument::None,
        help: "look - Describes the current scene",
    },
    Rule {
        kind: CommandKind::Score,
        argument: Argument::None,
        help: "score - Displays your current score",
    },
    Rule {
        kind: CommandKind::Take,
        argument: Argument::Target,
        help: "take <item> - Take an item into inventory",
    },
];

impl Rule {
    fn matches(&self, verb: &str, rest: &[&str]) -> Option<ParsedCommand> {
        if verb != self.kind.name() || !rest.iter().all(|w| is_word(w)) {
            return None;
        }
        let arity_ok = match self.argument {
            Argument::None => rest.is_empty(),
            Argument::OptionalWord => rest.len() <= 1,
            Argument::Word => rest.len() == 1,
            Argument::Target => (1..=2).contains(&rest.len()),
        };
        arity_ok.then(|| ParsedCommand::valid(self.kind, rest.join(" ")))
    }
}

/// Words are ASCII letters and digits plus apostrophes and double quotes.
fn is_word(word: &str) -> bool {
    !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '\'' || c == '"')
}

/// Parse a player input string into a command.
///
/// Matching ignores case and surrounding whitespace, and any run of
/// whitespace separates words.
pub fn parse_command(input: &str) -> ParsedCommand {
    let lowered = input.trim().to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    let Some((verb, rest)) = words.split_first() else {
        return ParsedCommand::invalid(INVALID_MESSAGE);
    };

    RULES
        .iter()
        .find_map(|rule| rule.matches(verb, rest))
        .unwrap_or_else(|| match suggest_verb(verb) {
            Some(close) if close != *verb => {
                ParsedCommand::invalid(format!("{INVALID_MESSAGE}. Did you mean \"{close}\"?"))
            }
            _ => ParsedCommand::invalid(INVALID_MESSAGE),
        })
}

/// Help text for one command, or for all of them.
///
/// With a recognized command name this is that command's single help line.
/// Otherwise it is the banner followed by every help line, sorted.
pub fn command_help(command: Option<&str>) -> Vec<String> {
    let requested = command.map(|c| c.trim().to_lowercase());
    if let Some(rule) = requested
        .as_deref()
        .and_then(|name| RULES.iter().find(|r| r.kind.name() == name))
    {
        return vec![rule.help.to_string()];
    }

    let mut lines: Vec<&str> = RULES.iter().map(|r| r.help).collect();
    lines.sort_unstable();
    HELP_BANNER
        .iter()
        .chain(lines.iter())
        .map(|s| s.to_string())
        .collect()
}

/// Every verb in the grammar.
pub(super) fn verbs() -> impl Iterator<Item = &'static str> {
    RULES.iter().map(|r| r.kind.name())
}
