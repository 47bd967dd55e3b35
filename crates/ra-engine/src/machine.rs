//! The session state machine.
//!
//! States are plain tags; the [`Session`] owns the current one and is passed
//! into `handle`, which is the whole transition table. An event with no
//! transition from the current state is rejected with
//! [`EngineError::Unsupported`] and changes nothing.
//!
//! ```text
//! PoweredOn --PowerOn--> StartScene --PlayScene--> AwaitingInput | GameOver
//! AwaitingInput --Input/Command--> Examine | Go | Help | Inventory | Look | Score | Take
//! <command state> --Command--> AwaitingInput        (Go on success: StartScene)
//! GameOver --EndGame--> GameOver
//! Go --dangling exit--> PoweredOn                    (Integrity error)
//! <any> --PowerOff--> PoweredOn
//! ```

use std::fmt;

use ra_core::Direction;
use tracing::{error, info};

use crate::error::{EngineError, EngineResult};
use crate::parser::{CommandKind, ParsedCommand, command_help, parse_command};
use crate::session::Session;

/// Prompt shown once the game has ended.
pub const GAME_OVER_PROMPT: &str = "Game Over";
/// Feedback for an unresolvable `examine` or `take`.
pub const CANT_DO_THAT: &str = "You can't do that.";
/// Feedback for a `go` with no matching exit.
pub const CANT_GO_THERE: &str = "You can't go there.";
/// Feedback for `inventory` with nothing held.
pub const EMPTY_INVENTORY: &str = "Your inventory is empty.";
/// First line of a non-empty inventory listing.
pub const INVENTORY_HEADER: &str = "The following items are in your inventory:";

/// Session states. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    /// Waiting to be powered on. Entry point and power-off target.
    PoweredOn,
    /// Entering a scene.
    StartScene,
    /// Waiting for player input.
    AwaitingInput,
    /// Resolving `examine`.
    Examine,
    /// Resolving `go`.
    Go,
    /// Resolving `help`.
    Help,
    /// Resolving `inventory`.
    Inventory,
    /// Resolving `look`.
    Look,
    /// Resolving `score`.
    Score,
    /// Resolving `take`.
    Take,
    /// The game has ended.
    GameOver,
}

impl State {
    /// Name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PoweredOn => "powered-on",
            Self::StartScene => "start-scene",
            Self::AwaitingInput => "awaiting-input",
            Self::Examine => "examine",
            Self::Go => "go",
            Self::Help => "help",
            Self::Inventory => "inventory",
            Self::Look => "look",
            Self::Score => "score",
            Self::Take => "take",
            Self::GameOver => "game-over",
        }
    }

    /// The state that resolves commands of `kind`.
    pub fn resolving(kind: CommandKind) -> Option<Self> {
        match kind {
            CommandKind::Examine => Some(Self::Examine),
            CommandKind::Go => Some(Self::Go),
            CommandKind::Help => Some(Self::Help),
            CommandKind::Inventory => Some(Self::Inventory),
            CommandKind::Look => Some(Self::Look),
            CommandKind::Score => Some(Self::Score),
            CommandKind::Take => Some(Self::Take),
            CommandKind::Invalid => None,
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inputs to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Start a new run.
    PowerOn,
    /// Stop the current run without resetting it.
    PowerOff,
    /// Enter the scene at `index`, clearing the narrative first if `clear`.
    PlayScene {
        /// Position of the scene in the story.
        index: usize,
        /// Clear the narrative before writing the scene.
        clear: bool,
    },
    /// Raw player text.
    Input(String),
    /// An already parsed command.
    Command(ParsedCommand),
    /// Finish the game.
    EndGame,
}

impl Event {
    /// Name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PowerOn => "power-on",
            Self::PowerOff => "power-off",
            Self::PlayScene { .. } => "play-scene",
            Self::Input(_) => "input",
            Self::Command(_) => "command",
            Self::EndGame => "end-game",
        }
    }
}

/// Apply `event` to the session. Returns the parsed command for input and
/// command events.
pub(crate) fn handle(session: &mut Session, event: Event) -> EngineResult<Option<ParsedCommand>> {
    match (session.state(), event) {
        (_, Event::PowerOff) => {
            session.change_state(State::PoweredOn);
            Ok(None)
        }
        (State::PoweredOn, Event::PowerOn) => {
            session.initialize();
            session.change_state(State::StartScene);
            handle(session, Event::PlayScene { index: 0, clear: true })
        }
        (State::StartScene, Event::PlayScene { index, clear }) => {
            play_scene(session, index, clear)?;
            Ok(None)
        }
        (State::AwaitingInput, Event::Input(raw)) => {
            handle(session, Event::Command(parse_command(&raw)))
        }
        (State::AwaitingInput, Event::Command(command)) => dispatch(session, command),
        (state, Event::Command(command)) if State::resolving(command.kind) == Some(state) => {
            resolve(session, state, command).map(Some)
        }
        (State::GameOver, Event::EndGame) => {
            end_game(session);
            Ok(None)
        }
        (state, event) => Err(EngineError::Unsupported {
            state,
            event: event.name(),
        }),
    }
}

fn dispatch(session: &mut Session, command: ParsedCommand) -> EngineResult<Option<ParsedCommand>> {
    let target = State::resolving(command.kind).filter(|_| command.is_valid());
    let Some(state) = target else {
        // Invalid input is reported by the host; nothing changes here.
        return Ok(Some(command));
    };
    session.change_state(state);
    handle(session, Event::Command(command))
}

fn play_scene(session: &mut Session, index: usize, clear: bool) -> EngineResult<()> {
    session.enter_scene(index);
    let scene = session.scene();
    let narrative = scene.entry_narrative();
    let prompt = scene.prompt().to_string();
    let terminal = scene.is_terminal();

    session.set_narrative_output(narrative, clear);
    if terminal {
        session.change_state(State::GameOver);
        handle(session, Event::EndGame)?;
    } else {
        session.set_player_prompt(prompt);
        session.change_state(State::AwaitingInput);
    }
    Ok(())
}

fn end_game(session: &mut Session) {
    let score = session.score();
    session.set_feedback_output(vec![format!("Score: {score}")], false);
    session.set_player_prompt(GAME_OVER_PROMPT);
    session.mark_game_over();
    info!(story = %session.story_title(), score, "game over");
    session.save_score();
}

/// How a command-resolution state finished.
enum Resolution {
    /// The command did what was asked. Output has been written.
    Completed(String),
    /// The target could not be resolved. Nothing has been written yet.
    Rejected(&'static str),
    /// A `go` found its exit; play continues in the scene at this index.
    Moved(usize),
}

/// Run one command-resolution state.
///
/// Whatever happens, the command keeps its valid status: a well-formed
/// command whose target does not exist only gets a different `message`.
/// Rejections write their message as feedback and touch nothing else.
fn resolve(
    session: &mut Session,
    state: State,
    mut command: ParsedCommand,
) -> EngineResult<ParsedCommand> {
    let resolution = match state {
        State::Examine => examine(session, &command.target),
        State::Go => go(session, &command.target)?,
        State::Help => help(session, &command.target),
        State::Inventory => inventory(session),
        State::Look => look(session),
        State::Score => score(session),
        State::Take => take(session, &command.target),
        other => {
            return Err(EngineError::Unsupported {
                state: other,
                event: "command",
            });
        }
    };

    match resolution {
        Resolution::Completed(message) => {
            command.message = message;
            session.change_state(State::AwaitingInput);
        }
        Resolution::Rejected(message) => {
            command.message = message.to_string();
            session.set_feedback_output(feedback(message), true);
            session.change_state(State::AwaitingInput);
        }
        Resolution::Moved(index) => {
            session.set_feedback_output(Vec::new(), true);
            session.change_state(State::StartScene);
            play_scene(session, index, false)?;
        }
    }
    Ok(command)
}

/// A feedback block: the message plus a spacer line.
fn feedback(message: impl Into<String>) -> Vec<String> {
    vec![message.into(), String::new()]
}

fn examine(session: &mut Session, target: &str) -> Resolution {
    let found = session
        .scene()
        .item(target)
        .or_else(|| session.inventory().get(target))
        .filter(|item| item.is_examinable)
        .map(|item| (item.examine_message.clone(), item.examine_point_value));

    let Some((message, points)) = found else {
        return Resolution::Rejected(CANT_DO_THAT);
    };
    session.add_points(points);
    session.set_feedback_output(feedback(message.clone()), true);
    Resolution::Completed(message)
}

fn go(session: &mut Session, target: &str) -> EngineResult<Resolution> {
    let Some(direction) = Direction::parse(target) else {
        return Ok(Resolution::Rejected(CANT_GO_THERE));
    };
    let scene = session.scene();
    let Some(exit) = scene.exit(direction) else {
        return Ok(Resolution::Rejected(CANT_GO_THERE));
    };

    match session.scene_position(&exit.scene_id) {
        Some(index) => Ok(Resolution::Moved(index)),
        None => {
            error!(
                from = %scene.id(),
                %direction,
                target = %exit.scene_id,
                "exit leads to a scene that is not loaded; halting"
            );
            let err = EngineError::Integrity {
                from: scene.id().clone(),
                direction,
                target: exit.scene_id.clone(),
            };
            // Corrupt story: only a power-on may continue from here.
            session.change_state(State::PoweredOn);
            Err(err)
        }
    }
}

fn help(session: &mut Session, target: &str) -> Resolution {
    let topic = Some(target).filter(|t| !t.is_empty());
    let lines = command_help(topic);
    let message = lines.join("\n");
    let mut output = lines;
    output.push(String::new());
    session.set_feedback_output(output, true);
    Resolution::Completed(message)
}

fn inventory(session: &mut Session) -> Resolution {
    let mut lines = Vec::new();
    if session.inventory().is_empty() {
        lines.push(EMPTY_INVENTORY.to_string());
    } else {
        lines.push(INVENTORY_HEADER.to_string());
        lines.extend(session.inventory().values().map(|item| item.inventory_line()));
    }
    let message = lines[0].clone();
    lines.push(String::new());
    session.set_feedback_output(lines, true);
    Resolution::Completed(message)
}

fn look(session: &mut Session) -> Resolution {
    let description = session.scene().description().to_string();
    session.set_narrative_output(vec![description.clone(), String::new()], false);
    Resolution::Completed(description)
}

fn score(session: &mut Session) -> Resolution {
    let message = format!("Score: {}", session.score());
    session.set_feedback_output(feedback(message.clone()), true);
    Resolution::Completed(message)
}

fn take(session: &mut Session, target: &str) -> Resolution {
    let takeable = session.scene().item(target).is_some_and(|item| item.is_takeable);
    if !takeable {
        return Resolution::Rejected(CANT_DO_THAT);
    }
    let Some(item) = session.scene_mut().remove_item(target) else {
        return Resolution::Rejected(CANT_DO_THAT);
    };

    let message = item.taken_message.clone();
    session.add_points(item.taken_point_value);
    session.stow(item);
    session.set_feedback_output(feedback(message.clone()), true);
    Resolution::Completed(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_valid_kind_has_a_state() {
        for kind in [
            CommandKind::Examine,
            CommandKind::Go,
            CommandKind::Help,
            CommandKind::Inventory,
            CommandKind::Look,
            CommandKind::Score,
            CommandKind::Take,
        ] {
            let state = State::resolving(kind).unwrap();
            assert_eq!(state.name(), kind.name());
        }
        assert_eq!(State::resolving(CommandKind::Invalid), None);
    }

    #[test]
    fn state_display() {
        assert_eq!(State::AwaitingInput.to_string(), "awaiting-input");
        assert_eq!(State::GameOver.to_string(), "game-over");
    }

    #[test]
    fn event_names() {
        assert_eq!(Event::Input("look".into()).name(), "input");
        assert_eq!(Event::PlayScene { index: 0, clear: true }.name(), "play-scene");
    }
}
