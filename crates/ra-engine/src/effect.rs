//! Output effects produced by a session.
//!
//! Every write the engine makes to its narrative, feedback, or prompt output
//! is recorded as an [`Effect`]. A host can render straight from the
//! session's [`Transcript`], or keep its own transcript and apply the effects
//! of each [`Turn`] to it.

use crate::parser::ParsedCommand;

/// A single change to the session's output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// All output was reset for a new run.
    Reset,
    /// Lines for the narrative pane.
    Narrative {
        /// Lines to append.
        lines: Vec<String>,
        /// Clear the pane before appending.
        clear: bool,
    },
    /// Lines for the feedback pane.
    Feedback {
        /// Lines to append.
        lines: Vec<String>,
        /// Clear the pane before appending.
        clear: bool,
    },
    /// New player prompt.
    Prompt(String),
    /// The game ended with this final score.
    GameOver {
        /// Final score.
        score: i64,
    },
}

/// The outcome of one call into the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Turn {
    /// The parsed command, for input turns.
    pub command: Option<ParsedCommand>,
    /// Output changes, in the order they happened.
    pub effects: Vec<Effect>,
}

impl Turn {
    /// Did this turn end the game?
    pub fn is_game_over(&self) -> bool {
        self.effects
            .iter()
            .any(|e| matches!(e, Effect::GameOver { .. }))
    }
}

/// Accumulated output: what a terminal would currently show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    /// Narrative lines.
    pub narrative: Vec<String>,
    /// Feedback lines.
    pub feedback: Vec<String>,
    /// Current prompt.
    pub prompt: String,
    /// Whether the game has ended.
    pub game_over: bool,
}

impl Transcript {
    /// Apply one effect.
    pub fn apply(&mut self, effect: &Effect) {
        match effect {
            Effect::Reset => *self = Self::default(),
            Effect::Narrative { lines, clear } => {
                if *clear {
                    self.narrative.clear();
                }
                self.narrative.extend(lines.iter().cloned());
            }
            Effect::Feedback { lines, clear } => {
                if *clear {
                    self.feedback.clear();
                }
                self.feedback.extend(lines.iter().cloned());
            }
            Effect::Prompt(prompt) => self.prompt = prompt.clone(),
            Effect::GameOver { .. } => self.game_over = true,
        }
    }

    /// Apply every effect of a turn.
    pub fn apply_turn(&mut self, turn: &Turn) {
        for effect in &turn.effects {
            self.apply(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(s: &[&str]) -> Vec<String> {
        s.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn append_and_clear() {
        let mut t = Transcript::default();
        t.apply(&Effect::Narrative {
            lines: lines(&["a"]),
            clear: false,
        });
        t.apply(&Effect::Narrative {
            lines: lines(&["b"]),
            clear: false,
        });
        assert_eq!(t.narrative, lines(&["a", "b"]));

        t.apply(&Effect::Narrative {
            lines: lines(&["c"]),
            clear: true,
        });
        assert_eq!(t.narrative, lines(&["c"]));
    }

    #[test]
    fn feedback_is_separate_from_narrative() {
        let mut t = Transcript::default();
        t.apply(&Effect::Narrative {
            lines: lines(&["story"]),
            clear: false,
        });
        t.apply(&Effect::Feedback {
            lines: lines(&["hint"]),
            clear: true,
        });
        assert_eq!(t.narrative, lines(&["story"]));
        assert_eq!(t.feedback, lines(&["hint"]));
    }

    #[test]
    fn reset_clears_everything() {
        let mut t = Transcript::default();
        t.apply(&Effect::Prompt("What do you do?".into()));
        t.apply(&Effect::GameOver { score: 3 });
        t.apply(&Effect::Reset);
        assert_eq!(t, Transcript::default());
    }

    #[test]
    fn turn_game_over_flag() {
        let turn = Turn {
            command: None,
            effects: vec![Effect::Prompt("x".into()), Effect::GameOver { score: 1 }],
        };
        assert!(turn.is_game_over());
        assert!(!Turn::default().is_game_over());
    }
}
