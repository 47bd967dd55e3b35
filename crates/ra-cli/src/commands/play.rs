use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;
use ra_core::{Story, catalog};
use ra_engine::{
    Effect, NullScoreStore, PlayerIdentity, ScoreStore, Session, SessionConfig, Turn,
};
use tracing::info;

use crate::store::JsonlScoreStore;

/// Where the story comes from.
pub enum StorySource {
    Bundled(String),
    File(PathBuf),
}

impl StorySource {
    fn load(&self) -> Result<Story, String> {
        match self {
            Self::Bundled(slug) => catalog::load(slug).map_err(|e| e.to_string()),
            Self::File(path) => super::load_story_file(path),
        }
    }
}

pub async fn run(
    source: StorySource,
    player: Option<String>,
    scores: Option<PathBuf>,
) -> Result<(), String> {
    let mut config = SessionConfig::new(source.load()?);
    if let Some(name) = player.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        config = config.with_player(PlayerIdentity::named(name));
    }
    let store: Arc<dyn ScoreStore> = match scores {
        Some(path) => {
            info!(path = %path.display(), "recording scores");
            Arc::new(JsonlScoreStore::new(path))
        }
        None => Arc::new(NullScoreStore),
    };
    info!(
        story = %config.story.title(),
        player = config.player.as_ref().map(|p| p.display_name.as_str()),
        "starting session"
    );
    let mut session = Session::new(config, store);

    println!("  {} {}", "Playing".bold(), session.story().title());
    println!("  Type 'help' for commands, 'restart' to start over, 'quit' to exit.\n");

    let turn = session.power_on().map_err(|e| e.to_string())?;
    render(&turn);

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("{}\n> ", session.player_prompt().bold());
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match input.to_lowercase().as_str() {
            "quit" | "q" => break,
            "restart" => {
                let turn = session.power_on().map_err(|e| e.to_string())?;
                render(&turn);
                continue;
            }
            _ => {}
        }

        if session.is_game_over() {
            println!(
                "{}\n",
                "The game is over. Type 'restart' to play again or 'quit' to exit.".yellow()
            );
            continue;
        }

        let turn = session.process_input(input).map_err(|e| e.to_string())?;
        render(&turn);
    }

    session.settle_pending_save().await;
    Ok(())
}

/// Print what a turn changed.
fn render(turn: &Turn) {
    if let Some(command) = turn.command.as_ref().filter(|c| !c.is_valid()) {
        println!("{}\n", command.message.yellow());
    }

    for effect in &turn.effects {
        match effect {
            Effect::Narrative { lines, clear } => {
                if *clear {
                    println!();
                }
                for line in lines {
                    println!("{line}");
                }
            }
            Effect::Feedback { lines, .. } => {
                for line in lines {
                    println!("{}", line.cyan());
                }
            }
            Effect::GameOver { .. } => println!("{}\n", "*** GAME OVER ***".bold()),
            Effect::Reset | Effect::Prompt(_) => {}
        }
    }
}
