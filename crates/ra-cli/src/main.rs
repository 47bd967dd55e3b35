//! Terminal player for Retro Adventure stories.

mod commands;
mod store;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "ra",
    about = "Retro Adventure: play text adventures in the terminal",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a story interactively
    Play {
        /// Bundled story to play (see `ra stories`)
        #[arg(short, long, conflicts_with = "file")]
        story: Option<String>,

        /// Story JSON file to play instead of a bundled one
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Player name; scores are only recorded for named players
        #[arg(short, long, env = "RA_PLAYER")]
        player: Option<String>,

        /// JSON-lines file that final scores are appended to
        #[arg(long, env = "RA_SCORES")]
        scores: Option<PathBuf>,
    },

    /// List the bundled stories
    Stories,

    /// Validate a story JSON file
    Check {
        /// Path to the story file
        file: PathBuf,
    },

    /// Show recorded scores, best first
    Scores {
        /// Only show scores for this story title
        #[arg(short, long)]
        story: Option<String>,

        /// JSON-lines score file
        #[arg(long, env = "RA_SCORES")]
        scores: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            story,
            file,
            player,
            scores,
        } => {
            let source = match file {
                Some(path) => commands::play::StorySource::File(path),
                None => commands::play::StorySource::Bundled(
                    story.unwrap_or_else(|| ra_core::catalog::DEFAULT_STORY.to_string()),
                ),
            };
            commands::play::run(source, player, scores).await
        }
        Commands::Stories => commands::stories::run(),
        Commands::Check { file } => commands::check::run(&file),
        Commands::Scores { story, scores } => commands::scores::run(&scores, story.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
