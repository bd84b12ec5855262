mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use vocabgram_lib::Rating;

#[derive(Parser)]
#[command(name = "vocabgram-cli", about = "Daily vocabulary reviews with fixed-step spaced repetition", version)]
struct Cli {
    /// Data directory (default: from config, else the platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Import a vocabulary CSV (term, phonetic, definition, sentence, frequency)
    Import {
        /// Path to the CSV file; UTF-8 or the configured fallback encoding
        file: PathBuf,
    },

    /// Show today's task queue
    Queue,

    /// Study today's queue interactively
    Study,

    /// Rate a word without a session
    Rate {
        /// Word to rate (case-insensitive)
        term: String,
        /// known, forgot or mastered
        rating: Rating,
    },

    /// Browse the word list
    List {
        /// Case-insensitive substring filter
        #[arg(long)]
        search: Option<String>,
        /// Maximum rows (default: from config)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Toggle a word's mastered flag
    Toggle {
        /// Word to toggle (case-insensitive)
        term: String,
    },

    /// Show learning statistics
    Stats,

    /// Show or change settings
    Settings {
        /// Maximum number of new words per day
        #[arg(long)]
        daily_target: Option<u32>,
    },

    /// Delete all words, progress and settings
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// Pronounce a word with the configured speech command
    Speak {
        term: String,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let mut app = app::App::new(cli.data_dir.as_deref())?;

    match cli.command.unwrap_or(Command::Study) {
        Command::Import { file } => {
            commands::import::run(&mut app, &file, &cli.format, use_color)?;
        }
        Command::Queue => {
            commands::queue::run(&app, &cli.format, use_color)?;
        }
        Command::Study => {
            commands::study::run(&mut app, use_color)?;
        }
        Command::Rate { term, rating } => {
            commands::rate::run(&mut app, &term, rating, &cli.format)?;
        }
        Command::List { search, limit } => {
            let limit = limit.unwrap_or(app.config.list_limit);
            commands::list::run(&app, search.as_deref(), limit, &cli.format, use_color)?;
        }
        Command::Toggle { term } => {
            commands::toggle::run(&mut app, &term, &cli.format)?;
        }
        Command::Stats => {
            commands::stats::run(&app, &cli.format, use_color)?;
        }
        Command::Settings { daily_target } => {
            commands::settings::run(&mut app, daily_target, &cli.format)?;
        }
        Command::Reset { yes } => {
            commands::reset::run(&mut app, yes)?;
        }
        Command::Speak { term } => {
            app.speaker().speak(&term);
        }
    }

    Ok(())
}
