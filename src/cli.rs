use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::Level;

use crate::games::hangman::dictionary::DEFAULT_DICTIONARY_URL;
use crate::games::hangman::store::STORAGE_FILE;
use crate::games::hangman::words::DEFAULT_WORD_URL;
use crate::games::hangman::{Difficulty, Language, Settings, Theme};

#[derive(Parser, Debug)]
#[command(name = "hangman")]
#[command(about = "Guess the word before the figure is complete")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Word language: en, es or fr
    #[arg(short, long, default_value_t = Language::English)]
    pub language: Language,

    /// easy (8 misses), medium (6) or hard (4)
    #[arg(short, long, default_value_t = Difficulty::Medium)]
    pub difficulty: Difficulty,

    /// light or dark
    #[arg(short, long, default_value_t = Theme::Light)]
    pub theme: Theme,

    /// Where scores, history and the log live
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Random word endpoint for English, returning `["word"]`
    #[arg(long, default_value = DEFAULT_WORD_URL)]
    pub word_url: String,

    /// Dictionary endpoint; `{word}` is replaced by the word
    #[arg(long, default_value = DEFAULT_DICTIONARY_URL)]
    pub dictionary_url: String,

    /// Do not ring the terminal bell when a game ends
    #[arg(long)]
    pub mute: bool,

    /// Timeout for each remote lookup, in seconds
    #[arg(long, default_value_t = 5)]
    pub timeout_secs: u64,

    /// Log file (defaults to hangman.log in the data directory)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// trace, debug, info, warn or error
    #[arg(long, default_value_t = Level::INFO)]
    pub log_level: Level,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Play in the terminal (the default)
    Play,
    /// Print scores and the game history, then exit
    Stats,
}

impl Cli {
    pub fn settings(&self) -> Settings {
        Settings {
            language: self.language,
            difficulty: self.difficulty,
            theme: self.theme,
            sound: !self.mute,
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join("hangman")))
            .unwrap_or_else(|| PathBuf::from(".hangman"))
    }

    pub fn storage_path(&self) -> PathBuf {
        self.data_dir().join(STORAGE_FILE)
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.data_dir().join("hangman.log"))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
