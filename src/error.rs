//! Configuration errors.
//!
//! Everything that can go wrong before a game starts is a [`ConfigError`].
//! Once a game is running nothing fails: a word that falls off the screen is
//! an ordinary outcome.

use derive_more::{Display, Error};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Display, Error)]
pub enum ConfigError {
    #[display("dictionary has no rounds")]
    NoRounds,

    #[display("round {round} has no words")]
    EmptyRound { round: usize },

    #[display("word {index} of round {round} is empty")]
    EmptyWord { round: usize, index: usize },

    #[display("word interval must be greater than zero")]
    ZeroInterval,

    #[display("minimum word duration must be greater than zero")]
    ZeroDuration,

    #[display("minimum word duration {min:?} exceeds maximum {max:?}")]
    DurationRange { min: Duration, max: Duration },

    #[display("words per round must be greater than zero")]
    ZeroWordsPerRound,

    #[display("no word lists available")]
    NoWordLists,

    #[display("dictionary {index} does not exist ({available} available)")]
    UnknownDictionary { index: usize, available: usize },

    #[display("word list '{name}' has no rounds")]
    EmptyWordList { name: String },

    #[display("cannot read dictionary file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[display("malformed dictionary JSON: {source}")]
    Json { source: serde_json::Error },
}

impl From<serde_json::Error> for ConfigError {
    fn from(source: serde_json::Error) -> Self {
        Self::Json { source }
    }
}
