//! Word lists.
//!
//! The on-disk format is a JSON array of named lists, each holding one array
//! of words per round:
//!
//! ```json
//! [{ "name": "Animals", "words": [["cat", "dog"], ["horse", "zebra"]] }]
//! ```

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::ConfigError;

const EMBEDDED: &str = include_str!("../../assets/dictionary.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordList {
    pub name: String,
    #[serde(rename = "words")]
    pub rounds: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dictionaries {
    lists: Vec<WordList>,
}

impl Dictionaries {
    /// The word lists bundled with the binary.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_json(EMBEDDED)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loading dictionary file");
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let dictionaries: Self = serde_json::from_str(json)?;
        if dictionaries.lists.is_empty() {
            return Err(ConfigError::NoWordLists);
        }
        Ok(dictionaries)
    }

    pub fn lists(&self) -> &[WordList] {
        &self.lists
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&WordList, ConfigError> {
        self.lists.get(index).ok_or(ConfigError::UnknownDictionary {
            index,
            available: self.lists.len(),
        })
    }

    /// Shuffle every round of list `index` and keep the first
    /// `words_per_round` words of each. The stored lists are left untouched.
    pub fn prepare<R: Rng + ?Sized>(
        &self,
        index: usize,
        words_per_round: usize,
        rng: &mut R,
    ) -> Result<Vec<Vec<String>>, ConfigError> {
        if words_per_round == 0 {
            return Err(ConfigError::ZeroWordsPerRound);
        }
        let list = self.get(index)?;
        if list.rounds.is_empty() {
            return Err(ConfigError::EmptyWordList {
                name: list.name.clone(),
            });
        }

        let rounds = list
            .rounds
            .iter()
            .map(|round| {
                let mut words = round.clone();
                words.shuffle(&mut *rng);
                words.truncate(words_per_round);
                words
            })
            .collect();
        Ok(rounds)
    }
}
