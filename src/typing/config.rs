use clap::ValueEnum;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::hooks::GameHooks;
use crate::error::ConfigError;

/// Reveal interval and fall-duration range of a speed preset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedTimings {
    pub word_interval: Duration,
    pub word_min_duration: Duration,
    pub word_max_duration: Duration,
}

impl SpeedTimings {
    fn from_secs(interval: f64, min: f64, max: f64) -> Self {
        Self {
            word_interval: Duration::from_secs_f64(interval),
            word_min_duration: Duration::from_secs_f64(min),
            word_max_duration: Duration::from_secs_f64(max),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpeedPreset {
    #[display("slow")]
    Slow,
    #[default]
    #[display("normal")]
    Normal,
    #[display("fast")]
    Fast,
    #[display("very fast")]
    VeryFast,
}

impl SpeedPreset {
    pub fn timings(self) -> SpeedTimings {
        match self {
            SpeedPreset::Slow => SpeedTimings::from_secs(3.0, 6.0, 10.0),
            SpeedPreset::Normal => SpeedTimings::from_secs(1.5, 4.0, 8.0),
            SpeedPreset::Fast => SpeedTimings::from_secs(1.0, 3.0, 6.0),
            SpeedPreset::VeryFast => SpeedTimings::from_secs(0.5, 2.0, 5.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
pub enum WordsPerRound {
    #[value(name = "5")]
    Five,
    #[default]
    #[value(name = "10")]
    Ten,
    #[value(name = "20")]
    Twenty,
}

impl WordsPerRound {
    pub fn count(self) -> usize {
        match self {
            WordsPerRound::Five => 5,
            WordsPerRound::Ten => 10,
            WordsPerRound::Twenty => 20,
        }
    }
}

/// Which Ctrl+key combinations the front-end must not act on while a game runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreventCtrl {
    None,
    All,
    Keys(Vec<char>),
}

impl PreventCtrl {
    pub fn blocks(&self, key: char) -> bool {
        match self {
            PreventCtrl::None => false,
            PreventCtrl::All => true,
            PreventCtrl::Keys(keys) => keys.iter().any(|k| k.eq_ignore_ascii_case(&key)),
        }
    }
}

impl Default for PreventCtrl {
    fn default() -> Self {
        PreventCtrl::Keys(vec!['f', 'o', 'p'])
    }
}

/// Per-game settings. Build with [`GameConfig::new`] and the `with_*` setters.
#[derive(Debug)]
pub struct GameConfig {
    pub word_interval: Duration,
    pub word_min_duration: Duration,
    pub word_max_duration: Duration,
    pub word_fade_out: Duration,
    pub next_round_delay: Duration,
    pub skip_spaces: bool,
    pub prevent_ctrl: PreventCtrl,
    pub hooks: GameHooks,
    /// One list of words per round, in play order.
    pub dictionary: Vec<Vec<String>>,
}

impl GameConfig {
    pub fn new(dictionary: Vec<Vec<String>>) -> Self {
        Self {
            word_interval: Duration::from_secs(1),
            word_min_duration: Duration::from_secs(4),
            word_max_duration: Duration::from_secs(8),
            word_fade_out: Duration::from_secs(1),
            next_round_delay: Duration::from_secs(2),
            skip_spaces: true,
            prevent_ctrl: PreventCtrl::default(),
            hooks: GameHooks::default(),
            dictionary,
        }
    }

    pub fn with_speed(self, speed: SpeedPreset) -> Self {
        self.with_timings(speed.timings())
    }

    pub fn with_timings(mut self, timings: SpeedTimings) -> Self {
        self.word_interval = timings.word_interval;
        self.word_min_duration = timings.word_min_duration;
        self.word_max_duration = timings.word_max_duration;
        self
    }

    pub fn with_durations(mut self, min: Duration, max: Duration) -> Self {
        self.word_min_duration = min;
        self.word_max_duration = max;
        self
    }

    pub fn with_word_interval(mut self, interval: Duration) -> Self {
        self.word_interval = interval;
        self
    }

    pub fn with_fade_out(mut self, fade_out: Duration) -> Self {
        self.word_fade_out = fade_out;
        self
    }

    pub fn with_next_round_delay(mut self, delay: Duration) -> Self {
        self.next_round_delay = delay;
        self
    }

    pub fn with_skip_spaces(mut self, skip: bool) -> Self {
        self.skip_spaces = skip;
        self
    }

    pub fn with_prevent_ctrl(mut self, prevent: PreventCtrl) -> Self {
        self.prevent_ctrl = prevent;
        self
    }

    pub fn with_hooks(mut self, hooks: GameHooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dictionary.is_empty() {
            return Err(ConfigError::NoRounds);
        }
        for (round, words) in self.dictionary.iter().enumerate() {
            if words.is_empty() {
                return Err(ConfigError::EmptyRound { round });
            }
            if let Some(index) = words.iter().position(|w| w.is_empty()) {
                return Err(ConfigError::EmptyWord { round, index });
            }
        }
        if self.word_interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        if self.word_min_duration.is_zero() {
            return Err(ConfigError::ZeroDuration);
        }
        if self.word_min_duration > self.word_max_duration {
            return Err(ConfigError::DurationRange {
                min: self.word_min_duration,
                max: self.word_max_duration,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&[&str]]) -> Vec<Vec<String>> {
        list.iter()
            .map(|round| round.iter().map(|w| w.to_string()).collect())
            .collect()
    }

    #[test]
    fn presets_match_the_published_table() {
        let t = SpeedPreset::VeryFast.timings();
        assert_eq!(t.word_interval, Duration::from_millis(500));
        assert_eq!(t.word_min_duration, Duration::from_secs(2));
        assert_eq!(t.word_max_duration, Duration::from_secs(5));

        let t = SpeedPreset::Normal.timings();
        assert_eq!(t.word_interval, Duration::from_millis(1500));
        assert_eq!(SpeedPreset::Slow.timings().word_max_duration, Duration::from_secs(10));
        assert_eq!(SpeedPreset::Fast.timings().word_min_duration, Duration::from_secs(3));
    }

    #[test]
    fn words_per_round_counts() {
        assert_eq!(WordsPerRound::Five.count(), 5);
        assert_eq!(WordsPerRound::default().count(), 10);
        assert_eq!(WordsPerRound::Twenty.count(), 20);
    }

    #[test]
    fn prevent_ctrl_is_case_insensitive() {
        let prevent = PreventCtrl::default();
        assert!(prevent.blocks('f'));
        assert!(prevent.blocks('P'));
        assert!(!prevent.blocks('c'));
        assert!(PreventCtrl::All.blocks('c'));
        assert!(!PreventCtrl::None.blocks('f'));
    }

    #[test]
    fn validate_rejects_malformed_dictionaries() {
        assert!(matches!(GameConfig::new(vec![]).validate(), Err(ConfigError::NoRounds)));
        assert!(matches!(
            GameConfig::new(words(&[&["a"], &[]])).validate(),
            Err(ConfigError::EmptyRound { round: 1 })
        ));
        assert!(matches!(
            GameConfig::new(words(&[&["a", ""]])).validate(),
            Err(ConfigError::EmptyWord { round: 0, index: 1 })
        ));
    }

    #[test]
    fn validate_rejects_bad_timings() {
        let dict = || words(&[&["a"]]);
        assert!(matches!(
            GameConfig::new(dict()).with_word_interval(Duration::ZERO).validate(),
            Err(ConfigError::ZeroInterval)
        ));
        assert!(matches!(
            GameConfig::new(dict())
                .with_durations(Duration::ZERO, Duration::from_secs(1))
                .validate(),
            Err(ConfigError::ZeroDuration)
        ));
        assert!(matches!(
            GameConfig::new(dict())
                .with_durations(Duration::from_secs(5), Duration::from_secs(2))
                .validate(),
            Err(ConfigError::DurationRange { .. })
        ));
        assert!(GameConfig::new(dict()).with_speed(SpeedPreset::Fast).validate().is_ok());
    }
}
