use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tracing::{debug, info};

use super::config::GameConfig;
use super::hooks::HookKind;
use super::input::{InputPort, KeyEffect, KeyOutcome};
use super::round::Round;
use super::word::{Outcome, Progress, Word};
use crate::core::effect::{FallEffect, KeyframePool};
use crate::core::timer::TimerQueue;
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerEvent {
    BeginRound,
    RevealWord { round: usize, word: usize },
    Expire { round: usize, word: usize },
    FadeOutDone { round: usize, word: usize },
}

/// The typing game engine.
///
/// Single-threaded and clock-driven: the caller feeds it time through
/// [`Game::advance_to`] and keys through [`Game::handle_key`]. Every timer
/// callback and key press runs to completion before the next one.
pub struct Game {
    config: GameConfig,
    rounds: Vec<Round>,
    current_round: usize,
    started: bool,
    in_progress: bool,
    input: InputPort,
    timers: TimerQueue<TimerEvent>,
    now: Duration,
    rng: StdRng,
    effect: Box<dyn FallEffect>,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Build a game with a caller-supplied RNG, for reproducible runs.
    pub fn with_rng(config: GameConfig, mut rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rounds = Vec::with_capacity(config.dictionary.len());
        for list in &config.dictionary {
            let mut words = Vec::with_capacity(list.len());
            for text in list {
                words.push(Word::new(text.clone(), sample_duration(&config, &mut rng)));
            }
            rounds.push(Round::new(words));
        }

        Ok(Self {
            config,
            rounds,
            current_round: 0,
            started: false,
            in_progress: false,
            input: InputPort::default(),
            timers: TimerQueue::new(),
            now: Duration::ZERO,
            rng,
            effect: Box::new(KeyframePool::default()),
        })
    }

    pub fn with_effect(mut self, effect: impl FallEffect + 'static) -> Self {
        self.effect = Box::new(effect);
        self
    }

    /// Prepare the fall paths, take the keyboard and begin round 0.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.effect.prepare(&mut self.rng);
        self.input.acquire();
        self.in_progress = true;
        info!(rounds = self.rounds.len(), "game started");
        self.begin_round();
    }

    /// Run every timer due at or before `now`, then move the clock to `now`.
    /// Time never goes backwards; an earlier `now` is ignored.
    pub fn advance_to(&mut self, now: Duration) {
        if now < self.now {
            return;
        }
        while let Some((deadline, event)) = self.timers.pop_due(now) {
            self.now = deadline;
            self.dispatch(event);
        }
        self.now = now;
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Route a key press to the active word, or activate the first visible
    /// word that starts with it.
    pub fn handle_key(&mut self, key: char, ctrl: bool) -> KeyOutcome {
        if !self.in_progress || !self.input.is_acquired() {
            return KeyOutcome::ignored();
        }
        let prevent_default = ctrl && self.config.prevent_ctrl.blocks(key);
        let effect = self.match_key(key);
        KeyOutcome {
            prevent_default,
            effect,
        }
    }

    fn match_key(&mut self, key: char) -> KeyEffect {
        let round = self.current_round;
        let skip_spaces = self.config.skip_spaces;
        let Some(data) = self.rounds.get_mut(round) else {
            return KeyEffect::Ignored;
        };

        if let Some(index) = data.active_index() {
            let Some(word) = data.word_mut(index) else {
                return KeyEffect::Ignored;
            };
            if !word.expects(key) {
                return KeyEffect::Ignored;
            }
            return match word.advance(skip_spaces) {
                Progress::Moved => KeyEffect::Advanced,
                Progress::Completed => {
                    self.succeed_word(round, index);
                    KeyEffect::Completed
                }
            };
        }

        let candidate = data
            .visible_indices()
            .find(|&i| data.words()[i].starts_with(key));
        let Some(index) = candidate else {
            return KeyEffect::Ignored;
        };
        let Some(word) = data.word_mut(index) else {
            return KeyEffect::Ignored;
        };
        debug!(round, index, text = word.text(), "word activated");
        match word.activate(skip_spaces) {
            Progress::Moved => KeyEffect::Activated,
            Progress::Completed => {
                self.succeed_word(round, index);
                KeyEffect::Completed
            }
        }
    }

    fn dispatch(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::BeginRound => self.begin_round(),
            TimerEvent::RevealWord { round, word } => self.reveal_word(round, word),
            TimerEvent::Expire { round, word } => self.fail_word(round, word),
            TimerEvent::FadeOutDone { round, word } => {
                if let Some(w) = self.rounds.get_mut(round).and_then(|r| r.word_mut(word)) {
                    w.finish_fade();
                }
            }
        }
    }

    fn begin_round(&mut self) {
        if !self.in_progress {
            return;
        }
        debug!(round = self.current_round, "begin round");
        self.reveal_word(self.current_round, 0);
        self.fire(HookKind::BeginRound);
    }

    fn reveal_word(&mut self, round: usize, index: usize) {
        let now = self.now;
        let interval = self.config.word_interval;
        let path = self.effect.next_path(&mut self.rng);
        let Some(data) = self.rounds.get_mut(round) else {
            return;
        };
        let len = data.len();
        let Some(word) = data.word_mut(index) else {
            return;
        };
        if !word.reveal(now, path) {
            return;
        }
        let handle = self
            .timers
            .schedule(now + word.duration(), TimerEvent::Expire { round, word: index });
        word.set_fail_timer(handle);
        debug!(round, index, text = word.text(), duration = ?word.duration(), "word revealed");

        // Words are released one at a time, in list order
        if index + 1 < len {
            self.timers.schedule(
                now + interval,
                TimerEvent::RevealWord {
                    round,
                    word: index + 1,
                },
            );
        }
    }

    fn succeed_word(&mut self, round: usize, index: usize) {
        let now = self.now;
        let fade_out = self.config.word_fade_out;
        let Some(data) = self.rounds.get_mut(round) else {
            return;
        };
        let Some(word) = data.word_mut(index) else {
            return;
        };
        if !word.resolve(Outcome::Success, now) {
            return;
        }
        if let Some(handle) = word.take_fail_timer() {
            self.timers.cancel(handle);
        }
        debug!(round, index, text = word.text(), "word completed");
        data.add_point();
        self.timers
            .schedule(now + fade_out, TimerEvent::FadeOutDone { round, word: index });

        self.fire(HookKind::WordCompleted);
        self.expire(round);
    }

    fn fail_word(&mut self, round: usize, index: usize) {
        let now = self.now;
        let Some(word) = self.rounds.get_mut(round).and_then(|r| r.word_mut(index)) else {
            return;
        };
        if !word.resolve(Outcome::Failed, now) {
            return;
        }
        word.take_fail_timer();
        debug!(round, index, text = word.text(), "word fell");
        self.expire(round);
    }

    fn expire(&mut self, round: usize) {
        let finished = self
            .rounds
            .get_mut(round)
            .is_some_and(|data| data.record_shown());
        if finished && round == self.current_round {
            self.end_round();
        }
    }

    fn end_round(&mut self) {
        debug!(
            round = self.current_round,
            score = self.current_round_score(),
            "end round"
        );
        self.current_round += 1;
        if self.current_round >= self.rounds.len() {
            self.end_game();
        } else {
            let at = self.now + self.config.next_round_delay;
            self.timers.schedule(at, TimerEvent::BeginRound);
        }
        self.fire(HookKind::EndRound);
    }

    fn end_game(&mut self) {
        self.in_progress = false;
        self.input.release();
        info!(
            score = self.total_score(),
            words = self.total_words(),
            "game completed"
        );
        self.fire(HookKind::GameCompleted);
    }

    fn fire(&mut self, kind: HookKind) {
        let mut hooks = std::mem::take(&mut self.config.hooks);
        hooks.call(kind, self);
        self.config.hooks = hooks;
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn has_started(&self) -> bool {
        self.started
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    pub fn is_finished(&self) -> bool {
        self.started && !self.in_progress
    }

    pub fn input_port(&self) -> InputPort {
        self.input
    }

    /// Index of the round being played. Equals [`Game::total_rounds`] once
    /// the last round has ended.
    pub fn current_round_index(&self) -> usize {
        self.current_round
    }

    pub fn total_rounds(&self) -> usize {
        self.rounds.len()
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn round(&self, index: usize) -> Option<&Round> {
        self.rounds.get(index)
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.rounds.get(self.current_round)
    }

    pub fn current_round_score(&self) -> u32 {
        self.current_round().map_or(0, Round::score)
    }

    pub fn total_score(&self) -> u32 {
        self.rounds.iter().map(Round::score).sum()
    }

    pub fn total_words(&self) -> usize {
        self.rounds.iter().map(Round::len).sum()
    }

    pub fn active_word(&self) -> Option<&Word> {
        self.current_round().and_then(Round::active_word)
    }

    pub fn visible_words(&self) -> impl Iterator<Item = &Word> {
        self.current_round()
            .into_iter()
            .flat_map(|round| round.visible_words())
    }
}

fn sample_duration(config: &GameConfig, rng: &mut StdRng) -> Duration {
    let min = config.word_min_duration.as_secs_f64();
    let max = config.word_max_duration.as_secs_f64();
    Duration::from_secs_f64(rng.random_range(min..=max))
}
