use std::time::Duration;

use crate::core::effect::FallPath;
use crate::core::timer::TimerHandle;

/// Where a word is in its life.
///
/// `Pending -> Falling -> FadingOut -> Removed` on success,
/// `Pending -> Falling -> Removed` when it falls off the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Pending,
    Falling,
    FadingOut,
    Removed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failed,
}

/// Result of moving the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Moved,
    Completed,
}

#[derive(Debug, Clone)]
pub struct Word {
    text: String,
    letters: Vec<char>,
    cursor: usize,
    active: bool,
    phase: Phase,
    outcome: Option<Outcome>,
    duration: Duration,
    path: FallPath,
    revealed_at: Option<Duration>,
    resolved_at: Option<Duration>,
    fail_timer: Option<TimerHandle>,
}

impl Word {
    pub fn new(text: impl Into<String>, duration: Duration) -> Self {
        let text = text.into();
        let letters = text.chars().collect();
        Self {
            text,
            letters,
            cursor: 0,
            active: false,
            phase: Phase::Pending,
            outcome: None,
            duration,
            path: FallPath::default(),
            revealed_at: None,
            resolved_at: None,
            fail_timer: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// Index of the next letter to match.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current_letter(&self) -> Option<char> {
        self.letters.get(self.cursor).copied()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// On the field and still typeable.
    pub fn is_visible(&self) -> bool {
        self.phase == Phase::Falling
    }

    pub fn is_resolved(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn path(&self) -> FallPath {
        self.path
    }

    pub fn revealed_at(&self) -> Option<Duration> {
        self.revealed_at
    }

    pub fn resolved_at(&self) -> Option<Duration> {
        self.resolved_at
    }

    /// Put the word on the field. Only a pending word can be revealed.
    pub fn reveal(&mut self, now: Duration, path: FallPath) -> bool {
        if self.phase != Phase::Pending {
            return false;
        }
        self.phase = Phase::Falling;
        self.path = path;
        self.revealed_at = Some(now);
        true
    }

    pub(crate) fn set_fail_timer(&mut self, handle: TimerHandle) {
        self.fail_timer = Some(handle);
    }

    pub(crate) fn take_fail_timer(&mut self) -> Option<TimerHandle> {
        self.fail_timer.take()
    }

    pub fn starts_with(&self, key: char) -> bool {
        self.letters.first() == Some(&key)
    }

    pub fn expects(&self, key: char) -> bool {
        self.current_letter() == Some(key)
    }

    /// Mark the word as receiving input. The key that activated it matched
    /// the first letter, so the cursor moves straight past it.
    pub fn activate(&mut self, skip_spaces: bool) -> Progress {
        self.active = true;
        self.advance(skip_spaces)
    }

    /// Move past the current letter, and past any whitespace after it when
    /// `skip_spaces` is set.
    pub fn advance(&mut self, skip_spaces: bool) -> Progress {
        if self.cursor < self.letters.len() {
            self.cursor += 1;
        }
        while skip_spaces
            && self
                .letters
                .get(self.cursor)
                .is_some_and(|c| c.is_whitespace())
        {
            self.cursor += 1;
        }
        if self.cursor >= self.letters.len() {
            Progress::Completed
        } else {
            Progress::Moved
        }
    }

    /// Settle the word. A word resolves once; later attempts return `false`
    /// and change nothing.
    pub fn resolve(&mut self, outcome: Outcome, now: Duration) -> bool {
        if self.outcome.is_some() || self.phase != Phase::Falling {
            return false;
        }
        self.outcome = Some(outcome);
        self.resolved_at = Some(now);
        self.active = false;
        self.phase = match outcome {
            Outcome::Success => Phase::FadingOut,
            Outcome::Failed => Phase::Removed,
        };
        true
    }

    pub fn finish_fade(&mut self) {
        if self.phase == Phase::FadingOut {
            self.phase = Phase::Removed;
        }
    }

    /// How far down the field the word is, `0.0` at reveal and `1.0` at expiry.
    pub fn fall_progress(&self, now: Duration) -> f32 {
        let Some(revealed) = self.revealed_at else {
            return 0.0;
        };
        // A fading word freezes where it was typed
        let at = self.resolved_at.unwrap_or(now).min(now);
        if self.duration.is_zero() {
            return 1.0;
        }
        (at.saturating_sub(revealed).as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Opacity-style progress of the fade-out, `0.0` just after success.
    pub fn fade_progress(&self, now: Duration, fade_out: Duration) -> f32 {
        match (self.phase, self.resolved_at) {
            (Phase::FadingOut, Some(at)) if !fade_out.is_zero() => {
                (now.saturating_sub(at).as_secs_f32() / fade_out.as_secs_f32()).clamp(0.0, 1.0)
            }
            (Phase::Removed, _) | (Phase::FadingOut, _) => 1.0,
            _ => 0.0,
        }
    }
}
