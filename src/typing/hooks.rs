use std::fmt;

use super::game::Game;

/// A lifecycle callback. Receives the game for read access to rounds and scores.
pub type Hook = Box<dyn FnMut(&Game)>;

/// Lifecycle callbacks invoked by the engine. Every hook defaults to a no-op.
pub struct GameHooks {
    pub on_begin_round: Hook,
    pub on_end_round: Hook,
    pub on_word_completed: Hook,
    pub on_game_completed: Hook,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HookKind {
    BeginRound,
    EndRound,
    WordCompleted,
    GameCompleted,
}

pub fn noop() -> Hook {
    Box::new(|_| {})
}

impl GameHooks {
    pub fn on_begin_round(mut self, hook: impl FnMut(&Game) + 'static) -> Self {
        self.on_begin_round = Box::new(hook);
        self
    }

    pub fn on_end_round(mut self, hook: impl FnMut(&Game) + 'static) -> Self {
        self.on_end_round = Box::new(hook);
        self
    }

    pub fn on_word_completed(mut self, hook: impl FnMut(&Game) + 'static) -> Self {
        self.on_word_completed = Box::new(hook);
        self
    }

    pub fn on_game_completed(mut self, hook: impl FnMut(&Game) + 'static) -> Self {
        self.on_game_completed = Box::new(hook);
        self
    }

    pub(crate) fn call(&mut self, kind: HookKind, game: &Game) {
        match kind {
            HookKind::BeginRound => (self.on_begin_round)(game),
            HookKind::EndRound => (self.on_end_round)(game),
            HookKind::WordCompleted => (self.on_word_completed)(game),
            HookKind::GameCompleted => (self.on_game_completed)(game),
        }
    }
}

impl Default for GameHooks {
    fn default() -> Self {
        Self {
            on_begin_round: noop(),
            on_end_round: noop(),
            on_word_completed: noop(),
            on_game_completed: noop(),
        }
    }
}

impl fmt::Debug for GameHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameHooks").finish_non_exhaustive()
    }
}
