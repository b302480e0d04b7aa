use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Keyboard subscription held by a running game.
///
/// Acquired when the game starts and released when it ends; keys that arrive
/// while the port is released are dropped.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InputPort {
    acquired: bool,
}

impl InputPort {
    pub fn acquire(&mut self) {
        self.acquired = true;
    }

    pub fn release(&mut self) {
        self.acquired = false;
    }

    pub fn is_acquired(&self) -> bool {
        self.acquired
    }
}

/// A character key press as the engine sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: char,
    pub ctrl: bool,
}

impl KeyInput {
    pub fn new(key: char, ctrl: bool) -> Self {
        Self { key, ctrl }
    }

    /// Only character keys reach the engine.
    pub fn from_key_event(event: &KeyEvent) -> Option<Self> {
        match event.code {
            KeyCode::Char(c) => Some(Self::new(c, event.modifiers.contains(KeyModifiers::CONTROL))),
            _ => None,
        }
    }
}

/// What a key press did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEffect {
    Ignored,
    Activated,
    Advanced,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyOutcome {
    /// The front-end must not apply its own binding for this key.
    pub prevent_default: bool,
    pub effect: KeyEffect,
}

impl KeyOutcome {
    pub fn ignored() -> Self {
        Self {
            prevent_default: false,
            effect: KeyEffect::Ignored,
        }
    }
}
