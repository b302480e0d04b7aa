/// The falling-words typing game: engine, word lists and terminal front-end
pub mod app;
pub mod background;
pub mod config;
pub mod dictionary;
pub mod game;
pub mod hooks;
pub mod input;
pub mod renderer;
pub mod round;
pub mod word;

pub use app::{AppOptions, TypingApp};
pub use config::{GameConfig, PreventCtrl, SpeedPreset, WordsPerRound};
pub use dictionary::{Dictionaries, WordList};
pub use game::Game;
pub use hooks::GameHooks;
pub use input::{KeyEffect, KeyOutcome};
pub use round::Round;
pub use word::{Outcome, Phase, Word};
