pub mod core {
    pub mod effect;
    pub mod engine;
    pub mod game;
    pub mod timer;
}

pub mod cli;
pub mod error;
pub mod typing;

// Re-export for convenience
pub use crate::error::ConfigError;
pub use crate::typing::{Game, GameConfig, GameHooks};
