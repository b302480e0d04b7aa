/// Interface between the terminal engine loop and a game front-end
use crossterm::event::KeyEvent;
use std::time::Duration;

/// What the engine loop should do after an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Main trait that a playable front-end implements.
/// The engine owns the terminal and the clock; the game owns everything else.
pub trait TerminalGame {
    /// How often the engine wakes up to advance time and redraw
    fn tick_rate(&self) -> Duration {
        Duration::from_millis(33)
    }

    /// Advance game time to `elapsed` (time since the engine started)
    fn on_tick(&mut self, elapsed: Duration);

    /// Handle a key press
    fn handle_input(&mut self, event: KeyEvent) -> Flow;

    /// Render the current state into the Ratatui Frame
    fn render(&self, frame: &mut ratatui::Frame);
}
