use crate::core::game::{Flow, TerminalGame};
use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures_util::StreamExt;
use ratatui::DefaultTerminal;
use std::time::Instant;
use tracing::{debug, info};

pub struct Engine<G: TerminalGame> {
    game: G,
}

impl<G: TerminalGame> Engine<G> {
    pub fn new(game: G) -> Self {
        Self { game }
    }

    /// Drive the game until it asks to quit or the input stream closes.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<G> {
        let started = Instant::now();
        let mut events = EventStream::new();
        let mut ticker = tokio::time::interval(self.game.tick_rate());
        info!("engine loop started");

        loop {
            terminal.draw(|f| self.game.render(f))?;

            tokio::select! {
                // 1. INPUT: keyboard events from the terminal
                maybe_event = events.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            // Bring timers up to date before the key is matched
                            self.game.on_tick(started.elapsed());
                            if self.game.handle_input(key) == Flow::Quit {
                                debug!("quit requested");
                                break;
                            }
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => return Err(e.into()),
                        None => break,
                    }
                }

                // 2. TICK: game heartbeat
                _ = ticker.tick() => {
                    self.game.on_tick(started.elapsed());
                }
            }
        }

        info!(elapsed = ?started.elapsed(), "engine loop finished");
        Ok(self.game)
    }
}
