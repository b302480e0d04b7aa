use crossterm::event::{KeyCode, KeyEvent};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use super::background::Background;
use super::config::{GameConfig, SpeedPreset};
use super::game::Game;
use super::hooks::GameHooks;
use super::input::{KeyInput, KeyOutcome};
use super::renderer;
use crate::core::game::{Flow, TerminalGame};
use crate::error::ConfigError;

/// Lifecycle notifications forwarded from the engine hooks to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    RoundBegan { round: usize },
    RoundEnded { round: usize },
    WordCompleted { round: usize, score: u32 },
    GameCompleted { score: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundStat {
    pub score: u32,
    pub words: usize,
}

/// Per-round stats for the sidebar, kept up to date from [`UiEvent`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scoreboard {
    rounds: Vec<RoundStat>,
    current: Option<usize>,
    final_score: Option<u32>,
}

impl Scoreboard {
    pub fn new(round_sizes: impl IntoIterator<Item = usize>) -> Self {
        Self {
            rounds: round_sizes
                .into_iter()
                .map(|words| RoundStat { score: 0, words })
                .collect(),
            current: None,
            final_score: None,
        }
    }

    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::RoundBegan { round } => self.current = Some(round),
            UiEvent::RoundEnded { round } => {
                if self.current == Some(round) {
                    self.current = None;
                }
            }
            UiEvent::WordCompleted { round, score } => {
                if let Some(stat) = self.rounds.get_mut(round) {
                    stat.score = score;
                }
            }
            UiEvent::GameCompleted { score } => {
                self.current = None;
                self.final_score = Some(score);
            }
        }
    }

    pub fn rounds(&self) -> &[RoundStat] {
        &self.rounds
    }

    /// The highlighted round; `None` between rounds and after the game.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    pub fn total_words(&self) -> usize {
        self.rounds.iter().map(|r| r.words).sum()
    }
}

/// Build hooks that forward every lifecycle callback into `tx`.
pub fn forwarding_hooks(tx: UnboundedSender<UiEvent>) -> GameHooks {
    let begin = tx.clone();
    let end = tx.clone();
    let word = tx.clone();
    GameHooks::default()
        .on_begin_round(move |game| {
            let _ = begin.send(UiEvent::RoundBegan {
                round: game.current_round_index(),
            });
        })
        .on_end_round(move |game| {
            // The engine has already moved on to the next round index
            let _ = end.send(UiEvent::RoundEnded {
                round: game.current_round_index().saturating_sub(1),
            });
        })
        .on_word_completed(move |game| {
            let _ = word.send(UiEvent::WordCompleted {
                round: game.current_round_index(),
                score: game.current_round_score(),
            });
        })
        .on_game_completed(move |game| {
            let _ = tx.send(UiEvent::GameCompleted {
                score: game.total_score(),
            });
        })
}

/// Labels shown in the header.
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub dictionary_name: String,
    pub speed: SpeedPreset,
    pub background: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Ready,
    Playing,
    GameOver,
}

/// Terminal front-end for the typing [`Game`].
pub struct TypingApp {
    game: Game,
    events: UnboundedReceiver<UiEvent>,
    scoreboard: Scoreboard,
    background: Background,
    options: AppOptions,
    started_at: Option<Duration>,
    elapsed: Duration,
}

impl TypingApp {
    pub fn new(config: GameConfig, mut rng: StdRng, options: AppOptions) -> Result<Self, ConfigError> {
        let (tx, events) = mpsc::unbounded_channel();
        let scoreboard = Scoreboard::new(config.dictionary.iter().map(Vec::len));
        let background = Background::new(options.background, StdRng::seed_from_u64(rng.random()));
        let game = Game::with_rng(config.with_hooks(forwarding_hooks(tx)), rng)?;

        Ok(Self {
            game,
            events,
            scoreboard,
            background,
            options,
            started_at: None,
            elapsed: Duration::ZERO,
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn options(&self) -> &AppOptions {
        &self.options
    }

    /// Time since the engine loop started.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn screen(&self) -> Screen {
        if !self.game.has_started() {
            Screen::Ready
        } else if self.game.is_finished() {
            Screen::GameOver
        } else {
            Screen::Playing
        }
    }

    fn start(&mut self) {
        debug!(at = ?self.elapsed, "starting game");
        self.started_at = Some(self.elapsed);
        self.game.start();
        self.drain_events();
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            debug!(?event, "ui event");
            self.scoreboard.apply(event);
        }
    }
}

impl TerminalGame for TypingApp {
    fn on_tick(&mut self, elapsed: Duration) {
        self.elapsed = elapsed;
        if let Some(start) = self.started_at {
            self.game.advance_to(elapsed.saturating_sub(start));
        }
        self.background.update(elapsed);
        self.drain_events();
    }

    fn handle_input(&mut self, event: KeyEvent) -> Flow {
        match event.code {
            KeyCode::Esc => return Flow::Quit,
            KeyCode::Enter if self.screen() == Screen::Ready => {
                self.start();
                return Flow::Continue;
            }
            KeyCode::Tab => {
                self.background.toggle(self.elapsed);
                debug!(enabled = self.background.is_enabled(), "background toggled");
                return Flow::Continue;
            }
            _ => {}
        }

        let Some(input) = KeyInput::from_key_event(&event) else {
            return Flow::Continue;
        };
        let outcome = if self.game.is_in_progress() {
            self.game.handle_key(input.key, input.ctrl)
        } else {
            KeyOutcome::ignored()
        };
        self.drain_events();

        if input.ctrl && input.key == 'c' && !outcome.prevent_default {
            return Flow::Quit;
        }
        Flow::Continue
    }

    fn render(&self, frame: &mut ratatui::Frame) {
        renderer::render(frame, self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn app(words: &[&str]) -> TypingApp {
        let config = GameConfig::new(vec![words.iter().map(|w| w.to_string()).collect()])
            .with_durations(Duration::from_secs(5), Duration::from_secs(5));
        let options = AppOptions {
            dictionary_name: "test".into(),
            speed: SpeedPreset::Normal,
            background: false,
        };
        TypingApp::new(config, StdRng::seed_from_u64(9), options).unwrap()
    }

    fn press(app: &mut TypingApp, c: char) -> Flow {
        app.handle_input(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn enter_starts_and_scoreboard_follows_hooks() {
        let mut app = app(&["hi", "yo"]);
        assert_eq!(app.screen(), Screen::Ready);
        assert_eq!(app.scoreboard().total_words(), 2);

        app.handle_input(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(app.screen(), Screen::Playing);
        assert_eq!(app.scoreboard().current(), Some(0));

        press(&mut app, 'h');
        press(&mut app, 'i');
        assert_eq!(app.scoreboard().rounds()[0].score, 1);

        app.on_tick(Duration::from_secs(10));
        assert_eq!(app.screen(), Screen::GameOver);
        assert_eq!(app.scoreboard().final_score(), Some(1));
        assert_eq!(app.scoreboard().current(), None);
    }

    #[test]
    fn escape_and_ctrl_c_quit() {
        let mut app = app(&["cat"]);
        assert_eq!(
            app.handle_input(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
            Flow::Quit
        );
        assert_eq!(
            app.handle_input(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Flow::Quit
        );
        assert_eq!(press(&mut app, 'c'), Flow::Continue);
    }

    #[test]
    fn scoreboard_ignores_unknown_rounds() {
        let mut board = Scoreboard::new([3, 3]);
        board.apply(UiEvent::WordCompleted { round: 7, score: 1 });
        assert!(board.rounds().iter().all(|r| r.score == 0));
        board.apply(UiEvent::WordCompleted { round: 1, score: 2 });
        assert_eq!(board.rounds()[1], RoundStat { score: 2, words: 3 });
    }

    #[test]
    fn highlight_clears_between_rounds() {
        let config = GameConfig::new(vec![vec!["ab".to_string()], vec!["cd".to_string()]])
            .with_durations(Duration::from_secs(5), Duration::from_secs(5))
            .with_next_round_delay(Duration::from_secs(2));
        let options = AppOptions {
            dictionary_name: "test".into(),
            speed: SpeedPreset::Normal,
            background: false,
        };
        let mut app = TypingApp::new(config, StdRng::seed_from_u64(9), options).unwrap();
        app.handle_input(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        press(&mut app, 'a');
        press(&mut app, 'b');
        assert_eq!(app.scoreboard().current(), None);
        assert_eq!(app.scoreboard().rounds()[0].score, 1);

        app.on_tick(Duration::from_secs(2));
        assert_eq!(app.scoreboard().current(), Some(1));
    }

    #[test]
    fn tab_toggles_the_background() {
        let mut app = app(&["cat"]);
        assert!(!app.background().is_enabled());
        let tab = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(app.handle_input(tab), Flow::Continue);
        assert!(app.background().is_enabled());
        app.handle_input(tab);
        assert!(!app.background().is_enabled());
    }

    #[test]
    fn scoreboard_keeps_highlight_for_stale_round_end() {
        let mut board = Scoreboard::new([2, 2]);
        board.apply(UiEvent::RoundBegan { round: 1 });
        board.apply(UiEvent::RoundEnded { round: 0 });
        assert_eq!(board.current(), Some(1));
    }
}
