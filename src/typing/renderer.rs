/// Ratatui drawing for the typing game - no game logic in here
use ratatui::{
    layout::{Constraint, Direction, Layout},
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};
use std::time::Duration;

use super::app::{Screen, TypingApp};
use super::word::{Phase, Word};

const SIDEBAR_WIDTH: u16 = 22;

pub fn render(frame: &mut Frame, app: &TypingApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Field + sidebar
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    // Header
    let options = app.options();
    let header = Paragraph::new(format!(
        "⌨  WORDFALL  ⌨   {} · {}",
        options.dictionary_name, options.speed
    ))
    .block(Block::default().borders(Borders::ALL))
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    .alignment(Alignment::Center);
    frame.render_widget(header, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(SIDEBAR_WIDTH)])
        .split(chunks[1]);

    render_field(frame, app, body[0]);
    render_scoreboard(frame, app, body[1]);

    // Footer
    let help = match app.screen() {
        Screen::Ready => "Enter to start · Tab background · Esc to quit",
        Screen::Playing => "Type the falling words · Tab background · Esc to quit",
        Screen::GameOver => "Tab background · Esc to quit",
    };
    frame.render_widget(
        Paragraph::new(help)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center),
        chunks[2],
    );

    match app.screen() {
        Screen::Ready => render_banner(frame, body[0], "Ready?", "Press Enter to start"),
        Screen::GameOver => {
            let score = app
                .scoreboard()
                .final_score()
                .unwrap_or_else(|| app.game().total_score());
            let line = format!("You typed {}/{} words", score, app.scoreboard().total_words());
            render_banner(frame, body[0], "Game over", &line);
        }
        Screen::Playing => {}
    }
}

fn render_field(frame: &mut Frame, app: &TypingApp, area: Rect) {
    let game = app.game();
    let title = match (app.screen(), app.scoreboard().current()) {
        (Screen::GameOver, _) => " Finished ".to_string(),
        (Screen::Ready, _) => format!(" Round 1/{} ", game.total_rounds()),
        (Screen::Playing, Some(round)) => format!(" Round {}/{} ", round + 1, game.total_rounds()),
        (Screen::Playing, None) => " Next round ".to_string(),
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    // Background particles first so words draw over them
    let bg = app.background();
    if bg.is_enabled() {
        for (x, y) in bg.positions(app.elapsed()) {
            if !(0.0..100.0).contains(&y) {
                continue;
            }
            let col = ((x / 100.0) * inner.width as f32) as i32;
            let row = ((y / 100.0) * inner.height as f32) as i32;
            if col < 0 || col >= inner.width as i32 || row >= inner.height as i32 {
                continue;
            }
            frame.render_widget(
                Paragraph::new("·").style(Style::default().fg(Color::DarkGray)),
                Rect::new(inner.x + col as u16, inner.y + row as u16, 1, 1),
            );
        }
    }

    let now = game.now();
    let fade_out = game.config().word_fade_out;
    let current = game.current_round_index();

    // Words of a finished round keep fading while the next one waits to begin
    for (index, data) in game.rounds().iter().enumerate() {
        for word in data.words() {
            let drawn = match word.phase() {
                Phase::Falling => index == current,
                Phase::FadingOut => true,
                Phase::Pending | Phase::Removed => false,
            };
            if !drawn {
                continue;
            }
            if let Some(rect) = word_rect(word, now, inner) {
                frame.render_widget(Paragraph::new(word_line(word, now, fade_out)), rect);
            }
        }
    }
}

/// Screen cell for a word: it drops from just above the field to its bottom
/// edge and drifts along its path.
fn word_rect(word: &Word, now: Duration, inner: Rect) -> Option<Rect> {
    let len = word.letters().len() as u16;
    if len == 0 || inner.width == 0 {
        return None;
    }
    let progress = word.fall_progress(now);
    let top = -0.05 + 1.05 * progress;
    let row = ((top * inner.height as f32).round() as i32).clamp(0, inner.height as i32 - 1) as u16;

    let x = word.path().x_at(progress) / 100.0;
    let col = x * inner.width as f32 - x * len as f32;
    let max_col = inner.width.saturating_sub(len);
    let col = (col.max(0.0) as u16).min(max_col);

    let width = len.min(inner.width - col);
    Some(Rect::new(inner.x + col, inner.y + row, width, 1))
}

fn word_line(word: &Word, now: Duration, fade_out: Duration) -> Line<'static> {
    if word.phase() == Phase::FadingOut {
        let style = if word.fade_progress(now, fade_out) < 0.5 {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        return Line::from(Span::styled(word.text().to_string(), style));
    }

    let active = word.is_active();
    let spans: Vec<Span<'static>> = word
        .letters()
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let style = if !active {
                Style::default().fg(Color::White)
            } else if i < word.cursor() {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else if i == word.cursor() {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            };
            Span::styled(c.to_string(), style)
        })
        .collect();
    Line::from(spans)
}

fn render_scoreboard(frame: &mut Frame, app: &TypingApp, area: Rect) {
    let board = app.scoreboard();
    let mut lines: Vec<Line> = Vec::new();
    for (i, stat) in board.rounds().iter().enumerate() {
        let text = format!("Round {:<3} {:>3}/{:<3}", i + 1, stat.score, stat.words);
        let style = if board.current() == Some(i) {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(text, style)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(format!(
        "Total     {:>3}/{:<3}",
        app.game().total_score(),
        board.total_words()
    )));

    let sidebar = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Score "));
    frame.render_widget(sidebar, area);
}

fn render_banner(frame: &mut Frame, area: Rect, title: &str, text: &str) {
    let width = (text.chars().count() as u16 + 6).min(area.width);
    let height = 5.min(area.height);
    let rect = Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    );
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(format!("\n{text}"))
            .block(Block::default().borders(Borders::ALL).title(format!(" {title} ")))
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        rect,
    );
}
