//! Scenario tests for the typing game engine.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use wordfall::core::effect::{FallPath, StraightDown};
use wordfall::typing::{
    Game, GameConfig, GameHooks, KeyEffect, Outcome, Phase, PreventCtrl,
};

fn secs(s: f64) -> Duration {
    Duration::from_secs_f64(s)
}

fn dictionary(rounds: &[&[&str]]) -> Vec<Vec<String>> {
    rounds
        .iter()
        .map(|words| words.iter().map(|w| w.to_string()).collect())
        .collect()
}

/// Fixed 5s falls, 1s apart, 1s fade, 2s between rounds.
fn config(rounds: &[&[&str]]) -> GameConfig {
    GameConfig::new(dictionary(rounds))
        .with_word_interval(secs(1.0))
        .with_durations(secs(5.0), secs(5.0))
        .with_fade_out(secs(1.0))
        .with_next_round_delay(secs(2.0))
}

fn build(config: GameConfig) -> Game {
    Game::with_rng(config, StdRng::seed_from_u64(42))
        .unwrap()
        .with_effect(StraightDown(FallPath::new(50.0, 50.0)))
}

fn started(config: GameConfig) -> Game {
    let mut game = build(config);
    game.start();
    game
}

/// Hooks that append a line per callback to a shared log.
fn recording_hooks() -> (GameHooks, Rc<RefCell<Vec<String>>>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let (a, b, c, d) = (log.clone(), log.clone(), log.clone(), log.clone());
    let hooks = GameHooks::default()
        .on_begin_round(move |g| a.borrow_mut().push(format!("begin:{}", g.current_round_index())))
        .on_end_round(move |g| b.borrow_mut().push(format!("end:{}", g.current_round_index())))
        .on_word_completed(move |g| {
            c.borrow_mut()
                .push(format!("word:{}:{}", g.current_round_index(), g.current_round_score()))
        })
        .on_game_completed(move |g| d.borrow_mut().push(format!("complete:{}", g.total_score())));
    (hooks, log)
}

fn type_str(game: &mut Game, text: &str) -> Vec<KeyEffect> {
    text.chars().map(|c| game.handle_key(c, false).effect).collect()
}

#[test]
fn test_cat_typed_dog_falls() {
    let (hooks, log) = recording_hooks();
    let mut game = started(config(&[&["cat", "dog"]]).with_hooks(hooks));

    assert_eq!(
        type_str(&mut game, "cat"),
        vec![KeyEffect::Activated, KeyEffect::Advanced, KeyEffect::Completed]
    );
    let round = game.current_round().unwrap();
    assert_eq!(round.score(), 1);
    assert_eq!(round.shown(), 1);

    // dog appears at 1s and falls for 5s
    game.advance_to(secs(5.9));
    assert_eq!(game.visible_words().map(|w| w.text()).collect::<Vec<_>>(), vec!["dog"]);
    game.advance_to(secs(6.0));

    let round = game.round(0).unwrap();
    assert_eq!(round.shown(), 2);
    assert_eq!(round.score(), 1);
    assert_eq!(round.words()[1].outcome(), Some(Outcome::Failed));
    assert!(game.is_finished());
    assert_eq!(
        *log.borrow(),
        vec!["begin:0", "word:0:1", "complete:1", "end:1"]
    );
}

#[test]
fn test_single_letter_word_completes_on_activation() {
    let mut game = started(config(&[&["a", "bb"]]));
    let outcome = game.handle_key('a', false);
    assert_eq!(outcome.effect, KeyEffect::Completed);
    assert_eq!(game.current_round_score(), 1);
    assert!(game.active_word().is_none());
}

#[test]
fn test_spaces_are_skipped() {
    let mut game = started(config(&[&["go now"]]));
    type_str(&mut game, "go");

    let word = game.active_word().unwrap();
    assert_eq!(word.current_letter(), Some('n'));
    assert_eq!(word.cursor(), 3);

    assert_eq!(game.handle_key(' ', false).effect, KeyEffect::Ignored);
    assert_eq!(type_str(&mut game, "now").last(), Some(&KeyEffect::Completed));
    assert_eq!(game.total_score(), 1);
}

#[test]
fn test_spaces_must_be_typed_when_not_skipped() {
    let mut game = started(config(&[&["go now"]]).with_skip_spaces(false));
    type_str(&mut game, "go");
    assert_eq!(game.active_word().unwrap().current_letter(), Some(' '));

    assert_eq!(game.handle_key('n', false).effect, KeyEffect::Ignored);
    assert_eq!(type_str(&mut game, " now").last(), Some(&KeyEffect::Completed));
}

#[test]
fn test_words_are_revealed_in_order_one_interval_apart() {
    let mut game = started(config(&[&["aa", "bb", "cc"]]));
    let visible = |g: &Game| g.visible_words().map(|w| w.text().to_string()).collect::<Vec<_>>();

    assert_eq!(visible(&game), vec!["aa"]);
    game.advance_to(secs(0.999));
    assert_eq!(visible(&game), vec!["aa"]);
    game.advance_to(secs(1.0));
    assert_eq!(visible(&game), vec!["aa", "bb"]);
    game.advance_to(secs(2.0));
    assert_eq!(visible(&game), vec!["aa", "bb", "cc"]);

    let revealed: Vec<_> = game.round(0).unwrap().words().iter().map(|w| w.revealed_at()).collect();
    assert_eq!(revealed, vec![Some(secs(0.0)), Some(secs(1.0)), Some(secs(2.0))]);
}

#[test]
fn test_pending_words_cannot_be_activated() {
    let mut game = started(config(&[&["aa", "bb"]]));
    assert_eq!(game.handle_key('b', false).effect, KeyEffect::Ignored);
    assert_eq!(game.round(0).unwrap().words()[1].phase(), Phase::Pending);

    game.advance_to(secs(1.0));
    assert_eq!(game.handle_key('b', false).effect, KeyEffect::Activated);
}

#[test]
fn test_only_one_word_is_active() {
    let mut game = started(config(&[&["apple", "banana"]]));
    game.advance_to(secs(1.0));

    game.handle_key('a', false);
    assert_eq!(game.handle_key('b', false).effect, KeyEffect::Ignored);
    assert_eq!(game.active_word().unwrap().text(), "apple");
    assert_eq!(
        game.round(0).unwrap().words().iter().filter(|w| w.is_active()).count(),
        1
    );
}

#[test]
fn test_first_matching_visible_word_wins() {
    let mut game = started(config(&[&["tea", "toast"]]));
    game.advance_to(secs(1.0));
    game.handle_key('t', false);
    assert_eq!(game.active_word().unwrap().text(), "tea");
}

#[test]
fn test_matching_is_case_sensitive() {
    let mut game = started(config(&[&["Cat"]]));
    assert_eq!(game.handle_key('c', false).effect, KeyEffect::Ignored);
    assert_eq!(game.handle_key('C', false).effect, KeyEffect::Activated);
}

#[test]
fn test_success_cancels_the_fail_timer() {
    let mut game = started(config(&[&["hi", "yo"]]));
    type_str(&mut game, "hi");
    assert_eq!(game.current_round().unwrap().shown(), 1);

    // hi would have fallen at 5s
    game.advance_to(secs(5.5));
    let round = game.current_round().unwrap();
    assert_eq!(round.shown(), 1);
    assert_eq!(round.score(), 1);
    assert_eq!(round.words()[0].outcome(), Some(Outcome::Success));
}

#[test]
fn test_completed_words_fade_out_then_disappear() {
    let mut game = started(config(&[&["hi", "yo"]]));
    type_str(&mut game, "hi");
    let phase = |g: &Game| g.round(0).unwrap().words()[0].phase();

    assert_eq!(phase(&game), Phase::FadingOut);
    assert_eq!(game.visible_words().count(), 0);
    game.advance_to(secs(0.9));
    assert_eq!(phase(&game), Phase::FadingOut);
    game.advance_to(secs(1.0));
    assert_eq!(phase(&game), Phase::Removed);
}

#[test]
fn test_rounds_follow_each_other_after_the_delay() {
    let (hooks, log) = recording_hooks();
    let mut game = started(config(&[&["a"], &["b"]]).with_hooks(hooks));

    game.handle_key('a', false);
    assert_eq!(game.current_round_index(), 1);
    assert!(game.is_in_progress());

    game.advance_to(secs(1.9));
    assert_eq!(game.visible_words().count(), 0);
    assert_eq!(game.handle_key('b', false).effect, KeyEffect::Ignored);

    game.advance_to(secs(2.0));
    assert_eq!(game.visible_words().count(), 1);

    game.advance_to(secs(7.0));
    assert!(game.is_finished());
    assert_eq!(game.round(1).unwrap().score(), 0);
    assert_eq!(
        *log.borrow(),
        vec!["begin:0", "word:0:1", "end:1", "begin:1", "complete:1", "end:2"]
    );
}

#[test]
fn test_ctrl_combinations_are_suppressed_while_playing() {
    let mut game = started(config(&[&["zzz"]]));
    assert!(game.handle_key('f', true).prevent_default);
    assert!(game.handle_key('O', true).prevent_default);
    assert!(!game.handle_key('c', true).prevent_default);
    assert!(!game.handle_key('f', false).prevent_default);

    let mut game = started(config(&[&["zzz"]]).with_prevent_ctrl(PreventCtrl::All));
    assert!(game.handle_key('c', true).prevent_default);

    // Nothing is suppressed once the game is over
    game.advance_to(secs(10.0));
    assert!(game.is_finished());
    assert!(!game.handle_key('c', true).prevent_default);
}

#[test]
fn test_keys_are_ignored_outside_a_running_game() {
    let mut game = build(config(&[&["x"]]));
    assert_eq!(game.handle_key('x', false).effect, KeyEffect::Ignored);
    assert!(!game.input_port().is_acquired());

    game.start();
    assert!(game.input_port().is_acquired());
    game.advance_to(secs(5.0));
    assert!(game.is_finished());
    assert!(!game.input_port().is_acquired());
    assert_eq!(game.handle_key('x', false).effect, KeyEffect::Ignored);
}

#[test]
fn test_end_round_fires_once_per_round() {
    let (hooks, log) = recording_hooks();
    let mut game = started(config(&[&["ab", "cd", "ef"]]).with_hooks(hooks));
    game.advance_to(secs(2.0));
    type_str(&mut game, "cd");
    game.advance_to(secs(100.0));

    let ends = log.borrow().iter().filter(|l| l.starts_with("end:")).count();
    let completes = log.borrow().iter().filter(|l| l.starts_with("complete:")).count();
    assert_eq!(ends, 1);
    assert_eq!(completes, 1);
    assert_eq!(game.round(0).unwrap().shown(), 3);
    assert_eq!(game.total_score(), 1);
}

#[test]
fn test_next_deadline_tracks_pending_timers() {
    let mut game = build(config(&[&["aa", "bb"]]));
    assert_eq!(game.next_deadline(), None);
    game.start();
    assert_eq!(game.next_deadline(), Some(secs(1.0)));
    game.advance_to(secs(1.0));
    assert_eq!(game.next_deadline(), Some(secs(5.0)));
}
