//! Scheduling and invalidation tests.
//!
//! Every delay in the game is a scheduled task. These tests verify that
//! tasks fire in order, never overlap, and never touch a game that was
//! reset after they were scheduled.

use std::time::Duration;

use color_recall::core::{Color, GameConfig, Phase, ScriptedColors};
use color_recall::engine::GameEngine;
use color_recall::store::InMemoryStore;
use color_recall::timer::{Generation, TimerKind};

type Engine = GameEngine<ScriptedColors, InMemoryStore>;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn engine(script: &[Color]) -> Engine {
    let mut engine = GameEngine::with_source(
        GameConfig::new().with_display_time(1.0),
        ScriptedColors::new(script.iter().copied()),
        InMemoryStore::new(),
    );
    engine.toggle_color(Color::Red);
    engine.toggle_color(Color::Blue);
    engine
}

/// Play until the correct-pause of the first round is pending.
fn finish_first_round(engine: &mut Engine) {
    engine.start_game();
    engine.begin_reveal();
    engine.advance(ms(1000));
    let first = engine.sequence()[0];
    engine.submit_color(first);
    assert_eq!(engine.phase(), Phase::RoundCorrectPause);
}

// =============================================================================
// Ordering
// =============================================================================

/// At most one task is ever pending.
#[test]
fn test_tasks_never_overlap() {
    let mut engine = engine(&[Color::Red, Color::Blue, Color::Red]);
    engine.start_game();
    engine.begin_reveal();

    for _ in 0..40 {
        assert!(engine.pending_tasks().len() <= 1);
        if engine.phase() == Phase::Recalling {
            let sequence = engine.sequence().clone();
            for color in sequence {
                engine.submit_color(color);
            }
        }
        engine.advance(ms(250));
    }
    assert!(engine.score() >= 2);
}

/// The two end-of-round pauses run back to back.
#[test]
fn test_pauses_are_sequential() {
    let mut engine = engine(&[Color::Red, Color::Blue]);
    finish_first_round(&mut engine);

    let pending = engine.pending_tasks();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].kind, TimerKind::CorrectPause);
    assert_eq!(engine.next_deadline(), Some(ms(1000)));

    engine.advance(ms(1000));
    let pending = engine.pending_tasks();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].kind, TimerKind::InterRoundPause);
    assert_eq!(engine.next_deadline(), Some(ms(500)));

    engine.advance(ms(499));
    assert_eq!(engine.displayed_index(), None);
    engine.advance(ms(1));
    assert_eq!(engine.displayed_index(), Some(0));
}

/// One large step fires a whole chain of tasks.
#[test]
fn test_single_advance_runs_chain() {
    let mut engine = engine(&[Color::Red, Color::Blue]);
    finish_first_round(&mut engine);

    // correct pause, inter-round pause, two reveal ticks
    engine.advance(ms(1000 + 500 + 2000));
    assert_eq!(engine.phase(), Phase::Recalling);
    assert_eq!(engine.sequence().len(), 2);
}

/// A new display time applies from the next tick only.
#[test]
fn test_display_time_applies_to_next_tick() {
    let mut engine = engine(&[Color::Red, Color::Blue]);
    finish_first_round(&mut engine);
    engine.advance(ms(1500));
    assert_eq!(engine.displayed_index(), Some(0));

    engine.set_display_time(3.0);
    engine.advance(ms(1000));
    assert_eq!(engine.displayed_index(), Some(1));

    engine.advance(ms(2999));
    assert_eq!(engine.displayed_index(), Some(1));
    engine.advance(ms(1));
    assert_eq!(engine.phase(), Phase::Recalling);
}

// =============================================================================
// Invalidation
// =============================================================================

/// Reset during a reveal cancels the pending tick.
#[test]
fn test_reset_while_revealing() {
    let mut engine = engine(&[Color::Red]);
    engine.start_game();
    engine.begin_reveal();

    engine.reset_game();
    assert!(engine.pending_tasks().is_empty());

    engine.advance(ms(10_000));
    let snap = engine.snapshot();
    assert_eq!(snap.phase, Phase::Setup);
    assert_eq!(snap.displayed_index, None);
    assert!(snap.sequence.is_empty());
}

/// A stale reveal tick delivered late does nothing.
#[test]
fn test_stale_tick_after_reset() {
    let mut engine = engine(&[Color::Red, Color::Blue]);
    engine.start_game();
    engine.begin_reveal();
    let stale = engine.pending_tasks()[0].clone();

    engine.reset_game();
    engine.dispatch(stale.clone());
    assert_eq!(engine.phase(), Phase::Setup);
    assert_eq!(engine.displayed_index(), None);

    // Also harmless once a new game is revealing the same slot
    engine.start_game();
    engine.begin_reveal();
    assert_ne!(engine.generation(), stale.generation);
    engine.dispatch(stale);
    assert_eq!(engine.displayed_index(), Some(0));
    assert_eq!(engine.phase(), Phase::Revealing);
}

/// A stale correct-pause does not extend a new game's sequence.
#[test]
fn test_stale_correct_pause_after_reset() {
    let mut engine = engine(&[Color::Red, Color::Blue, Color::Blue]);
    finish_first_round(&mut engine);
    let stale = engine.pending_tasks()[0].clone();
    assert_eq!(stale.kind, TimerKind::CorrectPause);

    engine.reset_game();
    engine.dispatch(stale);

    let snap = engine.snapshot();
    assert!(snap.sequence.is_empty());
    assert_eq!(snap.score, 0);
    assert!(!snap.correct_indicator);
}

/// A stale inter-round pause does not start a reveal in a new game.
#[test]
fn test_stale_inter_round_pause() {
    let mut engine = engine(&[Color::Red, Color::Blue, Color::Blue]);
    finish_first_round(&mut engine);
    engine.advance(ms(1000));
    let stale = engine.pending_tasks()[0].clone();
    assert_eq!(stale.kind, TimerKind::InterRoundPause);

    engine.reset_game();
    engine.start_game();
    engine.dispatch(stale);
    assert_eq!(engine.phase(), Phase::AwaitingReveal);
    assert_eq!(engine.displayed_index(), None);
}

/// A host that delivers tasks itself cannot replay an earlier round's
/// tick into the current reveal.
#[test]
fn test_redelivered_tick_after_round_boundary() {
    let mut engine = engine(&[Color::Red, Color::Blue, Color::Blue]);
    engine.start_game();
    engine.begin_reveal();

    let round_one_tick = engine.pending_tasks()[0].clone();
    assert_eq!(round_one_tick.kind, TimerKind::RevealTick { index: 0 });
    engine.dispatch(round_one_tick.clone());
    engine.submit_color(Color::Red);

    // Host delivers both pauses
    let correct = engine.pending_tasks()[0].clone();
    engine.dispatch(correct);
    let inter_round = engine.pending_tasks()[0].clone();
    engine.dispatch(inter_round.clone());
    assert_eq!(engine.displayed_index(), Some(0));
    assert_eq!(engine.sequence().len(), 2);

    engine.dispatch(round_one_tick);
    engine.dispatch(inter_round);
    assert_eq!(engine.phase(), Phase::Revealing);
    assert_eq!(engine.displayed_index(), Some(0));
    assert_eq!(engine.pending_tasks().len(), 1);

    let tick = engine.pending_tasks()[0].clone();
    assert_eq!(tick.kind, TimerKind::RevealTick { index: 0 });
    engine.dispatch(tick);
    assert_eq!(engine.displayed_index(), Some(1));
}

/// Generations only move forward across starts and resets.
#[test]
fn test_generation_bumps() {
    let mut engine = engine(&[]);
    assert_eq!(engine.generation(), Generation(0));

    engine.start_game();
    assert_eq!(engine.generation(), Generation(1));

    engine.reset_game();
    assert_eq!(engine.generation(), Generation(2));

    // Ignored start does not bump
    engine.toggle_color(Color::Red);
    engine.start_game();
    assert_eq!(engine.generation(), Generation(2));
}
