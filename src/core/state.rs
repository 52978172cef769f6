//! Game phases and the View-facing snapshot.
//!
//! ## Phase
//!
//! The engine stores its phase explicitly:
//!
//! ```text
//! Setup ──start──▶ AwaitingReveal ──begin──▶ Revealing ──last tick──▶ Recalling
//!   ▲                                            ▲                      │    │
//!   │                                            └── RoundCorrectPause ◀┘    │ wrong
//!   └──────────────────────── reset (from anywhere) ◀──── GameOver ◀─────────┘
//! ```
//!
//! ## GameSnapshot
//!
//! Everything a View needs to draw one frame. Snapshots are cheap to take:
//! sequences use `im` persistent vectors, so cloning is O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::DisplayTime;
use super::palette::{Color, Selection};

/// Where the game is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Choosing colors and display time. No game in progress.
    #[default]
    Setup,
    /// Game started, first color chosen, waiting for the player to begin
    /// the reveal.
    AwaitingReveal,
    /// Sequence colors are being shown one at a time.
    Revealing,
    /// Player is reproducing the sequence.
    Recalling,
    /// Round completed; the next round is being prepared.
    RoundCorrectPause,
    /// Player picked a wrong color. Terminal until reset.
    GameOver,
}

impl Phase {
    /// Is a game in progress (any phase but `Setup`)?
    #[must_use]
    pub const fn is_started(self) -> bool {
        !matches!(self, Phase::Setup)
    }

    /// Does this phase accept color picks?
    #[must_use]
    pub const fn accepts_input(self) -> bool {
        matches!(self, Phase::Recalling)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Setup => "setup",
            Phase::AwaitingReveal => "awaiting reveal",
            Phase::Revealing => "revealing",
            Phase::Recalling => "recalling",
            Phase::RoundCorrectPause => "round correct",
            Phase::GameOver => "game over",
        };
        f.write_str(name)
    }
}

/// Read-only view of the engine state.
///
/// Views render from this and never mutate the engine directly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: Phase,

    /// Colors chosen for the game, in toggle order.
    pub selection: Selection,

    pub display_time: DisplayTime,

    /// The colors to recall, oldest first.
    pub sequence: Vector<Color>,

    /// Every sequence slot up to and including this index is revealed.
    /// `None` means nothing is being shown.
    pub displayed_index: Option<usize>,

    /// Colors picked so far in the current recall phase.
    pub user_input: Vector<Color>,

    /// Rounds completed in this game.
    pub score: u32,

    pub game_over: bool,

    /// Set while the "correct" feedback is on screen.
    pub correct_indicator: bool,

    pub game_started: bool,
}

impl GameSnapshot {
    /// Should sequence slot `index` be drawn?
    ///
    /// A slot is visible while it is being revealed, once the player has
    /// recalled it, or after the game ends.
    #[must_use]
    pub fn is_revealed(&self, index: usize) -> bool {
        if index >= self.sequence.len() {
            return false;
        }
        self.game_over
            || index < self.user_input.len()
            || self.displayed_index.is_some_and(|shown| index <= shown)
    }

    /// The slot that ended the game, if it has ended.
    #[must_use]
    pub fn failed_index(&self) -> Option<usize> {
        if self.game_over {
            self.user_input.len().checked_sub(1)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> GameSnapshot {
        GameSnapshot {
            phase: Phase::Revealing,
            selection: [Color::Red, Color::Blue].into_iter().collect(),
            display_time: DisplayTime::default(),
            sequence: im::vector![Color::Red, Color::Blue, Color::Blue],
            displayed_index: Some(0),
            user_input: Vector::new(),
            score: 2,
            game_over: false,
            correct_indicator: false,
            game_started: true,
        }
    }

    #[test]
    fn test_phase_predicates() {
        assert!(!Phase::Setup.is_started());
        assert!(Phase::GameOver.is_started());
        assert!(Phase::Recalling.accepts_input());
        assert!(!Phase::Revealing.accepts_input());
        assert!(!Phase::RoundCorrectPause.accepts_input());
        assert_eq!(Phase::default(), Phase::Setup);
    }

    #[test]
    fn test_revealed_prefix() {
        let snap = snapshot();
        assert!(snap.is_revealed(0));
        assert!(!snap.is_revealed(1));
        assert!(!snap.is_revealed(3));
    }

    #[test]
    fn test_recalled_slots_visible() {
        let mut snap = snapshot();
        snap.displayed_index = None;
        snap.user_input = im::vector![Color::Red, Color::Blue];
        assert!(snap.is_revealed(1));
        assert!(!snap.is_revealed(2));
    }

    #[test]
    fn test_game_over_reveals_everything() {
        let mut snap = snapshot();
        snap.displayed_index = None;
        snap.user_input = im::vector![Color::Blue];
        snap.game_over = true;
        assert!((0..3).all(|i| snap.is_revealed(i)));
        assert_eq!(snap.failed_index(), Some(0));
    }

    #[test]
    fn test_snapshot_serde() {
        let snap = snapshot();
        let json = serde_json::to_string(&snap).unwrap();
        let back: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }
}
