//! Game events.
//!
//! Events describe transitions the engine has made. A View that reacts to
//! changes (rather than re-rendering every frame from a snapshot) drains
//! them after each call into the engine.
//!
//! Ignored operations produce no event.

use serde::{Deserialize, Serialize};

use super::config::DisplayTime;
use super::palette::Color;

/// Something that happened in the game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A color was toggled in the setup screen.
    ColorToggled { color: Color, selected: bool },

    DisplayTimeChanged(DisplayTime),

    /// A game started with its first color.
    GameStarted { first: Color },

    /// The reveal of the current sequence began.
    RevealStarted { length: usize },

    /// The color at `index` is now shown.
    ColorRevealed { index: usize, color: Color },

    /// The reveal finished; the player may now recall.
    RecallStarted,

    /// The player picked the right color for `index`.
    ColorAccepted { index: usize, color: Color },

    /// The full sequence of `length` colors was recalled correctly.
    RoundCompleted { length: usize },

    /// The next round was prepared with one more color.
    SequenceExtended { color: Color, length: usize, score: u32 },

    /// The player picked `picked` where `expected` was due.
    GameOver {
        index: usize,
        expected: Color,
        picked: Color,
        score: u32,
        high_score: u32,
    },

    GameReset,
}

impl GameEvent {
    /// Does this event end the game?
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameEvent::GameOver { .. })
    }
}
