//! Scheduled callbacks.
//!
//! The game never blocks or sleeps. Every delay (a reveal tick, the
//! "correct" pause, the gap before the next round) is a [`ScheduledTask`]
//! in a [`TimerQueue`] running on a virtual clock. Hosts move the clock
//! forward from their frame loop; tests move it forward in exact steps.
//!
//! ## Generations
//!
//! Each task is tagged with the [`Generation`] it was scheduled under. The
//! engine bumps its generation whenever a game starts or resets, so a task
//! that outlived its game is recognised as stale and ignored, even if a
//! host kept a copy and delivers it late.
//!
//! ```
//! use std::time::Duration;
//! use color_recall::timer::{Generation, TimerKind, TimerQueue};
//!
//! let mut queue = TimerQueue::new();
//! let gen = Generation::default();
//! queue.schedule(Duration::from_millis(500), gen, TimerKind::InterRoundPause);
//! queue.schedule(Duration::from_millis(100), gen, TimerKind::CorrectPause);
//!
//! let first = queue.pop_due(Duration::from_secs(1)).unwrap();
//! assert_eq!(first.kind, TimerKind::CorrectPause);
//! assert_eq!(queue.now(), Duration::from_millis(100));
//! ```

mod queue;

pub use queue::{ScheduledTask, TaskId, TimerQueue};

use serde::{Deserialize, Serialize};

/// Epoch counter tying scheduled tasks to the game they belong to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Generation(pub u64);

impl Generation {
    /// The generation after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Gen({})", self.0)
    }
}

/// What a task does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// Advance the reveal past `index`.
    ///
    /// Carries the index it was scheduled for, so a tick only applies if
    /// the reveal is still showing that slot.
    RevealTick { index: usize },

    /// End of the "correct" feedback: extend the sequence.
    CorrectPause,

    /// End of the gap between rounds: start revealing.
    InterRoundPause,
}
