//! Random color sources.
//!
//! The engine never calls a global RNG. It draws every new sequence color
//! through a [`ColorSource`], so hosts pick the randomness:
//!
//! - [`GameRng`]: seedable ChaCha8, uniform over the selection
//! - [`ScriptedColors`]: replays a fixed list, for deterministic tests
//!
//! ```
//! use color_recall::core::{Color, ColorSource, GameRng};
//!
//! let choices = [Color::Red, Color::Blue];
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//!
//! // Same seed, same picks
//! assert_eq!(a.pick(&choices), b.pick(&choices));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

use super::palette::Color;

/// Supplies the next color appended to a sequence.
pub trait ColorSource {
    /// Pick one of `choices`.
    ///
    /// Returns `None` only when `choices` is empty.
    fn pick(&mut self, choices: &[Color]) -> Option<Color>;
}

/// Deterministic RNG for sequence generation.
///
/// Uses ChaCha8 for speed while keeping the stream reproducible from a
/// seed.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create an RNG seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }
}

impl ColorSource for GameRng {
    fn pick(&mut self, choices: &[Color]) -> Option<Color> {
        if choices.is_empty() {
            return None;
        }
        Some(choices[self.inner.gen_range(0..choices.len())])
    }
}

/// Replays a fixed list of colors.
///
/// A scripted color that is not among the offered choices is skipped
/// in favour of the first choice, so the engine's "drawn from the
/// selection" invariant still holds. Once the script runs out the first
/// choice is returned.
#[derive(Clone, Debug, Default)]
pub struct ScriptedColors {
    script: VecDeque<Color>,
}

impl ScriptedColors {
    pub fn new(script: impl IntoIterator<Item = Color>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// Colors not yet handed out.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl ColorSource for ScriptedColors {
    fn pick(&mut self, choices: &[Color]) -> Option<Color> {
        let first = *choices.first()?;
        match self.script.pop_front() {
            Some(color) if choices.contains(&color) => Some(color),
            _ => Some(first),
        }
    }
}
