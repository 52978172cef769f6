//! The color palette and the player's selection.
//!
//! ## Palette
//!
//! The palette is fixed at compile time: eleven named colors in a stable
//! order. Views render the setup grid by iterating [`Color::ALL`].
//!
//! ## Selection
//!
//! A [`Selection`] is the subset of the palette the player toggles on
//! before a game. Sequences are drawn from it, so a game needs at least
//! [`Selection::MIN_PLAYABLE`] colors. Members keep the order in which
//! they were toggled on, which is the order the recall pad renders them.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A palette color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Yellow,
    Blue,
    Purple,
    Green,
    Orange,
    Pink,
    Brown,
    Gray,
    Black,
    White,
}

impl Color {
    /// Every palette color, in display order.
    pub const ALL: [Color; 11] = [
        Color::Red,
        Color::Yellow,
        Color::Blue,
        Color::Purple,
        Color::Green,
        Color::Orange,
        Color::Pink,
        Color::Brown,
        Color::Gray,
        Color::Black,
        Color::White,
    ];

    /// Lowercase name of the color.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
            Color::Purple => "purple",
            Color::Green => "green",
            Color::Orange => "orange",
            Color::Pink => "pink",
            Color::Brown => "brown",
            Color::Gray => "gray",
            Color::Black => "black",
            Color::White => "white",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no palette color.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown color: {0}")]
pub struct UnknownColor(pub String);

impl std::str::FromStr for Color {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Color::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownColor(s.to_string()))
    }
}

/// The colors chosen for a game.
///
/// Never holds duplicates. Capacity matches the palette, so it never
/// spills to the heap.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    colors: SmallVec<[Color; 11]>,
}

impl Selection {
    /// Fewest colors a game can be started with.
    pub const MIN_PLAYABLE: usize = 2;

    /// Create an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `color` if absent, remove it if present.
    ///
    /// Returns `true` if the color is selected afterwards.
    pub fn toggle(&mut self, color: Color) -> bool {
        if let Some(pos) = self.colors.iter().position(|&c| c == color) {
            self.colors.remove(pos);
            false
        } else {
            self.colors.push(color);
            true
        }
    }

    /// Is `color` selected?
    #[must_use]
    pub fn contains(&self, color: Color) -> bool {
        self.colors.contains(&color)
    }

    /// Number of selected colors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Can a game be started with this selection?
    #[must_use]
    pub fn is_playable(&self) -> bool {
        self.colors.len() >= Self::MIN_PLAYABLE
    }

    /// Selected colors in toggle order.
    #[must_use]
    pub fn as_slice(&self) -> &[Color] {
        &self.colors
    }

    pub fn iter(&self) -> impl Iterator<Item = Color> + '_ {
        self.colors.iter().copied()
    }
}

impl FromIterator<Color> for Selection {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        let mut selection = Selection::new();
        for color in iter {
            if !selection.contains(color) {
                selection.colors.push(color);
            }
        }
        selection
    }
}
