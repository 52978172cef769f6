//! The game engine.
//!
//! [`GameEngine`] is a flat state container with transition functions.
//! It owns the phase, the sequence, the player's input and the timer
//! queue, and it reads and writes the high score through a
//! [`ScoreStore`](crate::store::ScoreStore).
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use color_recall::core::{Color, GameConfig, Phase, ScriptedColors};
//! use color_recall::engine::GameEngine;
//! use color_recall::store::InMemoryStore;
//!
//! let mut engine = GameEngine::with_source(
//!     GameConfig::new().with_display_time(1.0),
//!     ScriptedColors::new([Color::Red, Color::Blue]),
//!     InMemoryStore::new(),
//! );
//!
//! engine.toggle_color(Color::Red);
//! engine.toggle_color(Color::Blue);
//! engine.start_game();
//! engine.begin_reveal();
//!
//! // Red is shown for one second, then the player recalls it
//! engine.advance(Duration::from_secs(1));
//! assert_eq!(engine.phase(), Phase::Recalling);
//!
//! engine.submit_color(Color::Red);
//! engine.advance(Duration::from_millis(1500));
//!
//! assert_eq!(engine.score(), 1);
//! assert_eq!(engine.sequence().len(), 2);
//! assert_eq!(engine.phase(), Phase::Revealing);
//! ```

mod game;

pub use game::GameEngine;
