//! Core types: palette, configuration, RNG, phases and events.
//!
//! Nothing here schedules or mutates game state. The engine composes
//! these into the game's state machine.

pub mod palette;
pub mod config;
pub mod rng;
pub mod state;
pub mod event;

pub use palette::{Color, Selection, UnknownColor};
pub use config::{ConfigError, DisplayTime, GameConfig, DEFAULT_EVENT_CAPACITY, DEFAULT_HIGH_SCORE_KEY};
pub use rng::{ColorSource, GameRng, ScriptedColors};
pub use state::{GameSnapshot, Phase};
pub use event::GameEvent;
