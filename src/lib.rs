//! # color-recall
//!
//! A Simon-style color memory game engine.
//!
//! A growing sequence of colors is revealed one at a time; the player
//! reproduces it by picking colors in order. One wrong pick ends the game
//! and records a high score.
//!
//! ## Design Principles
//!
//! 1. **Explicit State Machine**: The phase is an enum, transitions are
//!    methods, and operations that make no sense in the current phase are
//!    silently ignored.
//!
//! 2. **No Hidden Clocks**: Every delay is a task in a virtual-clock queue.
//!    Hosts advance it from their frame loop; tests advance it exactly.
//!
//! 3. **Injected Collaborators**: Randomness comes from a `ColorSource`,
//!    persistence from a `ScoreStore`. Both swap for fakes in tests.
//!
//! ## Modules
//!
//! - `core`: Palette, selection, configuration, RNG, phases, events
//! - `timer`: Generation-tagged scheduled tasks
//! - `store`: High score persistence
//! - `engine`: The game state machine

pub mod core;
pub mod timer;
pub mod store;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{
    Color, Selection,
    DisplayTime, GameConfig, ConfigError,
    ColorSource, GameRng, ScriptedColors,
    Phase, GameSnapshot, GameEvent,
};

pub use crate::timer::{Generation, ScheduledTask, TaskId, TimerKind, TimerQueue};

pub use crate::store::{FileStore, InMemoryStore, ScoreStore, StoreError};

pub use crate::engine::GameEngine;
