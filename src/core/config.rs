//! Game configuration types.
//!
//! Hosts configure the engine at startup by providing a `GameConfig`:
//! - `DisplayTime`: how long each color is revealed
//! - pause lengths around the end of a round
//! - the storage key for the high score
//! - an optional RNG seed
//!
//! Configuration can be built in code or loaded from TOML:
//!
//! ```
//! use color_recall::core::GameConfig;
//!
//! let config = GameConfig::from_toml_str(r#"
//!     display_time = 0.5
//!     seed = 7
//! "#).unwrap();
//!
//! assert_eq!(config.display_time.seconds(), 0.5);
//! assert_eq!(config.seed, Some(7));
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Storage key the high score lives under unless configured otherwise.
pub const DEFAULT_HIGH_SCORE_KEY: &str = "COLOR_GAME_HIGH_SCORE";

/// Events buffered between drains unless configured otherwise.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Seconds each color stays on screen during a reveal.
///
/// Always within [`DisplayTime::MIN`, `DisplayTime::MAX`].
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct DisplayTime(f64);

impl DisplayTime {
    /// Shortest reveal, in seconds.
    pub const MIN: f64 = 0.1;
    /// Longest reveal, in seconds.
    pub const MAX: f64 = 5.0;

    /// Clamp `seconds` into range.
    ///
    /// Returns `None` for NaN or infinite input.
    #[must_use]
    pub fn new(seconds: f64) -> Option<Self> {
        seconds
            .is_finite()
            .then(|| Self(seconds.clamp(Self::MIN, Self::MAX)))
    }

    /// The value in seconds.
    #[must_use]
    pub const fn seconds(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_secs_f64(self.0)
    }
}

impl Default for DisplayTime {
    fn default() -> Self {
        Self(2.0)
    }
}

impl std::fmt::Display for DisplayTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} seconds", self.0)
    }
}

impl TryFrom<f64> for DisplayTime {
    type Error = String;

    fn try_from(seconds: f64) -> Result<Self, Self::Error> {
        Self::new(seconds).ok_or_else(|| format!("display time must be finite, got {seconds}"))
    }
}

impl From<DisplayTime> for f64 {
    fn from(time: DisplayTime) -> Self {
        time.0
    }
}

/// Errors loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Initial reveal pacing. The player may change it later.
    pub display_time: DisplayTime,

    /// How long the "correct" indicator shows after a completed round.
    pub correct_pause_ms: u64,

    /// Gap between the next round's setup and its reveal.
    pub inter_round_pause_ms: u64,

    /// Key the high score is stored under.
    pub high_score_key: String,

    /// RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,

    /// Most events kept between drains; older ones are dropped first.
    /// 0 disables event recording.
    pub event_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            display_time: DisplayTime::default(),
            correct_pause_ms: 1000,
            inter_round_pause_ms: 500,
            high_score_key: DEFAULT_HIGH_SCORE_KEY.to_string(),
            seed: None,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl GameConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document. Missing fields take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Set the initial display time (clamped; non-finite values are ignored).
    #[must_use]
    pub fn with_display_time(mut self, seconds: f64) -> Self {
        if let Some(time) = DisplayTime::new(seconds) {
            self.display_time = time;
        }
        self
    }

    #[must_use]
    pub fn with_correct_pause(mut self, pause: Duration) -> Self {
        self.correct_pause_ms = millis(pause);
        self
    }

    #[must_use]
    pub fn with_inter_round_pause(mut self, pause: Duration) -> Self {
        self.inter_round_pause_ms = millis(pause);
        self
    }

    #[must_use]
    pub fn with_high_score_key(mut self, key: impl Into<String>) -> Self {
        self.high_score_key = key.into();
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    #[must_use]
    pub fn correct_pause(&self) -> Duration {
        Duration::from_millis(self.correct_pause_ms)
    }

    #[must_use]
    pub fn inter_round_pause(&self) -> Duration {
        Duration::from_millis(self.inter_round_pause_ms)
    }
}

/// Whole milliseconds, saturating at `u64::MAX`.
fn millis(pause: Duration) -> u64 {
    u64::try_from(pause.as_millis()).unwrap_or(u64::MAX)
}
