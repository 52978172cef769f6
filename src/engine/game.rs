//! The game's state machine.

use im::Vector;
use log::{debug, trace, warn};
use std::collections::VecDeque;
use std::time::Duration;

use crate::core::{
    Color, ColorSource, DisplayTime, GameConfig, GameEvent, GameRng, GameSnapshot, Phase,
    Selection,
};
use crate::store::ScoreStore;
use crate::timer::{Generation, ScheduledTask, TimerKind, TimerQueue};

/// Owns all game state and applies every transition.
///
/// Driven by two collaborators:
/// - a View, which calls the operations below and renders
///   [`snapshot`](Self::snapshot)
/// - the clock, moved forward with [`advance`](Self::advance)
///
/// Operations that are not valid in the current phase are ignored.
pub struct GameEngine<R = GameRng, S = crate::store::InMemoryStore> {
    config: GameConfig,

    // === Setup ===
    selection: Selection,
    display_time: DisplayTime,

    // === Game Progression ===
    phase: Phase,
    sequence: Vector<Color>,
    displayed_index: Option<usize>,
    user_input: Vector<Color>,
    score: u32,
    correct_indicator: bool,

    // === Scheduling ===
    generation: Generation,
    timers: TimerQueue,

    source: R,
    store: S,
    events: VecDeque<GameEvent>,
}

impl<S: ScoreStore> GameEngine<GameRng, S> {
    /// Create an engine drawing colors from a ChaCha8 RNG.
    ///
    /// Seeded from `config.seed`, or from entropy if unset.
    pub fn new(config: GameConfig, store: S) -> Self {
        let rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        Self::with_source(config, rng, store)
    }
}

impl<R: ColorSource, S: ScoreStore> GameEngine<R, S> {
    /// Create an engine with an explicit color source.
    pub fn with_source(config: GameConfig, source: R, store: S) -> Self {
        Self {
            selection: Selection::new(),
            display_time: config.display_time,
            phase: Phase::Setup,
            sequence: Vector::new(),
            displayed_index: None,
            user_input: Vector::new(),
            score: 0,
            correct_indicator: false,
            generation: Generation::default(),
            timers: TimerQueue::new(),
            source,
            store,
            events: VecDeque::new(),
            config,
        }
    }

    // === Setup ===

    /// Select `color` if unselected, unselect it otherwise.
    ///
    /// Ignored once a game has started.
    pub fn toggle_color(&mut self, color: Color) {
        if self.phase != Phase::Setup {
            trace!("toggle {} ignored in {}", color, self.phase);
            return;
        }
        let selected = self.selection.toggle(color);
        self.record(GameEvent::ColorToggled { color, selected });
    }

    /// Set reveal pacing, clamped to [`DisplayTime::MIN`, `DisplayTime::MAX`].
    ///
    /// A tick that is already scheduled keeps its delay; the new value
    /// applies from the next one. Non-finite values are ignored.
    pub fn set_display_time(&mut self, seconds: f64) {
        let Some(time) = DisplayTime::new(seconds) else {
            trace!("display time {} ignored", seconds);
            return;
        };
        self.display_time = time;
        self.record(GameEvent::DisplayTimeChanged(time));
    }

    /// Start a game with one random color from the selection.
    ///
    /// Ignored unless in setup with at least two colors selected.
    pub fn start_game(&mut self) {
        if self.phase != Phase::Setup || !self.selection.is_playable() {
            trace!(
                "start ignored: phase {}, {} colors selected",
                self.phase,
                self.selection.len()
            );
            return;
        }
        let Some(first) = self.source.pick(self.selection.as_slice()) else {
            return;
        };

        self.generation = self.generation.next();
        self.timers.clear();
        self.sequence = im::vector![first];
        self.displayed_index = None;
        self.user_input.clear();
        self.score = 0;
        self.correct_indicator = false;
        self.phase = Phase::AwaitingReveal;

        debug!(
            "game started ({}) with {} colors, first {}",
            self.generation,
            self.selection.len(),
            first
        );
        self.record(GameEvent::GameStarted { first });
    }

    /// Begin revealing the first sequence.
    ///
    /// The View calls this when the player signals they are ready.
    pub fn begin_reveal(&mut self) {
        if self.phase != Phase::AwaitingReveal {
            trace!("begin reveal ignored in {}", self.phase);
            return;
        }
        self.start_reveal();
    }

    // === Recall ===

    /// Record the player's pick for the next sequence slot.
    ///
    /// A wrong pick ends the game. Picking the last slot correctly
    /// completes the round; the next round starts after the configured
    /// pauses. Ignored outside the recall phase.
    pub fn submit_color(&mut self, color: Color) {
        if !self.phase.accepts_input() || self.user_input.len() >= self.sequence.len() {
            trace!("pick {} ignored in {}", color, self.phase);
            return;
        }

        self.user_input.push_back(color);
        let index = self.user_input.len() - 1;
        let expected = self.sequence[index];

        if color != expected {
            self.end_game(index, expected, color);
            return;
        }

        self.record(GameEvent::ColorAccepted { index, color });

        if self.user_input.len() == self.sequence.len() {
            self.phase = Phase::RoundCorrectPause;
            self.correct_indicator = true;
            self.timers.schedule(
                self.config.correct_pause(),
                self.generation,
                TimerKind::CorrectPause,
            );
            debug!("round of {} recalled", self.sequence.len());
            self.record(GameEvent::RoundCompleted {
                length: self.sequence.len(),
            });
        }
    }

    /// Abandon the current game and return to setup.
    ///
    /// Selection and display time are kept. Every pending task is
    /// cancelled, and tasks held elsewhere become stale.
    pub fn reset_game(&mut self) {
        self.generation = self.generation.next();
        let dropped = self.timers.clear();

        self.phase = Phase::Setup;
        self.sequence.clear();
        self.displayed_index = None;
        self.user_input.clear();
        self.score = 0;
        self.correct_indicator = false;

        debug!("game reset ({}), {} pending tasks dropped", self.generation, dropped);
        self.record(GameEvent::GameReset);
    }

    // === Clock ===

    /// Move the clock forward by `elapsed`, firing every task that falls due.
    ///
    /// Tasks scheduled by a firing task are measured from its deadline and
    /// fire within the same call if they fall due too.
    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.timers.now() + elapsed;
        while let Some(task) = self.timers.pop_due(until) {
            self.fire(task);
        }
        self.timers.advance_to(until);
    }

    /// Deliver a task from a host-owned timer.
    ///
    /// Stale tasks and tasks that no longer match the state are ignored.
    /// A task of the current game fires only while it is still pending,
    /// so a redelivered task is ignored.
    pub fn dispatch(&mut self, task: ScheduledTask) {
        if task.generation == self.generation && !self.timers.cancel(task.id) {
            trace!("{} already fired", task.id);
            return;
        }
        self.fire(task);
    }

    /// Time until the next pending task fires.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Pending tasks, in scheduling order.
    #[must_use]
    pub fn pending_tasks(&self) -> &[ScheduledTask] {
        self.timers.tasks()
    }

    fn fire(&mut self, task: ScheduledTask) {
        if task.generation != self.generation {
            trace!("{} from {} is stale", task.id, task.generation);
            return;
        }

        match task.kind {
            TimerKind::RevealTick { index } => self.reveal_tick(index),
            TimerKind::CorrectPause => self.extend_sequence(),
            TimerKind::InterRoundPause => {
                if self.phase == Phase::RoundCorrectPause && !self.correct_indicator {
                    self.start_reveal();
                }
            }
        }
    }

    fn start_reveal(&mut self) {
        self.phase = Phase::Revealing;
        self.displayed_index = Some(0);
        self.record(GameEvent::RevealStarted {
            length: self.sequence.len(),
        });
        self.record(GameEvent::ColorRevealed {
            index: 0,
            color: self.sequence[0],
        });
        self.schedule_tick(0);
    }

    fn schedule_tick(&mut self, index: usize) {
        self.timers.schedule(
            self.display_time.as_duration(),
            self.generation,
            TimerKind::RevealTick { index },
        );
    }

    fn reveal_tick(&mut self, index: usize) {
        if self.phase != Phase::Revealing || self.displayed_index != Some(index) {
            trace!("tick for {} does not match the reveal", index);
            return;
        }

        let next = index + 1;
        if next >= self.sequence.len() {
            self.displayed_index = None;
            self.user_input.clear();
            self.phase = Phase::Recalling;
            self.record(GameEvent::RecallStarted);
        } else {
            self.displayed_index = Some(next);
            self.record(GameEvent::ColorRevealed {
                index: next,
                color: self.sequence[next],
            });
            self.schedule_tick(next);
        }
    }

    fn extend_sequence(&mut self) {
        if self.phase != Phase::RoundCorrectPause || !self.correct_indicator {
            return;
        }
        let Some(color) = self.source.pick(self.selection.as_slice()) else {
            return;
        };

        self.correct_indicator = false;
        self.sequence.push_back(color);
        self.score = self.score.saturating_add(1);
        self.user_input.clear();
        self.displayed_index = None;

        self.timers.schedule(
            self.config.inter_round_pause(),
            self.generation,
            TimerKind::InterRoundPause,
        );
        self.record(GameEvent::SequenceExtended {
            color,
            length: self.sequence.len(),
            score: self.score,
        });
    }

    fn end_game(&mut self, index: usize, expected: Color, picked: Color) {
        self.phase = Phase::GameOver;
        self.timers.clear();

        let key = self.config.high_score_key.as_str();
        let stored = match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("could not read high score: {}", e);
                None
            }
        };
        let high_score = stored.unwrap_or(0).max(self.score);

        if stored.map_or(true, |best| self.score > best) {
            if let Err(e) = self.store.set(key, high_score) {
                warn!("could not save high score {}: {}", high_score, e);
            }
        }

        debug!(
            "game over at slot {}: expected {}, picked {}; score {}, high score {}",
            index, expected, picked, self.score, high_score
        );
        self.record(GameEvent::GameOver {
            index,
            expected,
            picked,
            score: self.score,
            high_score,
        });
    }

    // === Observation ===

    /// Everything a View needs to render.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            selection: self.selection.clone(),
            display_time: self.display_time,
            sequence: self.sequence.clone(),
            displayed_index: self.displayed_index,
            user_input: self.user_input.clone(),
            score: self.score,
            game_over: self.phase == Phase::GameOver,
            correct_indicator: self.correct_indicator,
            game_started: self.phase.is_started(),
        }
    }

    /// Stored high score. Missing or unreadable values read as 0.
    #[must_use]
    pub fn high_score(&self) -> u32 {
        match self.store.get(&self.config.high_score_key) {
            Ok(value) => value.unwrap_or(0),
            Err(e) => {
                warn!("could not read high score: {}", e);
                0
            }
        }
    }

    /// Should sequence slot `index` be drawn?
    #[must_use]
    pub fn is_revealed(&self, index: usize) -> bool {
        self.snapshot().is_revealed(index)
    }

    /// Take the events recorded since the last drain, oldest first.
    ///
    /// At most `config.event_capacity` are kept; when a View never
    /// drains, the oldest are dropped.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    fn record(&mut self, event: GameEvent) {
        let capacity = self.config.event_capacity;
        if capacity == 0 {
            return;
        }
        while self.events.len() >= capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn display_time(&self) -> DisplayTime {
        self.display_time
    }

    #[must_use]
    pub fn sequence(&self) -> &Vector<Color> {
        &self.sequence
    }

    #[must_use]
    pub fn displayed_index(&self) -> Option<usize> {
        self.displayed_index
    }

    #[must_use]
    pub fn user_input(&self) -> &Vector<Color> {
        &self.user_input
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    #[must_use]
    pub fn correct_indicator(&self) -> bool {
        self.correct_indicator
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
