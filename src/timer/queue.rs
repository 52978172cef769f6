//! Virtual-clock timer queue.
//!
//! Tasks fire in deadline order; tasks with equal deadlines fire in the
//! order they were scheduled.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::time::Duration;

use super::{Generation, TimerKind};

/// Unique identifier for a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(pub u32);

impl TaskId {
    /// Create a new task ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Task({})", self.0)
    }
}

/// A delayed callback waiting in the queue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub id: TaskId,

    /// Generation the task was scheduled under.
    pub generation: Generation,

    pub kind: TimerKind,

    /// Clock reading at which the task fires.
    pub due: Duration,
}

/// Pending tasks plus the virtual clock they are measured against.
///
/// The game never has more than one task pending at a time, so the queue
/// stays inline.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TimerQueue {
    now: Duration,
    tasks: SmallVec<[ScheduledTask; 4]>,
    next_id: u32,
}

impl TimerQueue {
    /// Create an empty queue with the clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock reading.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of pending tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Pending tasks, in scheduling order.
    #[must_use]
    pub fn tasks(&self) -> &[ScheduledTask] {
        &self.tasks
    }

    /// Schedule `kind` to fire `delay` after the current clock reading.
    pub fn schedule(&mut self, delay: Duration, generation: Generation, kind: TimerKind) -> TaskId {
        let id = TaskId::new(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);

        self.tasks.push(ScheduledTask {
            id,
            generation,
            kind,
            due: self.now + delay,
        });
        id
    }

    /// Remove a pending task.
    ///
    /// Returns `true` if the task was still pending.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        match self.tasks.iter().position(|t| t.id == id) {
            Some(pos) => {
                self.tasks.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Drop every pending task. Returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.tasks.len();
        self.tasks.clear();
        dropped
    }

    /// Time from now until the earliest pending task fires.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.earliest()
            .map(|pos| self.tasks[pos].due.saturating_sub(self.now))
    }

    /// Remove and return the earliest task due at or before `until`.
    ///
    /// The clock moves to the task's deadline, so anything scheduled while
    /// handling it is measured from when it fired.
    pub fn pop_due(&mut self, until: Duration) -> Option<ScheduledTask> {
        let pos = self.earliest()?;
        if self.tasks[pos].due > until {
            return None;
        }
        let task = self.tasks.remove(pos);
        self.now = self.now.max(task.due);
        Some(task)
    }

    /// Move the clock forward to `until` without firing anything.
    ///
    /// The clock never runs backwards.
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    fn earliest(&self) -> Option<usize> {
        self.tasks
            .iter()
            .enumerate()
            .min_by_key(|(_, t)| (t.due, t.id))
            .map(|(pos, _)| pos)
    }
}
