//! Score write coalescing.
//!
//! Courts correct their own score entries in quick succession; only the last
//! value per (round, court) within the window is worth persisting.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// How long a score entry waits for a correction before it is persisted.
pub const DEFAULT_DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

/// A score entry ready to be written through to the store.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ScoreWrite {
    pub round: u32,
    pub court: u32,
    pub score_a: u32,
    pub score_b: u32,
}

/// Last-write-wins buffer keyed by (round, court). Each new push for a key
/// replaces the held value and restarts that key's window.
#[derive(Debug)]
pub struct ScoreDebouncer {
    window: Duration,
    pending: HashMap<(u32, u32), (ScoreWrite, Instant)>,
}

impl Default for ScoreDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_WINDOW)
    }
}

impl ScoreDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: HashMap::new(),
        }
    }

    /// Buffer a score entry, superseding any pending one for the same court.
    pub fn push(&mut self, write: ScoreWrite, now: Instant) {
        self.pending
            .insert((write.round, write.court), (write, now + self.window));
    }

    /// Writes whose window has elapsed, in (round, court) order.
    pub fn drain_due(&mut self, now: Instant) -> Vec<ScoreWrite> {
        let mut due: Vec<ScoreWrite> = self
            .pending
            .values()
            .filter(|(_, deadline)| *deadline <= now)
            .map(|(w, _)| *w)
            .collect();
        self.pending.retain(|_, (_, deadline)| *deadline > now);
        due.sort_by_key(|w| (w.round, w.court));
        due
    }

    /// Everything still buffered, due or not. Used when a round closes and
    /// nothing may stay unwritten.
    pub fn drain_all(&mut self) -> Vec<ScoreWrite> {
        let mut all: Vec<ScoreWrite> = self.pending.drain().map(|(_, (w, _))| w).collect();
        all.sort_by_key(|w| (w.round, w.court));
        all
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
