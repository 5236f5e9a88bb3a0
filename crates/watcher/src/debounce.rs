//! Trigger debouncing
//!
//! Spreadsheet editors tend to emit a burst of modify events for a single
//! save (temp file write, rename, metadata touch). The guard collapses such a
//! burst into one accepted trigger.

use parking_lot::Mutex;
use std::time::{Duration, Instant};

/// Default cool-down window between two accepted triggers
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(2);

/// Cool-down guard shared by every trigger source
///
/// A trigger is accepted only when strictly more than `cooldown` has elapsed
/// since the previous accepted one. The first trigger is always accepted.
#[derive(Debug)]
pub struct DebounceGuard {
    cooldown: Duration,
    last_trigger: Mutex<Option<Instant>>,
}

impl DebounceGuard {
    /// Create a guard with the given cool-down window
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_trigger: Mutex::new(None),
        }
    }

    /// Decide whether a trigger observed at `now` should fire
    ///
    /// On acceptance the last trigger time becomes `now`. Rejected triggers
    /// leave the state untouched, so a steady stream of events closer than
    /// the window apart fires once per window rather than never.
    pub fn should_trigger(&self, now: Instant) -> bool {
        let mut last = self.last_trigger.lock();

        let accept = match *last {
            None => true,
            // Instants earlier than the last trigger count as zero elapsed
            Some(prev) => now.saturating_duration_since(prev) > self.cooldown,
        };

        if accept {
            *last = Some(now);
        }
        accept
    }

    /// Cool-down window
    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Time of the last accepted trigger, if any
    pub fn last_trigger(&self) -> Option<Instant> {
        *self.last_trigger.lock()
    }

    /// Forget the last accepted trigger
    pub fn reset(&self) {
        *self.last_trigger.lock() = None;
    }
}

impl Default for DebounceGuard {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN)
    }
}
