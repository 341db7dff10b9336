use crate::domain::model::RoundId;
use crate::domain::ports::{TickHandle, TickScheduler};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Scheduler that never fires on its own: the caller delivers ticks by hand.
/// Clones share bookkeeping, so a test can keep one clone and inspect live streams.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    live: Arc<AtomicUsize>,
    scheduled: Arc<Mutex<Vec<RoundId>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles scheduled and not yet cancelled.
    pub fn live_handles(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    pub fn scheduled_rounds(&self) -> Vec<RoundId> {
        self.scheduled
            .lock()
            .map(|rounds| rounds.clone())
            .unwrap_or_default()
    }
}

impl TickScheduler for ManualScheduler {
    type Handle = ManualTickHandle;

    fn schedule(&mut self, round: RoundId, _period: Duration) -> ManualTickHandle {
        self.live.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut rounds) = self.scheduled.lock() {
            rounds.push(round);
        }
        ManualTickHandle {
            live: Arc::clone(&self.live),
            active: true,
        }
    }
}

#[derive(Debug)]
pub struct ManualTickHandle {
    live: Arc<AtomicUsize>,
    active: bool,
}

impl TickHandle for ManualTickHandle {
    fn cancel(&mut self) {
        if self.active {
            self.active = false;
            self.live.fetch_sub(1, Ordering::SeqCst);
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

impl Drop for ManualTickHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
